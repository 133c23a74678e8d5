//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-host event types.
//
// Defines the contract between the windowing backend and the host. The
// backend only ever talks to the host through these messages.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size;
use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform layer to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Batched keyboard events gathered since the last frame.
    Inputs(Vec<InputEvent>),

    /// Window client area changed size (physical pixels).
    Resized(Size),

    /// Window lost keyboard focus; every held key is released.
    FocusLost,

    /// Window close requested by user or OS.
    WindowClosed,
}
