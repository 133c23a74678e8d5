//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the windowing backend with the host.
//
// This module defines the contract between platform implementations and
// the host, so the backend can be swapped (or replaced by a test harness
// feeding the channel directly) without touching host code.
//
// Components:
// - `interface`: Event types (the contract)
// - `event_collector`: Host-side per-frame event draining
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use event_collector::TickControl;
pub use interface::PlatformEvent;
