//=========================================================================
// Event Collector
//=========================================================================
//
// Host-side platform event collector with bounded draining and shutdown
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → KeyboardState + resize
//                                             → TickControl
//
// Bounded draining keeps one flood of events from stalling a frame; the
// remainder is picked up by the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::geometry::Size;
use crate::core::input::KeyboardState;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events once per frame and folds them into host state.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    max_events_per_frame: usize,
    pending_resize: Option<Size>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>, max_events_per_frame: usize) -> Self {
        Self {
            receiver,
            max_events_per_frame: max_events_per_frame.max(1),
            pending_resize: None,
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Keyboard batches are applied to `keyboard` immediately. Only the
    /// last resize of the frame is kept.
    pub(crate) fn collect_frame(&mut self, keyboard: &mut KeyboardState) -> TickControl {
        let mut drained = 0;

        while drained < self.max_events_per_frame {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event, keyboard) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "host", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.max_events_per_frame {
            warn!(target: "host", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Takes the most recent resize seen by `collect_frame`.
    pub(crate) fn take_resize(&mut self) -> Option<Size> {
        self.pending_resize.take()
    }

    fn handle_event(&mut self, event: PlatformEvent, keyboard: &mut KeyboardState) -> TickControl {
        match event {
            PlatformEvent::Inputs(batch) => {
                keyboard.process_events(&batch);
                TickControl::Continue
            }
            PlatformEvent::Resized(size) => {
                self.pending_resize = Some(size);
                TickControl::Continue
            }
            PlatformEvent::FocusLost => {
                keyboard.release_all();
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
