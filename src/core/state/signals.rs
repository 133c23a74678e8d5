//=========================================================================
// State Signals
//=========================================================================
//
// One-way channel from a game state to the host.
//
// The host subscribes after `load_content` and keeps the receiver;
// dropping it (or `unsubscribe`) is the teardown. A state that signals
// without a subscriber is simply not heard.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use super::GameState;
use crate::core::event::GameEvent;

//=== StateSignal =========================================================

/// Message from the active state to the host.
pub enum StateSignal {
    /// Replace the active state with this one after the current frame.
    SwitchState(Box<dyn GameState>),

    /// An event raised through `notify_event`.
    Event(GameEvent),
}

impl fmt::Debug for StateSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchState(next) => f.debug_tuple("SwitchState").field(&next.kind()).finish(),
            Self::Event(event) => f.debug_tuple("Event").field(event).finish(),
        }
    }
}

//=== StateSignals ========================================================

/// Sending half held by the state core.
#[derive(Debug, Default)]
pub struct StateSignals {
    sender: Option<Sender<StateSignal>>,
}

impl StateSignals {
    /// Opens a fresh channel, replacing any previous subscription.
    pub(crate) fn subscribe(&mut self) -> Receiver<StateSignal> {
        let (sender, receiver) = unbounded();
        self.sender = Some(sender);
        receiver
    }

    pub(crate) fn unsubscribe(&mut self) {
        self.sender = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.sender.is_some()
    }

    /// Delivers `signal` to the host. Returns `false` when nobody listens.
    pub(crate) fn send(&self, signal: StateSignal) -> bool {
        match &self.sender {
            Some(sender) => sender.send(signal).is_ok(),
            None => {
                trace!(target: "state", "Dropped {:?}: no subscriber", signal);
                false
            }
        }
    }
}
