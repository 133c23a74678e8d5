//=========================================================================
// Frame Time
//=========================================================================

use std::time::Duration;

/// Timing snapshot handed to a game state each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time elapsed since the previous frame.
    pub delta: Duration,

    /// Time accumulated since the host started running frames.
    pub total: Duration,
}

impl FrameTime {
    pub fn new(delta: Duration, total: Duration) -> Self {
        Self { delta, total }
    }

    /// Frame delta in seconds, for simulation math.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Accumulates frame deltas into [`FrameTime`] values.
#[derive(Debug, Default)]
pub(crate) struct FrameClock {
    total: Duration,
}

impl FrameClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn advance(&mut self, delta: Duration) -> FrameTime {
        self.total += delta;
        FrameTime::new(delta, self.total)
    }
}
