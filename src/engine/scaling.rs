//=========================================================================
// Scale Region
//=========================================================================
//
// Where the design-resolution frame lands inside the real window.
//
// ```text
//   window wider than design          window taller than design
//   ┌──┬──────────┬──┐                ┌──────────────┐
//   │  │          │  │                ├──────────────┤
//   │  │  frame   │  │                │    frame     │
//   │  │          │  │                ├──────────────┤
//   └──┴──────────┴──┘                └──────────────┘
//   pillarbox bars (x)                letterbox bars (y)
// ```
//
//=========================================================================

use crate::core::geometry::{Rect, Size};

/// Largest aspect-preserving rectangle for a frame of `design_aspect`
/// centered in `window`.
///
/// Extents are rounded half-up; bars split the remainder with integer
/// division, so an odd remainder leaves the extra pixel at the bottom or
/// right. A window with a zero dimension yields [`Rect::EMPTY`].
pub fn compute_scale_region(window: Size, design_aspect: f64) -> Rect {
    if window.is_empty() || !design_aspect.is_finite() || design_aspect <= 0.0 {
        return Rect::EMPTY;
    }

    let width = window.width as f64;
    let height = window.height as f64;

    if width / height <= design_aspect {
        let present_height = round_half_up(width / design_aspect).min(window.height);
        let bar = (window.height - present_height) / 2;
        Rect::new(0, bar as i32, window.width, present_height)
    } else {
        let present_width = round_half_up(height * design_aspect).min(window.width);
        let bar = (window.width - present_width) / 2;
        Rect::new(bar as i32, 0, present_width, window.height)
    }
}

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

//=========================================================================
// Unit Tests
//=========================================================================
