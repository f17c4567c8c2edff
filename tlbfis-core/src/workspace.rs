//! Screen modes and workspace geometry
//!
//! The cluster addresses a 64 x 88 px panel. In half-screen mode only the
//! 48 rows starting at row 27 are used, and callers address them as rows
//! 0-47:
//!
//! ```text
//!   0 ┌──────────────┐
//!     │  (cluster)   │
//!  27 ├──────────────┤ ◄── half-screen row 0
//!     │              │
//!     │  48 rows     │
//!  75 ├──────────────┤
//!     │  (cluster)   │
//!  88 └──────────────┘
//! ```
//!
//! The workspace is the rectangle every drawing operation is clipped to
//! and positioned from.

use tlbfis_protocol::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const SCREEN_WIDTH: u8 = 64;
pub const HALF_SCREEN_HEIGHT: u8 = 48;
pub const FULL_SCREEN_HEIGHT: u8 = 88;

/// First panel row of the half-screen area
pub const HALF_SCREEN_OFFSET: u8 = 27;

/// Area of the panel claimed from the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScreenMode {
    /// 64 x 48, between the cluster's own top and bottom rows
    #[default]
    Half,
    /// Whole 64 x 88 panel
    Full,
}

impl ScreenMode {
    pub const fn width(self) -> u8 {
        SCREEN_WIDTH
    }

    pub const fn height(self) -> u8 {
        match self {
            ScreenMode::Half => HALF_SCREEN_HEIGHT,
            ScreenMode::Full => FULL_SCREEN_HEIGHT,
        }
    }

    /// Added to every workspace row before it goes on the bus
    pub const fn y_offset(self) -> u8 {
        match self {
            ScreenMode::Half => HALF_SCREEN_OFFSET,
            ScreenMode::Full => 0,
        }
    }

    /// The whole usable area, in panel coordinates
    pub const fn full_rect(self) -> Rect {
        Rect::new(0, self.y_offset(), self.width(), self.height())
    }
}

/// Fit a requested workspace into the screen
///
/// `x` and `y` wrap around the screen size; width and height are cut at the
/// right and bottom edges. The result is in panel coordinates, so half-screen
/// rows are shifted down by [`HALF_SCREEN_OFFSET`].
pub fn constrain(mode: ScreenMode, requested: Rect) -> Rect {
    let screen_width = mode.width();
    let screen_height = mode.height();

    let x = requested.x % screen_width;
    let y = requested.y % screen_height;
    let width = if u16::from(x) + u16::from(requested.width) > u16::from(screen_width) {
        screen_width - x
    } else {
        requested.width
    };
    let height = if u16::from(y) + u16::from(requested.height) > u16::from(screen_height) {
        screen_height - y
    } else {
        requested.height
    };

    Rect::new(x, y + mode.y_offset(), width, height)
}

/// Active workspace of one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Workspace {
    mode: ScreenMode,
    rect: Rect,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::full(ScreenMode::default())
    }
}

impl Workspace {
    /// Workspace covering the whole area of `mode`
    pub const fn full(mode: ScreenMode) -> Self {
        Self {
            mode,
            rect: mode.full_rect(),
        }
    }

    /// Move the workspace, returning the rectangle actually applied
    pub fn set(&mut self, requested: Rect) -> Rect {
        self.rect = constrain(self.mode, requested);
        self.rect
    }

    /// Back to the whole screen area
    pub fn reset(&mut self) -> Rect {
        self.rect = self.mode.full_rect();
        self.rect
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// Current rectangle in panel coordinates
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> u8 {
        self.rect.x
    }

    pub fn y(&self) -> u8 {
        self.rect.y
    }

    pub fn width(&self) -> u8 {
        self.rect.width
    }

    pub fn height(&self) -> u8 {
        self.rect.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_rects() {
        assert_eq!(ScreenMode::Full.full_rect(), Rect::new(0, 0, 64, 88));
        assert_eq!(ScreenMode::Half.full_rect(), Rect::new(0, 27, 64, 48));
    }

    #[test]
    fn test_half_screen_offset_and_clip() {
        // 50 wraps to row 2 of the half screen, 10 rows still fit
        let rect = constrain(ScreenMode::Half, Rect::new(0, 50, 64, 10));
        assert_eq!(rect, Rect::new(0, 29, 64, 10));
    }

    #[test]
    fn test_width_cut_at_right_edge() {
        let rect = constrain(ScreenMode::Full, Rect::new(60, 0, 10, 5));
        assert_eq!(rect, Rect::new(60, 0, 4, 5));

        let rect = constrain(ScreenMode::Full, Rect::new(70, 80, 255, 255));
        assert_eq!(rect, Rect::new(6, 80, 58, 8));
    }

    #[test]
    fn test_zero_size_kept() {
        let rect = constrain(ScreenMode::Full, Rect::new(10, 10, 0, 0));
        assert_eq!(rect, Rect::new(10, 10, 0, 0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ws = Workspace::full(ScreenMode::Half);
        ws.set(Rect::new(5, 5, 10, 10));
        let once = ws.reset();
        let twice = ws.reset();

        assert_eq!(once, twice);
        assert_eq!(ws, Workspace::full(ScreenMode::Half));
    }

    fn any_mode() -> impl Strategy<Value = ScreenMode> {
        prop_oneof![Just(ScreenMode::Half), Just(ScreenMode::Full)]
    }

    proptest! {
        #[test]
        fn prop_workspace_stays_on_screen(
            mode in any_mode(),
            x in any::<u8>(),
            y in any::<u8>(),
            w in any::<u8>(),
            h in any::<u8>(),
        ) {
            let rect = constrain(mode, Rect::new(x, y, w, h));
            let y_rel = rect.y - mode.y_offset();

            prop_assert!(rect.x < SCREEN_WIDTH);
            prop_assert!(u16::from(rect.x) + u16::from(rect.width) <= u16::from(SCREEN_WIDTH));
            prop_assert!(y_rel < mode.height());
            prop_assert!(u16::from(y_rel) + u16::from(rect.height) <= u16::from(mode.height()));
            if mode == ScreenMode::Half {
                prop_assert_eq!(rect.y, y % HALF_SCREEN_HEIGHT + HALF_SCREEN_OFFSET);
            }
        }
    }
}
