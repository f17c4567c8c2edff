//! Lines and rectangles
//!
//! The cluster has no line or rectangle command of its own. Both are drawn
//! by clearing a small area with the clear opcode, which also moves the
//! device workspace, so every shape ends with a frame that puts the
//! workspace back. Positions are relative to the workspace origin.

use tlbfis_hal::Transport;
use tlbfis_protocol::command::{write_clear, write_thin_line};
use tlbfis_protocol::{ClearMode, FrameKind, Orientation, Rect};

use crate::encoder::Encoder;
use crate::error::{DrawError, FirstError};

/// Outline or solid rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RectFill {
    /// One pixel border
    #[default]
    Outline,
    Filled,
}

impl<T: Transport> Encoder<T> {
    /// Draw a 1 px wide line in the draw color
    pub fn draw_line(
        &mut self,
        x: u8,
        y: u8,
        length: u8,
        orientation: Orientation,
    ) -> Result<(), DrawError> {
        let (width, height) = match orientation {
            Orientation::Horizontal => (length, 1),
            Orientation::Vertical => (1, length),
        };
        let mut errors = FirstError::default();
        errors.record(self.fill_area(x, y, width, height, true));
        errors.record(self.restore_workspace());
        errors.finish()
    }

    /// Draw a thin line on high-resolution clusters
    ///
    /// Coordinates are sent as given. The color is fixed by the cluster.
    pub fn draw_thin_line(
        &mut self,
        x: u8,
        y: u8,
        length: u8,
        orientation: Orientation,
    ) -> Result<(), DrawError> {
        write_thin_line(&mut self.clear_buf, orientation, x, y, length);
        self.send(FrameKind::Clear)
    }

    /// Draw a rectangle in the draw color
    ///
    /// An outline needs at least 2 px in each direction; smaller outlines
    /// are rejected before anything is sent.
    pub fn draw_rect(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        fill: RectFill,
    ) -> Result<(), DrawError> {
        if fill == RectFill::Outline && (width < 2 || height < 2) {
            return Err(DrawError::RectangleTooSmall { width, height });
        }
        let mut errors = FirstError::default();
        errors.record(self.fill_area(x, y, width, height, true));
        if fill == RectFill::Outline {
            errors.record(self.fill_area(
                x.wrapping_add(1),
                y.wrapping_add(1),
                width - 2,
                height - 2,
                false,
            ));
        }
        errors.record(self.restore_workspace());
        errors.finish()
    }

    /// Clear an area relative to the workspace origin
    ///
    /// The frame color bit is inverted relative to the draw color for the
    /// visible shape and equal to it for the inside of an outline.
    fn fill_area(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        visible: bool,
    ) -> Result<(), DrawError> {
        let color = if visible {
            self.state.draw_color.inverse()
        } else {
            self.state.draw_color
        };
        let rect = Rect::new(
            self.workspace.x().wrapping_add(x),
            self.workspace.y().wrapping_add(y),
            width,
            height,
        );
        write_clear(&mut self.clear_buf, ClearMode::Clear(color), rect);
        self.send(FrameKind::Clear)
    }

    fn restore_workspace(&mut self) -> Result<(), DrawError> {
        write_clear(
            &mut self.clear_buf,
            ClearMode::WorkspaceOnly,
            self.workspace.rect(),
        );
        self.send(FrameKind::Clear)
    }
}
