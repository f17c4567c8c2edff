//! Bitmap chunking
//!
//! A bitmap is packed row-major, MSB first, each row padded to whole
//! bytes. The cluster takes it in blocks of whole rows. Every block row is
//! `bytes_per_row` wide, enough to reach the right edge of the workspace
//! from the start column:
//!
//! ```text
//!  source row  │██████████████│  source_row_bytes
//!  block row   │███████████░░░│  bytes_per_row (zero padded)
//!  block row   │████████│        bytes_per_row (cropped)
//! ```
//!
//! As many rows as fit in the 37-byte payload go into one block.

use tlbfis_hal::Transport;
use tlbfis_protocol::command::{write_header, OP_BITMAP};
use tlbfis_protocol::FrameKind;

use crate::diagnostics::Warning;
use crate::encoder::Encoder;
use crate::error::{DrawError, FirstError};
use crate::source::Source;

/// Widest row the cluster can take (64 px)
const MAX_ROW_BYTES: usize = 8;

/// Block layout of one bitmap draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitmapPlan {
    /// Start column, wrapped into the workspace
    pub x: u8,
    /// Start row
    pub y: u8,
    /// Rows to send, clamped to the workspace
    pub height: u8,
    /// Bytes per row on the bus
    pub bytes_per_row: u8,
    /// Bytes per row in the source
    pub source_row_bytes: u8,
    pub lines_per_block: u8,
    pub block_count: u8,
    pub last_block_lines: u8,
}

/// One frame of a bitmap draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitmapBlock {
    pub index: u8,
    /// Row the block starts at
    pub row: u8,
    /// Bitmap rows in the block
    pub lines: u8,
    /// Offset of the block's first row in the source
    pub source_offset: usize,
}

impl BitmapPlan {
    /// Lay out a `width` x `height` bitmap at (`x`, `y`) in a workspace
    ///
    /// Returns `None` when nothing can be drawn: empty bitmap, zero-width
    /// workspace, or a start row at or below the workspace bottom.
    pub fn new(
        workspace_width: u8,
        workspace_height: u8,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
    ) -> Option<Self> {
        if width == 0 || height == 0 || workspace_width == 0 || y >= workspace_height {
            return None;
        }
        let height = height.min(workspace_height - y);
        let x = x % workspace_width;
        let bytes_per_row = (workspace_width - x).div_ceil(8);
        let lines_per_block = (FrameKind::Bitmap.payload_budget() / bytes_per_row as usize) as u8;
        if lines_per_block == 0 {
            return None;
        }
        let block_count = height.div_ceil(lines_per_block);
        let last_block_lines = height - (block_count - 1) * lines_per_block;

        Some(Self {
            x,
            y,
            height,
            bytes_per_row,
            source_row_bytes: width.div_ceil(8),
            lines_per_block,
            block_count,
            last_block_lines,
        })
    }

    /// Source bytes copied per row; the rest of the row is zero
    pub fn copied_row_bytes(&self) -> u8 {
        self.bytes_per_row.min(self.source_row_bytes)
    }

    /// Source bytes the plan reads
    pub fn source_len(&self) -> usize {
        usize::from(self.height) * usize::from(self.source_row_bytes)
    }

    /// LENGTH byte of a block with `lines` rows
    pub fn declared_length(&self, lines: u8) -> u8 {
        lines * self.bytes_per_row + 3
    }

    /// The blocks in send order
    pub fn blocks(&self) -> impl Iterator<Item = BitmapBlock> {
        let plan = *self;
        (0..plan.block_count).map(move |index| {
            let lines = if index + 1 == plan.block_count {
                plan.last_block_lines
            } else {
                plan.lines_per_block
            };
            BitmapBlock {
                index,
                row: plan.y.wrapping_add(index.wrapping_mul(plan.lines_per_block)),
                lines,
                source_offset: usize::from(index)
                    * usize::from(plan.lines_per_block)
                    * usize::from(plan.source_row_bytes),
            }
        })
    }

    /// Row cursor after the last block
    ///
    /// The cursor moves a full block each time, so when the last block is
    /// short this is past the bitmap's bottom row.
    pub fn end_row(&self) -> u8 {
        self.y
            .wrapping_add(self.block_count.wrapping_mul(self.lines_per_block))
    }
}

impl<T: Transport> Encoder<T> {
    /// Draw a bitmap with its top-left corner at (`x`, `y`)
    ///
    /// `width` and `height` are in pixels. The bitmap is cut at the bottom
    /// of the workspace and at its right edge; source bytes past the end of
    /// `bitmap` are drawn as zero. All blocks are sent even if one fails.
    pub fn draw_bitmap<'s>(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        bitmap: impl Into<Source<'s>>,
    ) -> Result<(), DrawError> {
        let mut source = bitmap.into();
        if width == 0 || height == 0 {
            return Ok(());
        }
        let Some(plan) = BitmapPlan::new(
            self.workspace.width(),
            self.workspace.height(),
            x,
            y,
            width,
            height,
        ) else {
            self.diagnostics.record(Warning::BitmapSkipped { x, y });
            return Ok(());
        };

        if plan.height < height {
            self.diagnostics.record(Warning::BitmapHeightClamped {
                requested: height,
                applied: plan.height,
            });
        }
        if plan.source_row_bytes > plan.bytes_per_row {
            self.diagnostics.record(Warning::BitmapRowsCropped {
                row_bytes: usize::from(plan.source_row_bytes),
                kept: usize::from(plan.bytes_per_row),
            });
        }
        let available = source.available();
        if available < plan.source_len() {
            self.diagnostics.record(Warning::BitmapSourceShort {
                expected: plan.source_len(),
                available,
            });
        }

        let copied = usize::from(plan.copied_row_bytes());
        let padding = usize::from(plan.bytes_per_row) - copied;
        let options = self.state.bitmap.options();
        let mut row = [0u8; MAX_ROW_BYTES];
        let mut errors = FirstError::default();

        for block in plan.blocks() {
            self.bitmap_buf.wipe();
            write_header(
                &mut self.bitmap_buf,
                OP_BITMAP,
                usize::from(block.lines) * usize::from(plan.bytes_per_row),
                options,
                plan.x,
                block.row,
            );
            let mut offset = block.source_offset;
            for _ in 0..block.lines {
                source.read(offset, &mut row[..copied]);
                self.bitmap_buf.extend(&row[..copied]);
                self.bitmap_buf.skip(padding);
                offset += usize::from(plan.source_row_bytes);
            }
            errors.record(self.send(FrameKind::Bitmap));
        }
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiagnosticMode, EncoderConfig};
    use crate::workspace::ScreenMode;
    use proptest::prelude::*;
    use tlbfis_hal::mock::MockTransport;
    use tlbfis_hal::SendStatus;
    use tlbfis_protocol::{Color, Command, Transparency};

    type Mock = MockTransport<32>;

    fn encoder(mode: ScreenMode) -> Encoder<Mock> {
        let config = EncoderConfig::default().with_diagnostics(DiagnosticMode::Report);
        let mut enc = Encoder::with_config(Mock::new(), config);
        enc.init_screen(mode, Color::Normal).unwrap();
        enc.transport_mut().clear();
        enc
    }

    #[test]
    fn test_plan_full_width() {
        let plan = BitmapPlan::new(64, 48, 0, 0, 64, 20).unwrap();

        assert_eq!(plan.bytes_per_row, 8);
        assert_eq!(plan.lines_per_block, 4);
        assert_eq!(plan.block_count, 5);
        assert_eq!(plan.last_block_lines, 4);
        assert_eq!(plan.end_row(), 20);
    }

    #[test]
    fn test_plan_short_last_block() {
        let plan = BitmapPlan::new(64, 48, 0, 2, 16, 10).unwrap();
        let blocks: Vec<_> = plan.blocks().collect();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].lines, 2);
        assert_eq!(blocks[2].row, 10);
        assert_eq!(blocks[2].source_offset, 16);
        // Cursor runs a full block past the last row
        assert_eq!(plan.end_row(), 14);
    }

    #[test]
    fn test_plan_edges() {
        assert_eq!(BitmapPlan::new(64, 48, 0, 48, 8, 8), None);
        assert_eq!(BitmapPlan::new(0, 48, 0, 0, 8, 8), None);
        assert_eq!(BitmapPlan::new(64, 48, 0, 0, 0, 8), None);

        // x wraps, narrow rows fit more lines per block
        let plan = BitmapPlan::new(64, 48, 70, 40, 8, 20).unwrap();
        assert_eq!(plan.x, 6);
        assert_eq!(plan.height, 8);
        assert_eq!(plan.bytes_per_row, 8);

        let plan = BitmapPlan::new(64, 48, 60, 0, 8, 8).unwrap();
        assert_eq!(plan.bytes_per_row, 1);
        assert_eq!(plan.lines_per_block, 37);
        assert_eq!(plan.block_count, 1);
    }

    #[test]
    fn test_draw_full_width_bitmap() {
        let mut enc = encoder(ScreenMode::Half);
        let bitmap: [u8; 160] = core::array::from_fn(|i| i as u8);
        enc.draw_bitmap(0, 0, 64, 20, &bitmap).unwrap();

        let t = enc.transport();
        assert_eq!(t.frames().len(), 5);
        let frame = t.frame(1).unwrap();
        assert_eq!(&frame[..5], &[0x55, 35, 0x02, 0, 4]);
        assert_eq!(&frame[5..], &bitmap[32..64]);
        assert!(enc.diagnostics().is_empty());
    }

    #[test]
    fn test_narrow_bitmap_is_padded() {
        let mut enc = encoder(ScreenMode::Half);
        enc.set_workspace(0, 0, 32, 16, false, Color::Normal).unwrap();
        enc.transport_mut().clear();
        enc.set_bitmap_transparency(Transparency::Transparent);
        enc.draw_bitmap(8, 1, 9, 2, &[0xAAu8, 0x80, 0x55, 0x00]).unwrap();

        // 24 px to the right edge: 3 bytes per row, 2 copied, 1 padding
        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(frame, &[0x55, 9, 0x03, 8, 1, 0xAA, 0x80, 0, 0x55, 0x00, 0]);
    }

    #[test]
    fn test_wide_bitmap_is_cropped() {
        let mut enc = encoder(ScreenMode::Half);
        let bitmap: [u8; 6] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
        enc.draw_bitmap(48, 0, 24, 2, &bitmap).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(frame, &[0x55, 7, 0x02, 48, 0, 0x11, 0x22, 0x44, 0x55]);
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::BitmapRowsCropped { row_bytes: 3, kept: 2 })
        );
    }

    #[test]
    fn test_short_source_reads_zero() {
        let mut enc = encoder(ScreenMode::Half);
        enc.draw_bitmap(56, 0, 8, 3, &[0xFFu8]).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(&frame[5..], &[0xFF, 0, 0]);
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::BitmapSourceShort { expected: 3, available: 1 })
        );
    }

    #[test]
    fn test_source_ending_rows_early() {
        let mut enc = encoder(ScreenMode::Half);
        enc.draw_bitmap(0, 0, 16, 4, &[0x11u8, 0x22, 0x33]).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(frame[1], 3 + 8);
        assert_eq!(&frame[5..], &[0x11, 0x22, 0x33, 0, 0, 0, 0, 0]);
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::BitmapSourceShort { expected: 8, available: 3 })
        );
    }

    #[test]
    fn test_height_clamped_and_skipped() {
        let mut enc = encoder(ScreenMode::Half);
        enc.draw_bitmap(56, 46, 8, 10, &[0xFFu8; 10]).unwrap();
        assert_eq!(enc.transport().frame(0).unwrap()[1], 5);
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::BitmapHeightClamped { requested: 10, applied: 2 })
        );

        enc.draw_bitmap(0, 48, 8, 1, &[0xFFu8]).unwrap();
        assert_eq!(enc.transport().frames().len(), 1);
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::BitmapSkipped { x: 0, y: 48 })
        );
    }

    #[test]
    fn test_bitmap_from_asset_store() {
        let table: &[u8] = &[0, 0, 0xF0, 0x0F];
        let mut store = table;
        let mut enc = encoder(ScreenMode::Full);
        enc.draw_bitmap(56, 0, 8, 2, Source::asset(&mut store, 2, 2))
            .unwrap();

        assert_eq!(&enc.transport().frame(0).unwrap()[5..], &[0xF0, 0x0F]);
    }

    #[test]
    fn test_failed_block_still_sends_rest() {
        let mut enc = encoder(ScreenMode::Half);
        enc.transport_mut().script(&[SendStatus::Fail]);

        assert_eq!(
            enc.draw_bitmap(0, 0, 64, 8, &[0u8; 64]),
            Err(DrawError::TransportFailed { opcode: 0x55 })
        );
        assert_eq!(enc.transport().frames().len(), 2);
    }

    #[test]
    fn test_blocks_decode() {
        let mut enc = encoder(ScreenMode::Half);
        enc.draw_bitmap(0, 0, 16, 5, &[0x5Au8; 10]).unwrap();

        match Command::parse(enc.transport().frame(0).unwrap()).unwrap() {
            Command::Bitmap { x, y, data, .. } => {
                assert_eq!((x, y), (0, 0));
                assert_eq!(data.len(), 32);
                assert_eq!(&data[..3], &[0x5A, 0x5A, 0]);
            }
            other => panic!("not a bitmap frame: {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_blocks_cover_height(
            ws_width in 1u8..=64,
            ws_height in 1u8..=88,
            x in any::<u8>(),
            y in 0u8..88,
            width in 1u8..=128,
            height in 1u8..=200,
        ) {
            prop_assume!(y < ws_height);
            let plan = BitmapPlan::new(ws_width, ws_height, x, y, width, height).unwrap();

            let total: usize = plan.blocks().map(|b| usize::from(b.lines)).sum();
            prop_assert_eq!(total, usize::from(plan.height));
            prop_assert!(plan.last_block_lines >= 1);
            prop_assert!(plan.last_block_lines <= plan.lines_per_block);
            prop_assert_eq!(
                plan.last_block_lines,
                plan.height - (plan.block_count - 1) * plan.lines_per_block
            );
            for block in plan.blocks() {
                let length = plan.declared_length(block.lines);
                prop_assert_eq!(
                    usize::from(length),
                    usize::from(block.lines) * usize::from(plan.bytes_per_row) + 3
                );
                prop_assert!(usize::from(length) + 2 <= FrameKind::Bitmap.capacity());
            }
        }
    }
}
