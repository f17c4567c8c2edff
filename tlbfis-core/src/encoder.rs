//! Frame encoder
//!
//! One [`Encoder`] drives one cluster connection. It owns the workspace,
//! the drawing state and four reusable frame buffers, and hands finished
//! frames to its [`Transport`]. Every operation is synchronous: the frames
//! it produces are on the bus when it returns.

use tlbfis_hal::{ErrorHandler, SendStatus, Transport};
use tlbfis_protocol::command::write_clear;
use tlbfis_protocol::{
    Alignment, BitmapBuffer, Charset, ClearBuffer, ClearMode, Color, Font, FrameKind,
    RadioBuffer, Rect, TextBuffer, Transparency,
};

use crate::config::{EncoderConfig, FailPolicy};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::DrawError;
use crate::state::DrawState;
use crate::workspace::{ScreenMode, Workspace};

/// Encoder for one cluster display
pub struct Encoder<T: Transport> {
    pub(crate) transport: T,
    pub(crate) charset: Charset,
    pub(crate) config: EncoderConfig,
    pub(crate) workspace: Workspace,
    pub(crate) state: DrawState,
    pub(crate) clear_buf: ClearBuffer,
    pub(crate) text_buf: TextBuffer,
    pub(crate) radio_buf: RadioBuffer,
    pub(crate) bitmap_buf: BitmapBuffer,
    pub(crate) diagnostics: Diagnostics,
}

impl<T: Transport> Encoder<T> {
    /// Create an encoder with the default character set and configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EncoderConfig::default())
    }

    pub fn with_config(transport: T, config: EncoderConfig) -> Self {
        Self {
            transport,
            charset: Charset::DEFAULT,
            config,
            workspace: Workspace::default(),
            state: DrawState::with_line_spacing(config.line_spacing),
            clear_buf: ClearBuffer::new(),
            text_buf: TextBuffer::new(),
            radio_buf: RadioBuffer::new(),
            bitmap_buf: BitmapBuffer::new(),
            diagnostics: Diagnostics::new(config.diagnostics),
        }
    }

    /// Use a different character map and compact width table
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    pub fn config(&self) -> EncoderConfig {
        self.config
    }

    /// Apply a new configuration
    ///
    /// The line spacing is taken over into the drawing state; recorded
    /// warnings are kept.
    pub fn set_config(&mut self, config: EncoderConfig) {
        self.config = config;
        self.state.line_spacing = config.line_spacing;
        self.diagnostics.set_mode(config.diagnostics);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    // --- Lifecycle ---

    pub fn begin(&mut self) {
        self.transport.begin();
    }

    pub fn end(&mut self) {
        self.transport.end();
    }

    /// Keep the bus alive; call frequently while idle
    pub fn update(&mut self) {
        self.transport.update();
    }

    /// Give the screen back to the cluster
    ///
    /// [`Encoder::init_screen`] must be called before drawing again.
    pub fn turn_off(&mut self) {
        self.transport.turn_off();
    }

    pub fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.transport.set_error_handler(handler);
    }

    // --- Screen and workspace ---

    /// Claim the screen area for `mode` and fill it with `color`
    ///
    /// The workspace becomes the whole area.
    pub fn init_screen(&mut self, mode: ScreenMode, color: Color) -> Result<(), DrawError> {
        self.workspace = Workspace::full(mode);
        debug!("tlbfis: claim {:?} screen", mode);
        write_clear(&mut self.clear_buf, ClearMode::Claim(color), self.workspace.rect());
        self.send(FrameKind::Clear)
    }

    /// Move the workspace, optionally clearing it in the same frame
    ///
    /// Coordinates wrap around the screen size and the size is cut at the
    /// screen edges. In half-screen mode row 0 is the first half-screen row.
    pub fn set_workspace(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        clear: bool,
        color: Color,
    ) -> Result<(), DrawError> {
        let requested = Rect::new(x, y, width, height);
        let applied = self.workspace.set(requested);
        let shown = Rect::new(
            requested.x,
            requested.y.wrapping_add(self.workspace.mode().y_offset()),
            requested.width,
            requested.height,
        );
        if applied != shown {
            self.diagnostics
                .record(Warning::WorkspaceClamped { requested, applied });
        }
        debug!("tlbfis: workspace {:?}", applied);
        self.send_workspace(clear, color)
    }

    /// Workspace back to the whole screen area
    pub fn reset_workspace(&mut self, clear: bool, color: Color) -> Result<(), DrawError> {
        self.workspace.reset();
        self.send_workspace(clear, color)
    }

    /// Fill the workspace with `color`
    pub fn clear(&mut self, color: Color) -> Result<(), DrawError> {
        write_clear(&mut self.clear_buf, ClearMode::Clear(color), self.workspace.rect());
        self.send(FrameKind::Clear)
    }

    fn send_workspace(&mut self, clear: bool, color: Color) -> Result<(), DrawError> {
        let mode = if clear {
            ClearMode::Clear(color)
        } else {
            ClearMode::WorkspaceOnly
        };
        write_clear(&mut self.clear_buf, mode, self.workspace.rect());
        self.send(FrameKind::Clear)
    }

    pub fn screen_mode(&self) -> ScreenMode {
        self.workspace.mode()
    }

    /// Current workspace in panel coordinates
    pub fn workspace(&self) -> Rect {
        self.workspace.rect()
    }

    pub fn workspace_width(&self) -> u8 {
        self.workspace.width()
    }

    pub fn workspace_height(&self) -> u8 {
        self.workspace.height()
    }

    // --- Drawing state ---

    pub fn draw_state(&self) -> &DrawState {
        &self.state
    }

    /// Color for text, bitmaps, lines and rectangles
    pub fn set_draw_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.set_font(font);
    }

    pub fn set_text_transparency(&mut self, transparency: Transparency) {
        self.state.set_text_transparency(transparency);
    }

    pub fn set_text_alignment(&mut self, alignment: Alignment) {
        self.state.set_text_alignment(alignment);
    }

    /// Extra pixels between lines of multi-line text
    pub fn set_line_spacing(&mut self, spacing: u8) {
        self.state.line_spacing = spacing;
    }

    pub fn set_bitmap_transparency(&mut self, transparency: Transparency) {
        self.state.set_bitmap_transparency(transparency);
    }

    // --- Sending ---

    /// Put the frame held by one of the buffers on the bus
    pub(crate) fn send(&mut self, kind: FrameKind) -> Result<(), DrawError> {
        let frame = match kind {
            FrameKind::Clear => self.clear_buf.frame(),
            FrameKind::Text => self.text_buf.frame(),
            FrameKind::Radio => self.radio_buf.frame(),
            FrameKind::Bitmap => self.bitmap_buf.frame(),
        };
        transmit(
            &mut self.transport,
            self.config.fail_policy,
            &mut self.diagnostics,
            frame,
        )
    }
}

/// Offer `frame` until the transport resolves it
///
/// `Repeat` always resends. `Fail` resends only under
/// [`FailPolicy::Resend`], otherwise it is reported.
fn transmit<T: Transport>(
    transport: &mut T,
    policy: FailPolicy,
    diagnostics: &mut Diagnostics,
    frame: &[u8],
) -> Result<(), DrawError> {
    let opcode = frame.first().copied().unwrap_or_default();
    loop {
        match transport.send(frame) {
            SendStatus::Success => {
                trace!("tlbfis: tx {=[u8]:x}", frame);
                return Ok(());
            }
            SendStatus::Repeat => {}
            SendStatus::Fail => {
                warn!("tlbfis: frame {=u8:#x} failed", opcode);
                diagnostics.record(Warning::TransportFailed { opcode });
                if policy == FailPolicy::Report {
                    return Err(DrawError::TransportFailed { opcode });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticMode;
    use tlbfis_hal::mock::MockTransport;
    use tlbfis_protocol::Command;

    type Mock = MockTransport<32>;

    fn encoder() -> Encoder<Mock> {
        Encoder::new(Mock::new())
    }

    #[test]
    fn test_init_half_screen() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Half, Color::Normal).unwrap();

        assert_eq!(enc.transport().frame(0), Some(&[0x53, 0x05, 0x82, 0, 27, 64, 48][..]));
        assert_eq!(enc.workspace(), Rect::new(0, 27, 64, 48));
    }

    #[test]
    fn test_init_full_screen_inverted() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Full, Color::Inverted).unwrap();

        assert_eq!(enc.transport().frame(0), Some(&[0x53, 0x05, 0x83, 0, 0, 64, 88][..]));
        assert_eq!(enc.screen_mode(), ScreenMode::Full);
        assert_eq!(enc.workspace_height(), 88);
    }

    #[test]
    fn test_set_workspace_half_screen_wraps() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Half, Color::Normal).unwrap();
        enc.set_workspace(0, 50, 64, 10, false, Color::Normal).unwrap();

        assert_eq!(enc.workspace(), Rect::new(0, 29, 64, 10));
        assert_eq!(enc.transport().frame(1), Some(&[0x53, 0x05, 0x00, 0, 29, 64, 10][..]));
    }

    #[test]
    fn test_set_workspace_with_clear_is_one_frame() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Full, Color::Normal).unwrap();
        enc.set_workspace(8, 8, 16, 16, true, Color::Inverted).unwrap();

        assert_eq!(enc.transport().frames().len(), 2);
        assert_eq!(enc.transport().frame(1), Some(&[0x53, 0x05, 0x03, 8, 8, 16, 16][..]));
    }

    #[test]
    fn test_reset_and_clear() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Half, Color::Normal).unwrap();
        enc.set_workspace(10, 10, 20, 20, false, Color::Normal).unwrap();
        enc.reset_workspace(false, Color::Normal).unwrap();
        enc.reset_workspace(false, Color::Normal).unwrap();
        enc.clear(Color::Inverted).unwrap();

        let t = enc.transport();
        assert_eq!(t.frame(2), t.frame(3));
        assert_eq!(t.frame(3), Some(&[0x53, 0x05, 0x00, 0, 27, 64, 48][..]));
        assert_eq!(t.frame(4), Some(&[0x53, 0x05, 0x03, 0, 27, 64, 48][..]));
    }

    #[test]
    fn test_workspace_clamp_reported() {
        let config = EncoderConfig::default().with_diagnostics(DiagnosticMode::Report);
        let mut enc = Encoder::with_config(Mock::new(), config);
        enc.init_screen(ScreenMode::Full, Color::Normal).unwrap();
        enc.set_workspace(0, 0, 64, 88, false, Color::Normal).unwrap();
        assert!(enc.diagnostics().is_empty());

        enc.set_workspace(60, 0, 10, 10, false, Color::Normal).unwrap();
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::WorkspaceClamped {
                requested: Rect::new(60, 0, 10, 10),
                applied: Rect::new(60, 0, 4, 10),
            })
        );
    }

    #[test]
    fn test_repeat_resends_same_frame() {
        let mut enc = encoder();
        enc.transport_mut()
            .script(&[SendStatus::Repeat, SendStatus::Repeat]);
        enc.clear(Color::Normal).unwrap();

        assert_eq!(enc.transport().attempts(), 3);
        assert_eq!(enc.transport().frames().len(), 1);
    }

    #[test]
    fn test_fail_is_reported() {
        let config = EncoderConfig::default().with_diagnostics(DiagnosticMode::Report);
        let mut enc = Encoder::with_config(Mock::new(), config);
        enc.transport_mut().script(&[SendStatus::Fail]);

        assert_eq!(
            enc.clear(Color::Normal),
            Err(DrawError::TransportFailed { opcode: 0x53 })
        );
        assert_eq!(enc.transport().attempts(), 1);
        assert_eq!(
            enc.diagnostics().iter().next(),
            Some(&Warning::TransportFailed { opcode: 0x53 })
        );
    }

    #[test]
    fn test_mock_records_largest_frame() {
        assert_eq!(
            tlbfis_hal::mock::MAX_FRAME_LEN,
            tlbfis_protocol::frame::MAX_FRAME_LEN
        );

        let mut enc = encoder();
        enc.init_screen(ScreenMode::Half, Color::Normal).unwrap();
        enc.write_text(0, 0, [b'A'; 40].as_slice()).unwrap();
        assert_eq!(
            enc.transport().frame(1).map(<[u8]>::len),
            Some(tlbfis_protocol::frame::MAX_FRAME_LEN)
        );
    }

    #[test]
    fn test_fail_resend_policy() {
        let config = EncoderConfig::default().with_fail_policy(FailPolicy::Resend);
        let mut enc = Encoder::with_config(Mock::new(), config);
        enc.transport_mut()
            .script(&[SendStatus::Fail, SendStatus::Repeat, SendStatus::Fail]);

        assert_eq!(enc.clear(Color::Normal), Ok(()));
        assert_eq!(enc.transport().attempts(), 4);
    }

    #[test]
    fn test_lifecycle_forwarding() {
        fn on_error(_elapsed_ms: u32) {}

        let mut enc = encoder();
        enc.begin();
        enc.update();
        enc.update();
        enc.set_error_handler(on_error);
        assert!(enc.transport().is_begun());
        assert_eq!(enc.transport().updates(), 2);
        assert!(enc.transport().error_handler().is_some());

        enc.turn_off();
        assert!(enc.transport().is_turned_off());
        enc.end();
        assert!(!enc.release().is_begun());
    }

    #[test]
    fn test_set_config_updates_spacing() {
        let mut enc = encoder();
        enc.set_config(EncoderConfig::default().with_line_spacing(4));

        assert_eq!(enc.draw_state().line_spacing, 4);
        assert_eq!(enc.config().line_spacing, 4);
    }

    #[test]
    fn test_frames_decode() {
        let mut enc = encoder();
        enc.init_screen(ScreenMode::Half, Color::Normal).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(
            Command::parse(frame),
            Ok(Command::Clear {
                mode: ClearMode::Claim(Color::Normal),
                rect: Rect::new(0, 27, 64, 48),
            })
        );
    }
}
