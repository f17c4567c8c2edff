//! Radio-mode text
//!
//! Besides the free-form screen, the cluster shows two 8-character lines
//! in its radio area. Both travel in one 19-byte frame:
//!
//! ```text
//! ┌──────┬──────┬──────┬────────────┬────────────┐
//! │ 0x81 │ 0x11 │ 0xF0 │ upper (8B) │ lower (8B) │
//! └──────┴──────┴──────┴────────────┴────────────┘
//! ```
//!
//! The encoder keeps the frame between calls, so writing one line sends
//! the other line's last text along with it.

use tlbfis_hal::Transport;
use tlbfis_protocol::command::{write_radio_header, RADIO_LINE_LEN};
use tlbfis_protocol::{FrameKind, RadioLine};

use crate::diagnostics::Warning;
use crate::encoder::Encoder;
use crate::error::DrawError;
use crate::source::Source;

/// Bytes of a raw radio message copied into the frame
const RAW_PAYLOAD_LEN: usize = 2 * RADIO_LINE_LEN;

impl<T: Transport> Encoder<T> {
    /// Show up to 8 characters on one radio line
    ///
    /// The text is translated through the character map unless `raw` is
    /// set. Empty text sends nothing.
    pub fn write_radio_text<'s>(
        &mut self,
        line: RadioLine,
        text: impl Into<Source<'s>>,
        raw: bool,
    ) -> Result<(), DrawError> {
        let mut source = text.into();
        let length = source.len();
        if length == 0 {
            return Ok(());
        }
        let kept = length.min(RADIO_LINE_LEN);
        if kept < length {
            self.diagnostics
                .record(Warning::RadioTextTruncated { line, length });
        }

        let mut bytes = [0u8; RADIO_LINE_LEN];
        source.read(0, &mut bytes[..kept]);

        write_radio_header(&mut self.radio_buf);
        self.radio_buf.wipe_range(line.offset(), RADIO_LINE_LEN);
        self.radio_buf.seek(line.offset());
        for &code in &bytes[..kept] {
            let code = if raw { code } else { self.charset.translate(code) };
            self.radio_buf.push(code);
        }
        self.send(FrameKind::Radio)
    }

    /// Forward a radio message received from the head unit
    ///
    /// `message` is the complete message including its leading header
    /// byte; the 16 text bytes after it are sent, the checksum is not.
    pub fn write_radio_raw(&mut self, message: &[u8]) -> Result<(), DrawError> {
        let payload = message.get(1..).unwrap_or_default();
        let payload = &payload[..payload.len().min(RAW_PAYLOAD_LEN)];

        write_radio_header(&mut self.radio_buf);
        self.radio_buf
            .wipe_range(RadioLine::Upper.offset(), RAW_PAYLOAD_LEN);
        self.radio_buf.extend(payload);
        self.send(FrameKind::Radio)
    }

    /// Blank both radio lines
    pub fn clear_radio_text(&mut self) -> Result<(), DrawError> {
        self.radio_buf.wipe();
        write_radio_header(&mut self.radio_buf);
        self.send(FrameKind::Radio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiagnosticMode, EncoderConfig};
    use tlbfis_hal::mock::MockTransport;
    use tlbfis_protocol::{Charset, Command};

    type Mock = MockTransport<8>;

    fn encoder() -> Encoder<Mock> {
        Encoder::new(Mock::new())
    }

    fn lines(frame: &[u8]) -> (&[u8], &[u8]) {
        match Command::parse(frame).unwrap() {
            Command::Radio { upper, lower } => (upper, lower),
            other => panic!("not a radio frame: {:?}", other),
        }
    }

    #[test]
    fn test_upper_line_translated() {
        let mut enc = encoder();
        enc.write_radio_text(RadioLine::Upper, "ab", false).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(frame.len(), 19);
        assert_eq!(&frame[..3], &[0x81, 0x11, 0xF0]);
        let (upper, lower) = lines(frame);
        assert_eq!(upper, &[0x01, Charset::DEFAULT.translate(b'b'), 0, 0, 0, 0, 0, 0]);
        assert_eq!(lower, &[0; 8]);
    }

    #[test]
    fn test_other_line_kept() {
        let mut enc = encoder();
        enc.write_radio_text(RadioLine::Upper, "ABCDEFGH", true).unwrap();
        enc.write_radio_text(RadioLine::Lower, "XY", true).unwrap();
        enc.write_radio_text(RadioLine::Upper, "Z", true).unwrap();

        let (upper, lower) = lines(enc.transport().frame(1).unwrap());
        assert_eq!(upper, b"ABCDEFGH");
        assert_eq!(lower, b"XY\0\0\0\0\0\0");

        let (upper, lower) = lines(enc.transport().frame(2).unwrap());
        assert_eq!(upper, b"Z\0\0\0\0\0\0\0");
        assert_eq!(lower, b"XY\0\0\0\0\0\0");
    }

    #[test]
    fn test_long_radio_text_cut() {
        let config = EncoderConfig::default().with_diagnostics(DiagnosticMode::Report);
        let mut enc = Encoder::with_config(Mock::new(), config);
        enc.write_radio_text(RadioLine::Lower, "0123456789", true)
            .unwrap();

        let (_, lower) = lines(enc.transport().frame(0).unwrap());
        assert_eq!(lower, b"01234567");
        assert_eq!(
            enc.diagnostics_mut().pop(),
            Some(Warning::RadioTextTruncated {
                line: RadioLine::Lower,
                length: 10
            })
        );
    }

    #[test]
    fn test_empty_radio_text_sends_nothing() {
        let mut enc = encoder();
        enc.write_radio_text(RadioLine::Upper, "", false).unwrap();
        assert!(enc.transport().frames().is_empty());
    }

    #[test]
    fn test_raw_message() {
        let mut enc = encoder();
        let mut message = [0u8; 18];
        message[0] = 0x0A;
        for (i, byte) in message[1..17].iter_mut().enumerate() {
            *byte = 0x41 + i as u8;
        }
        message[17] = 0xCC;
        enc.write_radio_raw(&message).unwrap();

        let frame = enc.transport().frame(0).unwrap();
        assert_eq!(&frame[..3], &[0x81, 0x11, 0xF0]);
        assert_eq!(&frame[3..], &message[1..17]);
    }

    #[test]
    fn test_short_raw_message_zero_filled() {
        let mut enc = encoder();
        enc.write_radio_text(RadioLine::Lower, "QQ", true).unwrap();
        enc.write_radio_raw(&[0x0A, 0x41, 0x42]).unwrap();

        let (upper, lower) = lines(enc.transport().frame(1).unwrap());
        assert_eq!(upper, b"AB\0\0\0\0\0\0");
        assert_eq!(lower, &[0; 8]);
    }

    #[test]
    fn test_clear_radio_text() {
        let mut enc = encoder();
        enc.write_radio_text(RadioLine::Upper, "HELLO", true).unwrap();
        enc.clear_radio_text().unwrap();

        let frame = enc.transport().frame(1).unwrap();
        assert_eq!(frame.len(), 19);
        assert_eq!(&frame[..3], &[0x81, 0x11, 0xF0]);
        assert!(frame[3..].iter().all(|&b| b == 0));
    }
}
