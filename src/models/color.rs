use crate::core::errors::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    ///
    /// An eight digit value carries an alpha channel; it is dropped with a
    /// warning. Every other length is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColorFormat(text.to_string()));
        }
        let digits = match digits.len() {
            6 => digits,
            8 => {
                tracing::warn!(color = %text, "dropping alpha channel from color");
                &digits[..6]
            }
            _ => return Err(Error::InvalidColorFormat(text.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::InvalidColorFormat(text.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Theme tints are written as `[r, g, b]`.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::parse("#87c95f").unwrap(), Color::rgb(0x87, 0xc9, 0x5f));
        assert_eq!(Color::parse("ABCDEF").unwrap(), Color::rgb(0xab, 0xcd, 0xef));
    }

    #[test]
    fn alpha_suffix_is_truncated() {
        assert_eq!(Color::parse("#87c95fcc").unwrap(), Color::rgb(0x87, 0xc9, 0x5f));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn alpha_truncation_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let color = tracing::subscriber::with_default(subscriber, || Color::parse("#87c95fcc"));
        assert_eq!(color.unwrap(), Color::rgb(0x87, 0xc9, 0x5f));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("dropping alpha channel"), "logs: {logs}");
        assert!(logs.contains("#87c95fcc"), "logs: {logs}");

        // six digit colors pass silently
        captured.0.lock().unwrap().clear();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let writer = captured.clone();
                move || writer.clone()
            })
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || Color::parse("#87c95f")).unwrap();
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_length_and_digits() {
        for bad in ["#fff", "#1234567", "", "#", "#gg0000", "#12345é", "#+f0000", "#-10000", "#87c95f+f"] {
            assert!(
                matches!(Color::parse(bad), Err(Error::InvalidColorFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn hex_output_is_lowercase() {
        assert_eq!(Color::rgb(0xAB, 0x0C, 0xFF).to_string(), "#ab0cff");
    }

    #[test]
    fn serializes_as_channel_array() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
    }
}
