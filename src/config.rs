//! Codec configuration.

use crate::error::{Result, StegoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Character widths the codec understands.
pub const SUPPORTED_CHAR_WIDTHS: [u8; 2] = [7, 8];

/// Largest length header, in bytes (a `u64`).
pub const MAX_HEADER_BYTES: u8 = 8;

/// Parameters shared by encoder and decoder.
///
/// Both sides must agree on every field; nothing here is stored in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Bits written per character. 7 restricts messages to ASCII.
    pub bits_per_char: u8,
    /// Channels used per pixel, counted from the first. May be smaller than
    /// the image's real channel count (e.g. 3 to skip alpha).
    pub channel_count: u8,
    /// Width of the length header in bytes.
    pub header_bytes: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            bits_per_char: 7,
            channel_count: 3,
            header_bytes: 4,
        }
    }
}

impl CodecConfig {
    pub fn header_bits(&self) -> u32 {
        u32::from(self.header_bytes) * 8
    }

    /// Longest message the length header can express.
    pub fn max_header_length(&self) -> u64 {
        match self.header_bits() {
            0 => 0,
            bits => u64::MAX >> (64 - bits),
        }
    }

    /// Largest codepoint a single character may carry.
    pub fn max_codepoint(&self) -> u32 {
        (1u32 << self.bits_per_char) - 1
    }

    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_CHAR_WIDTHS.contains(&self.bits_per_char) {
            return Err(StegoError::InvalidConfig(format!(
                "bits_per_char must be 7 or 8, got {}",
                self.bits_per_char
            )));
        }
        if self.channel_count == 0 {
            return Err(StegoError::InvalidConfig(
                "channel_count must be at least 1".into(),
            ));
        }
        if self.header_bytes == 0 || self.header_bytes > MAX_HEADER_BYTES {
            return Err(StegoError::InvalidConfig(format!(
                "header_bytes must be between 1 and {MAX_HEADER_BYTES}, got {}",
                self.header_bytes
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.bits_per_char, 7);
        assert_eq!(cfg.channel_count, 3);
        assert_eq!(cfg.header_bits(), 32);
        assert_eq!(cfg.max_header_length(), u32::MAX as u64);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn header_length_limits() {
        let one = CodecConfig { header_bytes: 1, ..Default::default() };
        assert_eq!(one.max_header_length(), 255);
        let eight = CodecConfig { header_bytes: 8, ..Default::default() };
        assert_eq!(eight.max_header_length(), u64::MAX);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_width = CodecConfig { bits_per_char: 6, ..Default::default() };
        assert!(matches!(bad_width.validate(), Err(StegoError::InvalidConfig(_))));

        let no_channels = CodecConfig { channel_count: 0, ..Default::default() };
        assert!(matches!(no_channels.validate(), Err(StegoError::InvalidConfig(_))));

        let wide_header = CodecConfig { header_bytes: 9, ..Default::default() };
        assert!(matches!(wide_header.validate(), Err(StegoError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: CodecConfig = serde_json::from_str(r#"{"bits_per_char": 8}"#).unwrap();
        assert_eq!(cfg.bits_per_char, 8);
        assert_eq!(cfg.channel_count, 3);
        assert_eq!(cfg.header_bytes, 4);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.json");
        fs::write(&path, r#"{"channel_count": 4, "header_bytes": 2}"#).unwrap();

        let cfg = CodecConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.channel_count, 4);
        assert_eq!(cfg.header_bits(), 16);
    }

    #[test]
    fn file_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();

        let missing = CodecConfig::from_json_file(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(StegoError::Io(_))));

        let garbled = dir.path().join("garbled.json");
        fs::write(&garbled, "{ bits_per_char: ").unwrap();
        assert!(matches!(CodecConfig::from_json_file(&garbled), Err(StegoError::Json(_))));

        let out_of_range = dir.path().join("wide.json");
        fs::write(&out_of_range, r#"{"header_bytes": 12}"#).unwrap();
        assert!(matches!(
            CodecConfig::from_json_file(&out_of_range),
            Err(StegoError::InvalidConfig(_))
        ));
    }
}
