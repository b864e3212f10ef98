//! Error types for hiding and recovering messages.

use thiserror::Error;

/// Errors returned by the codec and the image helpers around it.
///
/// Every variant is detected before the pixel buffer is touched (encode) or
/// before an out-of-range bit is read (decode).
#[derive(Debug, Error)]
pub enum StegoError {
    /// A character does not fit the configured character width.
    #[error("character {ch:?} at position {position} does not fit in {bits_per_char} bits")]
    InvalidMessage {
        ch: char,
        position: usize,
        bits_per_char: u8,
    },

    /// The message needs more bits than the image offers, or is longer than
    /// the length header can express.
    #[error(
        "message too large: {length} chars need {required_bits} bits, \
         {available_bits} available (header allows at most {max_length} chars)"
    )]
    MessageTooLarge {
        length: u64,
        required_bits: u128,
        available_bits: u64,
        max_length: u64,
    },

    /// The image cannot even hold the length header.
    #[error("image too small: {available_bits} bits available, header needs {header_bits}")]
    ImageTooSmall { available_bits: u64, header_bits: u32 },

    /// The length header declares more payload than the image holds.
    #[error(
        "truncated payload: header declares {declared_length} chars \
         ({required_bits} bits) but only {available_bits} bits are available"
    )]
    TruncatedPayload {
        declared_length: u64,
        required_bits: u128,
        available_bits: u64,
    },

    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),

    /// Two images that must share dimensions do not.
    #[error("image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`crate::CodecConfig`].
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
