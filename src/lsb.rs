//! Least Significant Bit (LSB) steganography over pixel channels.
//!
//! A message is written as a bitstream into the lowest bit of consecutive
//! channel values. Bits are laid out in raster order: channel by channel
//! within a pixel, pixels left to right, rows top to bottom.
//!
//! ```text
//! | length header (header_bits) | char 0 (bits_per_char) | char 1 | ... |
//! ```
//!
//! Both the header and every character are written most-significant bit
//! first. Only the configured number of leading channels of each pixel is
//! used, so an alpha channel can be left alone by using 3 channels on an
//! RGBA image.

use crate::config::CodecConfig;
use crate::error::{Result, StegoError};
use crate::pixels::PixelBuffer;
use serde::Serialize;

/// Where a single bit of the stream lives in the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitLocation {
    pub channel: u8,
    pub col: u32,
    pub row: u32,
}

/// Map the `bit_index`-th bit of the stream to a channel of a pixel.
///
/// No bounds checking is done: an index at or past
/// `width * height * channel_count` yields a row outside the image.
pub fn locate(bit_index: u64, width: u32, channel_count: u8) -> BitLocation {
    let width = u64::from(width);
    let channels = u64::from(channel_count);
    BitLocation {
        channel: (bit_index % channels) as u8,
        col: ((bit_index / channels) % width) as u32,
        row: (bit_index / (width * channels)) as u32,
    }
}

/// Number of LSBs an image of the given size offers.
pub fn available_bits(width: u32, height: u32, channel_count: u8) -> u64 {
    u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(u64::from(channel_count))
}

/// How much an image can carry under a given configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub available_bits: u64,
    pub header_bits: u32,
    /// Longest message (in characters) that fits both the image and the
    /// length header. Zero if not even the header fits.
    pub max_message_len: u64,
}

pub fn capacity(width: u32, height: u32, config: &CodecConfig) -> Result<Capacity> {
    config.validate()?;
    let available = available_bits(width, height, config.channel_count);
    let header_bits = config.header_bits();
    let max_message_len = available
        .checked_sub(u64::from(header_bits))
        .map(|payload| (payload / u64::from(config.bits_per_char)).min(config.max_header_length()))
        .unwrap_or(0);

    Ok(Capacity {
        available_bits: available,
        header_bits,
        max_message_len,
    })
}

/// Capacity of a concrete buffer. Unlike [`capacity`], this also rejects a
/// `channel_count` larger than the buffer's real channel count.
pub fn capacity_of<B: PixelBuffer + ?Sized>(buffer: &B, config: &CodecConfig) -> Result<Capacity> {
    check_config(buffer, config)?;
    capacity(buffer.width(), buffer.height(), config)
}

/// Running position in the bitstream. One cursor lives for exactly one
/// encode or decode call and only ever moves forward.
struct BitCursor {
    next: u64,
    width: u32,
    channel_count: u8,
}

impl BitCursor {
    fn new(width: u32, channel_count: u8) -> Self {
        Self {
            next: 0,
            width,
            channel_count,
        }
    }

    /// Write the low `bits` bits of `value`, MSB first.
    fn write<B: PixelBuffer + ?Sized>(&mut self, buffer: &mut B, value: u64, bits: u32) {
        for shift in (0..bits).rev() {
            let bit = ((value >> shift) & 1) as u8;
            let loc = locate(self.next, self.width, self.channel_count);
            let old = buffer.channel(loc.col, loc.row, loc.channel);
            buffer.set_channel(loc.col, loc.row, loc.channel, (old & !1) | bit);
            self.next += 1;
        }
    }

    /// Read `bits` bits, MSB first.
    fn read<B: PixelBuffer + ?Sized>(&mut self, buffer: &B, bits: u32) -> u64 {
        let mut value = 0u64;
        for _ in 0..bits {
            let loc = locate(self.next, self.width, self.channel_count);
            let bit = buffer.channel(loc.col, loc.row, loc.channel) & 1;
            value = (value << 1) | u64::from(bit);
            self.next += 1;
        }
        value
    }
}

fn check_config<B: PixelBuffer + ?Sized>(buffer: &B, config: &CodecConfig) -> Result<()> {
    config.validate()?;
    if config.channel_count > buffer.channels() {
        return Err(StegoError::InvalidConfig(format!(
            "channel_count {} exceeds the image's {} channels",
            config.channel_count,
            buffer.channels()
        )));
    }
    Ok(())
}

fn required_bits(config: &CodecConfig, length: u64) -> u128 {
    u128::from(config.header_bits()) + u128::from(length) * u128::from(config.bits_per_char)
}

/// Hide `message` in the least significant bits of `buffer`.
///
/// Everything is validated before the first write, so on error the buffer
/// is left exactly as it was.
///
/// # Errors
/// - [`StegoError::InvalidConfig`] for a bad configuration, or one using
///   more channels than the buffer has.
/// - [`StegoError::InvalidMessage`] if a character does not fit in
///   `bits_per_char` bits.
/// - [`StegoError::MessageTooLarge`] if the image or the length header is
///   too small for the message.
pub fn encode<B: PixelBuffer + ?Sized>(
    buffer: &mut B,
    message: &str,
    config: &CodecConfig,
) -> Result<()> {
    check_config(buffer, config)?;

    let max_codepoint = config.max_codepoint();
    let mut length = 0u64;
    for (position, ch) in message.chars().enumerate() {
        if u32::from(ch) > max_codepoint {
            return Err(StegoError::InvalidMessage {
                ch,
                position,
                bits_per_char: config.bits_per_char,
            });
        }
        length += 1;
    }

    let available = available_bits(buffer.width(), buffer.height(), config.channel_count);
    let required = required_bits(config, length);
    let max_length = config.max_header_length();
    if required > u128::from(available) || length > max_length {
        return Err(StegoError::MessageTooLarge {
            length,
            required_bits: required,
            available_bits: available,
            max_length,
        });
    }

    let char_bits = u32::from(config.bits_per_char);
    let mut cursor = BitCursor::new(buffer.width(), config.channel_count);
    cursor.write(buffer, length, config.header_bits());
    for ch in message.chars() {
        cursor.write(buffer, u64::from(u32::from(ch)), char_bits);
    }

    Ok(())
}

/// Recover a message hidden by [`encode`] with the same configuration.
///
/// Each decoded codepoint becomes the `char` with that value; the content
/// itself is not checked.
///
/// # Errors
/// - [`StegoError::InvalidConfig`] as for [`encode`].
/// - [`StegoError::ImageTooSmall`] if the image cannot hold the header.
/// - [`StegoError::TruncatedPayload`] if the header declares more
///   characters than the rest of the image holds.
pub fn decode<B: PixelBuffer + ?Sized>(buffer: &B, config: &CodecConfig) -> Result<String> {
    check_config(buffer, config)?;

    let available = available_bits(buffer.width(), buffer.height(), config.channel_count);
    let header_bits = config.header_bits();
    if available < u64::from(header_bits) {
        return Err(StegoError::ImageTooSmall {
            available_bits: available,
            header_bits,
        });
    }

    let mut cursor = BitCursor::new(buffer.width(), config.channel_count);
    let declared_length = cursor.read(buffer, header_bits);

    let required = required_bits(config, declared_length);
    if required > u128::from(available) {
        return Err(StegoError::TruncatedPayload {
            declared_length,
            required_bits: required,
            available_bits: available,
        });
    }

    let char_bits = u32::from(config.bits_per_char);
    let mut message = String::with_capacity(usize::try_from(declared_length).unwrap_or(0));
    for _ in 0..declared_length {
        let codepoint = cursor.read(buffer, char_bits) as u8;
        message.push(char::from(codepoint));
    }

    Ok(message)
}
