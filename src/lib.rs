//! Hide text in the least significant bits of an image's pixels.
//!
//! The codec itself ([`lsb`]) works on any [`PixelBuffer`] and does no I/O.
//! [`carrier`] loads and saves image files around it, and [`nibble`] hides a
//! whole image inside another.

pub mod carrier;
pub mod config;
pub mod error;
pub mod lsb;
pub mod nibble;
pub mod pixels;

pub use carrier::{decode_file, encode_file, Carrier};
pub use config::CodecConfig;
pub use error::{Result, StegoError};
pub use lsb::{capacity, capacity_of, decode, encode, locate, BitLocation, Capacity};
pub use pixels::PixelBuffer;
