//! Hiding one image inside another.
//!
//! Each channel of the combined image keeps the high nibble of the cover and
//! stores the high nibble of the hidden image in its low nibble. Both images
//! come back with 4 bits of precision per channel.

use crate::error::{Result, StegoError};
use image::{Rgb, RgbImage};
use log::info;
use std::path::Path;

const HIGH_NIBBLE: u8 = 0xF0;
const LOW_NIBBLE: u8 = 0x0F;

/// Merge `hidden` into the low nibbles of `cover`.
///
/// # Errors
/// [`StegoError::DimensionMismatch`] if the two images differ in size.
pub fn combine(cover: &RgbImage, hidden: &RgbImage) -> Result<RgbImage> {
    if cover.dimensions() != hidden.dimensions() {
        return Err(StegoError::DimensionMismatch {
            left_width: cover.width(),
            left_height: cover.height(),
            right_width: hidden.width(),
            right_height: hidden.height(),
        });
    }

    Ok(RgbImage::from_fn(cover.width(), cover.height(), |x, y| {
        let c = cover.get_pixel(x, y).0;
        let h = hidden.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|i| (c[i] & HIGH_NIBBLE) | (h[i] >> 4)))
    }))
}

/// Split a combined image back into `(cover, hidden)`.
pub fn separate(combined: &RgbImage) -> (RgbImage, RgbImage) {
    let cover = RgbImage::from_fn(combined.width(), combined.height(), |x, y| {
        let v = combined.get_pixel(x, y).0;
        Rgb(v.map(|c| c & HIGH_NIBBLE))
    });
    let hidden = RgbImage::from_fn(combined.width(), combined.height(), |x, y| {
        let v = combined.get_pixel(x, y).0;
        Rgb(v.map(|c| (c & LOW_NIBBLE) << 4))
    });
    (cover, hidden)
}

pub fn combine_files(
    cover: impl AsRef<Path>,
    hidden: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<()> {
    let cover_img = image::open(&cover)?.into_rgb8();
    let hidden_img = image::open(&hidden)?.into_rgb8();
    combine(&cover_img, &hidden_img)?.save(&output)?;
    info!(
        "Hid '{}' inside '{}' -> '{}'",
        hidden.as_ref().display(),
        cover.as_ref().display(),
        output.as_ref().display()
    );
    Ok(())
}

pub fn separate_file(
    combined: impl AsRef<Path>,
    cover_out: impl AsRef<Path>,
    hidden_out: impl AsRef<Path>,
) -> Result<()> {
    let img = image::open(&combined)?.into_rgb8();
    let (cover, hidden) = separate(&img);
    cover.save(&cover_out)?;
    hidden.save(&hidden_out)?;
    info!(
        "Split '{}' into '{}' and '{}'",
        combined.as_ref().display(),
        cover_out.as_ref().display(),
        hidden_out.as_ref().display()
    );
    Ok(())
}
