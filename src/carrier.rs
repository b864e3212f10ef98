//! Loading and saving the images that carry hidden messages.

use crate::config::CodecConfig;
use crate::error::Result;
use crate::lsb::{self, Capacity};
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage, RgbaImage};
use log::{debug, info, warn};
use std::path::Path;

/// An 8-bit image ready for the codec. Images with an alpha channel keep it;
/// everything else is converted to RGB.
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl From<DynamicImage> for Carrier {
    fn from(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Carrier::Rgba(img.into_rgba8())
        } else {
            Carrier::Rgb(img.into_rgb8())
        }
    }
}

impl Carrier {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let (width, height) = img.dimensions();
        debug!(
            "Opened '{}' ({}x{}, {:?})",
            path.display(),
            width,
            height,
            img.color()
        );
        Ok(Self::from(img))
    }

    /// Save using the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if is_lossy(path) {
            warn!(
                "'{}' uses a lossy format; hidden bits will not survive",
                path.display()
            );
        }
        match self {
            Carrier::Rgb(img) => img.save(path)?,
            Carrier::Rgba(img) => img.save(path)?,
        }
        debug!("Saved '{}'", path.display());
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Carrier::Rgb(img) => img.dimensions(),
            Carrier::Rgba(img) => img.dimensions(),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            Carrier::Rgb(_) => 3,
            Carrier::Rgba(_) => 4,
        }
    }

    pub fn encode(&mut self, message: &str, config: &CodecConfig) -> Result<()> {
        match self {
            Carrier::Rgb(img) => lsb::encode(img, message, config),
            Carrier::Rgba(img) => lsb::encode(img, message, config),
        }
    }

    pub fn decode(&self, config: &CodecConfig) -> Result<String> {
        match self {
            Carrier::Rgb(img) => lsb::decode(img, config),
            Carrier::Rgba(img) => lsb::decode(img, config),
        }
    }

    pub fn capacity(&self, config: &CodecConfig) -> Result<Capacity> {
        match self {
            Carrier::Rgb(img) => lsb::capacity_of(img, config),
            Carrier::Rgba(img) => lsb::capacity_of(img, config),
        }
    }
}

fn is_lossy(path: &Path) -> bool {
    matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::WebP)
    )
}

/// Hide `message` in the image at `input` and write the result to `output`.
pub fn encode_file(
    input: impl AsRef<Path>,
    message: &str,
    output: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<Carrier> {
    let mut carrier = Carrier::open(input)?;
    carrier.encode(message, config)?;
    carrier.save(&output)?;
    info!(
        "Hid {} chars in '{}'",
        message.chars().count(),
        output.as_ref().display()
    );
    Ok(carrier)
}

/// Read back a message hidden in the image at `input`.
pub fn decode_file(input: impl AsRef<Path>, config: &CodecConfig) -> Result<String> {
    let carrier = Carrier::open(&input)?;
    let message = carrier.decode(config)?;
    info!(
        "Recovered {} chars from '{}'",
        message.chars().count(),
        input.as_ref().display()
    );
    Ok(message)
}
