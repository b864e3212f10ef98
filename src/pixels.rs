//! Channel-level access to pixel grids.

use image::{ImageBuffer, Pixel};

/// A rectangular grid of pixels whose channels are single bytes.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Channels stored per pixel.
    fn channels(&self) -> u8;
    fn channel(&self, col: u32, row: u32, channel: u8) -> u8;
    fn set_channel(&mut self, col: u32, row: u32, channel: u8, value: u8);
}

impl<P> PixelBuffer for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn channels(&self) -> u8 {
        P::CHANNEL_COUNT
    }

    fn channel(&self, col: u32, row: u32, channel: u8) -> u8 {
        self.get_pixel(col, row).channels()[channel as usize]
    }

    fn set_channel(&mut self, col: u32, row: u32, channel: u8, value: u8) {
        self.get_pixel_mut(col, row).channels_mut()[channel as usize] = value;
    }
}
