//! Input image seam
//!
//! The extraction engine never decodes image containers itself. A decoding
//! collaborator hands it anything implementing [`ImageSource`]: pixel
//! dimensions, per-channel sample access and the raw decoded scanline
//! buffer. [`MemoryImage`] is the plain in-memory RGBA implementation used
//! as the handoff type and as the synthetic fixture in tests.

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, ExtractResult};

/// One colour component of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    /// Map a channel letter (case-insensitive) to a channel.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Channel::R),
            'g' => Some(Channel::G),
            'b' => Some(Channel::B),
            'a' => Some(Channel::A),
            _ => None,
        }
    }

    /// The lowercase letter naming this channel.
    pub fn letter(&self) -> char {
        match self {
            Channel::R => 'r',
            Channel::G => 'g',
            Channel::B => 'b',
            Channel::A => 'a',
        }
    }

    /// Byte offset of this channel within an RGBA quadruple.
    pub fn rgba_index(&self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
            Channel::A => 3,
        }
    }

    /// Parse a channel combination like `"rgb"` or `"bgr"`.
    ///
    /// Order is preserved (it drives bit interleaving later); duplicate
    /// letters collapse to their first occurrence. Empty input or a letter
    /// outside r/g/b/a is rejected.
    pub fn parse_set(s: &str) -> ExtractResult<Vec<Channel>> {
        let mut set = Vec::new();
        for c in s.chars() {
            let channel = Self::from_letter(c)
                .ok_or_else(|| ExtractError::MalformedParameter(s.to_string()))?;
            if !set.contains(&channel) {
                set.push(channel);
            }
        }
        if set.is_empty() {
            return Err(ExtractError::MalformedParameter(s.to_string()));
        }
        Ok(set)
    }
}

/// Decoded raster image as seen by the extraction engine.
///
/// Implementations are owned by the decoding collaborator; the engine only
/// borrows them and never copies the pixel buffer.
pub trait ImageSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Bits per channel sample of the decoded image.
    fn bit_depth(&self) -> u8;

    /// One channel sample of the pixel at `(x, y)`.
    fn sample(&self, x: u32, y: u32, channel: Channel) -> u8;

    /// The raw decoded bytes, scanline after scanline.
    fn scanline_bytes(&self) -> &[u8];

    /// Bytes per scanline within [`Self::scanline_bytes`].
    fn stride(&self) -> usize;
}

/// Plain in-memory RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MemoryImage {
    /// Wrap a decoded RGBA8 buffer. The buffer length must be exactly
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ExtractResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ExtractError::ImageLoadFailure(format!(
                "buffer is {} bytes, {}x{} RGBA needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a greyscale image from one byte per pixel (r = g = b = value,
    /// alpha opaque). Convenient for synthetic fixtures.
    pub fn from_gray(width: u32, height: u32, pixels: &[u8]) -> ExtractResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(ExtractError::ImageLoadFailure(format!(
                "{} pixel values for a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        let mut data = Vec::with_capacity(pixels.len() * 4);
        for &v in pixels {
            data.extend_from_slice(&[v, v, v, 0xff]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl ImageSource for MemoryImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn bit_depth(&self) -> u8 {
        8
    }

    fn sample(&self, x: u32, y: u32, channel: Channel) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * 4 + channel.rgba_index();
        self.data[idx]
    }

    fn scanline_bytes(&self) -> &[u8] {
        &self.data
    }

    fn stride(&self) -> usize {
        self.width as usize * 4
    }
}
