//! Common test fixtures
//!
//! Shared helpers building synthetic in-memory images with known sample
//! values, used across the extraction test files.

use stegbits::MemoryImage;

/// 4x2 greyscale image whose red-channel MSBs spell 0b10101010 in raster
/// order.
pub fn msb_fixture() -> MemoryImage {
    let pixels = [0x80, 0x00, 0xff, 0x7f, 0x81, 0x01, 0x90, 0x10];
    MemoryImage::from_gray(4, 2, &pixels).unwrap()
}

/// Greyscale ramp with deterministic, non-repeating-looking byte values.
pub fn gray_ramp(width: u32, height: u32) -> MemoryImage {
    let pixels: Vec<u8> = (0..width * height).map(|i| (i * 37) as u8).collect();
    MemoryImage::from_gray(width, height, &pixels).unwrap()
}
