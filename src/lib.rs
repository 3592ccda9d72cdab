//! Bit-plane payload extraction engine
//!
//! Extracts candidate hidden payloads from raster image data by reading
//! selected bit-planes of selected colour channels (or raw scanline bytes)
//! in a configurable traversal order. A compact parameter string such as
//! `"2b,b,lsb,xy"` resolves to an immutable [`ExtractionSpec`]; an
//! [`Extractor`] then walks the requested traversal lazily and packs the
//! visited bits into an output payload, stopping as soon as the byte limit
//! is satisfied.
//!
//! Image container decoding, command-line handling and signature scoring of
//! the extracted bytes are owned by collaborators; this crate only consumes
//! an [`ImageSource`] and returns bytes.

pub mod errors;
pub mod extract;
pub mod image;
pub mod params;

pub use errors::{ExtractError, ExtractResult};
pub use extract::Extractor;
pub use image::{Channel, ImageSource, MemoryImage};
pub use params::{BitOrder, BitsValue, ExtractionSpec, OrderToken, SpecOptions};
