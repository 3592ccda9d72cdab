//! Byte- and colour-level bit-plane extraction
//!
//! The extractor pulls positions lazily from a traversal cursor, optionally
//! filters them to prime serial indices, reads one bit per (position,
//! channel, mask) combination and feeds the bitstream to the packer. It
//! stops the moment the packer reports the output limit satisfied, so the
//! full traversal is never materialized and memory stays bounded by the
//! requested payload.

pub mod packer;
pub mod primes;

use tracing::debug;

use crate::errors::ExtractResult;
use crate::image::ImageSource;
use crate::params::{ByteCursor, ExtractionSpec, OrderToken, PixelCursor};

use packer::BitPacker;
use primes::PrimeCache;

/// Walks traversal orders over one image and packs the extracted bits.
///
/// Owns the growable prime cache for its lifetime; single-threaded by
/// design. Scanning callers that parallelize run one extractor per thread
/// over a shared read-only image.
pub struct Extractor<'a, I: ImageSource> {
    image: &'a I,
    primes: PrimeCache,
}

impl<'a, I: ImageSource> Extractor<'a, I> {
    pub fn new(image: &'a I) -> Self {
        Self {
            image,
            primes: PrimeCache::new(),
        }
    }

    /// Run a single explicit extraction.
    ///
    /// The spec must carry exactly one concrete order token; a spec built
    /// from the `"all"` wildcard is a scanning request and belongs in a
    /// [`Self::extract_with_order`] loop instead.
    pub fn extract(&mut self, spec: &ExtractionSpec) -> ExtractResult<Vec<u8>> {
        let order = spec.order()?;
        Ok(self.extract_with_order(spec, order))
    }

    /// Extract with one concrete traversal order, ignoring the spec's own
    /// order tokens. Identical spec, order and image bytes always produce
    /// an identical payload.
    pub fn extract_with_order(&mut self, spec: &ExtractionSpec, order: OrderToken) -> Vec<u8> {
        debug!(
            order = %order,
            limit = spec.limit,
            depth = self.image.bit_depth(),
            "starting extraction"
        );
        let payload = match order {
            OrderToken::Byte { byte_dir, line_dir } => {
                let data = self.image.scanline_bytes();
                let cursor = ByteCursor::new(data.len(), self.image.stride(), byte_dir, line_dir);
                self.byte_extract(spec, cursor)
            }
            OrderToken::Pixel {
                inner,
                inner_dir,
                outer_dir,
            } => {
                let cursor = PixelCursor::new(
                    self.image.width(),
                    self.image.height(),
                    inner,
                    inner_dir,
                    outer_dir,
                );
                self.color_extract(spec, cursor)
            }
        };
        debug!(
            order = %order,
            bytes = payload.len(),
            head = %hex::encode(&payload[..payload.len().min(16)]),
            "extraction complete"
        );
        payload
    }

    /// Walk raw scanline bytes, testing each requested bit of each visited
    /// byte. Channels play no part here.
    fn byte_extract(&mut self, spec: &ExtractionSpec, cursor: ByteCursor) -> Vec<u8> {
        let data = self.image.scanline_bytes();
        let mut packer = BitPacker::new(spec.bit_order, spec.limit);
        if spec.prime_only {
            self.pregenerate_primes(spec.limit, data.len() as u64, spec.bit_positions.len());
        }
        'walk: for offset in cursor {
            if spec.prime_only && !self.primes.is_prime(offset as u64) {
                continue;
            }
            let value = data[offset];
            for &mask in &spec.bit_positions {
                if !packer.push(value & mask != 0) {
                    break 'walk;
                }
            }
        }
        packer.finish()
    }

    /// Walk pixel coordinates, reading each requested channel in requested
    /// order and each bit mask in resolver order. The prime filter applies
    /// to the pixel's row-major serial index, whatever the traversal.
    fn color_extract(&mut self, spec: &ExtractionSpec, cursor: PixelCursor) -> Vec<u8> {
        let width = self.image.width() as u64;
        let height = self.image.height() as u64;
        let mut packer = BitPacker::new(spec.bit_order, spec.limit);
        if spec.prime_only {
            let per_position = spec.bit_positions.len() * spec.channels.len().max(1);
            self.pregenerate_primes(spec.limit, width * height, per_position);
        }
        'walk: for (x, y) in cursor {
            if spec.prime_only {
                let index = y as u64 * width + x as u64;
                if !self.primes.is_prime(index) {
                    continue;
                }
            }
            for &channel in &spec.channels {
                let value = self.image.sample(x, y, channel);
                for &mask in &spec.bit_positions {
                    if !packer.push(value & mask != 0) {
                        break 'walk;
                    }
                }
            }
        }
        packer.finish()
    }

    /// Seed the prime cache before a filtered walk: enough primes for the
    /// byte limit at this many bits per visited position, capped by the
    /// size of the position space.
    fn pregenerate_primes(&mut self, limit: u64, positions: u64, bits_per_position: usize) {
        let per_position = bits_per_position.max(1) as u64;
        let wanted = (limit.saturating_mul(8) / per_position).min(positions);
        self.primes.pregenerate(positions, wanted);
    }
}
