//! Extraction parameter parsing
//!
//! Two surfaces resolve to the same immutable [`ExtractionSpec`]: the
//! compact comma-separated parameter string (`"2b,b,lsb,xy"`, also used as
//! an extraction name) and the structured option surface a CLI collaborator
//! hands over pre-parsed ([`SpecOptions`]).

pub mod bits;
pub mod order;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ExtractError, ExtractResult};
use crate::image::Channel;

pub use bits::BitsValue;
pub use order::{Axis, ByteCursor, Dir, OrderToken, PixelCursor};

/// Packing endianness for extracted bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitOrder {
    /// The first extracted bit of each group becomes the output byte's
    /// lowest bit.
    LsbFirst,
    /// The first extracted bit becomes the output byte's highest bit.
    MsbFirst,
}

/// Sentinel the zero "no limit" value normalizes to.
pub const UNBOUNDED_LIMIT: u64 = 1 << 32;

/// A fully resolved extraction request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSpec {
    /// Channels to read per pixel, in interleaving order. Ignored by
    /// byte-major orders.
    pub channels: Vec<Channel>,
    /// Single-bit masks to test per sample, most significant first.
    pub bit_positions: Vec<u8>,
    pub bit_order: BitOrder,
    /// Concrete traversal orders; more than one only when the caller is
    /// scanning an expanded wildcard, never for a single extraction.
    pub order_tokens: Vec<OrderToken>,
    pub prime_only: bool,
    /// Output byte cap, always positive after normalization.
    pub limit: u64,
}

/// Structured option surface, collaborator-parsed.
///
/// Unset fields fall back to the historical defaults: channels `r,g,b`,
/// one bit (the MSB), LSB-first packing, raster order `xy`, no prime
/// filtering, unbounded output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecOptions {
    pub channels: Option<Vec<Channel>>,
    pub bits: Option<BitsValue>,
    pub bit_order: Option<BitOrder>,
    pub order_tokens: Option<Vec<OrderToken>>,
    pub prime: bool,
    /// Output byte cap; 0 means unbounded.
    pub limit: u64,
}

impl SpecOptions {
    /// Resolve into a spec, normalizing the limit and enforcing the
    /// non-empty invariants.
    fn resolve(self) -> ExtractResult<ExtractionSpec> {
        let bits = self.bits.unwrap_or(BitsValue::Count(1));
        let bit_positions = bits.masks();
        if bit_positions.is_empty() {
            // an all-zero mask selects nothing
            return Err(ExtractError::InvalidBitsValue(format!("{:?}", bits)));
        }
        let channels = self
            .channels
            .unwrap_or_else(|| vec![Channel::R, Channel::G, Channel::B]);
        let order_tokens = self
            .order_tokens
            .unwrap_or_else(|| vec![OrderToken::default()]);
        if channels.is_empty() && order_tokens.iter().any(|t| !t.is_byte_major()) {
            // pixel-major extraction reads per-channel samples, so an empty
            // channel set can never produce a bit
            return Err(ExtractError::MalformedParameter(String::new()));
        }
        let spec = ExtractionSpec {
            channels,
            bit_positions,
            bit_order: self.bit_order.unwrap_or(BitOrder::LsbFirst),
            order_tokens,
            prime_only: self.prime,
            limit: if self.limit == 0 {
                UNBOUNDED_LIMIT
            } else {
                self.limit
            },
        };
        debug!(spec = %spec, "resolved extraction spec");
        Ok(spec)
    }
}

/// Classification of one compact-string token. Variants are tried in
/// declaration order; anything left over fails the whole parse.
enum ParamToken {
    BitOrder(BitOrder),
    Bits(BitsValue),
    Channels(Vec<Channel>),
    Order(Vec<OrderToken>),
    Prime,
}

/// Classify one token of a compact parameter string.
///
/// Priority matters: `"2b"` is a bit count while `"b"` is the blue channel,
/// and `"by"` is an order because `y` is not a channel letter.
fn classify(token: &str) -> ExtractResult<ParamToken> {
    match token {
        "lsb" => return Ok(ParamToken::BitOrder(BitOrder::LsbFirst)),
        "msb" => return Ok(ParamToken::BitOrder(BitOrder::MsbFirst)),
        _ => {}
    }
    let b = token.as_bytes();
    if b.len() == 2 && b[0].is_ascii_digit() && b[1] == b'b' {
        return Ok(ParamToken::Bits(BitsValue::parse_single(&token[..1])?));
    }
    if b.len() == 2 && b[0] == b'b' && b[1].is_ascii_digit() {
        return Ok(ParamToken::Bits(BitsValue::parse_single(&token[1..])?));
    }
    if !token.is_empty() && token.chars().all(|c| matches!(c, 'r' | 'g' | 'b' | 'a')) {
        return Ok(ParamToken::Channels(Channel::parse_set(token)?));
    }
    let lower = token.to_ascii_lowercase();
    if matches!(lower.as_str(), "xy" | "yx" | "yb" | "by" | "all" | "auto") {
        return Ok(ParamToken::Order(OrderToken::parse_list(token)?));
    }
    if token == "prime" {
        return Ok(ParamToken::Prime);
    }
    Err(ExtractError::MalformedParameter(token.to_string()))
}

impl ExtractionSpec {
    /// Parse a compact parameter string like `"1b,rgb,lsb"` with default
    /// options for everything the string leaves unset.
    pub fn parse(s: &str) -> ExtractResult<Self> {
        Self::parse_with(s, &SpecOptions::default())
    }

    /// Parse a compact string on top of structured options.
    ///
    /// Tokens override the corresponding option fields; the limit can only
    /// come from the structured surface, so an explicit flag always wins.
    pub fn parse_with(s: &str, opts: &SpecOptions) -> ExtractResult<Self> {
        let mut opts = opts.clone();
        for token in s.split(',') {
            match classify(token)? {
                ParamToken::BitOrder(o) => opts.bit_order = Some(o),
                ParamToken::Bits(v) => opts.bits = Some(v),
                ParamToken::Channels(c) => opts.channels = Some(c),
                ParamToken::Order(o) => opts.order_tokens = Some(o),
                ParamToken::Prime => opts.prime = true,
            }
        }
        opts.resolve()
    }

    /// Resolve structured options alone, without a compact string.
    pub fn from_options(opts: &SpecOptions) -> ExtractResult<Self> {
        opts.clone().resolve()
    }

    /// The sole order token of an explicit extraction.
    pub fn order(&self) -> ExtractResult<OrderToken> {
        match self.order_tokens.as_slice() {
            [token] => Ok(*token),
            _ => Err(ExtractError::InvalidOrder(
                self.order_tokens
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            )),
        }
    }

    /// Reconstruct the bits value behind `bit_positions`, preferring the
    /// count spelling when the masks are a contiguous MSB run.
    fn bits_value(&self) -> BitsValue {
        for n in 1..=8u8 {
            if BitsValue::Count(n).masks() == self.bit_positions {
                return BitsValue::Count(n);
            }
        }
        BitsValue::Mask(self.bit_positions.iter().fold(0, |m, &b| m | b))
    }
}

impl fmt::Display for ExtractionSpec {
    /// Compact-style rendition, e.g. `2b,rgb,lsb,xy,prime`. Informational;
    /// mask bit selections render in hex, which the compact grammar does
    /// not accept back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bits_value() {
            BitsValue::Count(n) => write!(f, "{}b", n)?,
            BitsValue::Mask(m) => write!(f, "0x{:02x}", m)?,
        }
        let byte_major = self.order_tokens.iter().all(|t| t.is_byte_major());
        if !byte_major {
            write!(f, ",")?;
            for c in &self.channels {
                write!(f, "{}", c.letter())?;
            }
        }
        match self.bit_order {
            BitOrder::LsbFirst => write!(f, ",lsb")?,
            BitOrder::MsbFirst => write!(f, ",msb")?,
        }
        for token in &self.order_tokens {
            write!(f, ",{}", token)?;
        }
        if self.prime_only {
            write!(f, ",prime")?;
        }
        Ok(())
    }
}
