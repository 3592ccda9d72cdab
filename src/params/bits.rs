//! Bits value grammar and bit-mask resolution
//!
//! A bits value is either a *count* ("take the N most significant bits") or
//! an *explicit mask* ("take exactly these bit positions"). Hex and binary
//! spellings are always masks; decimal values in 1..=8 are counts and
//! anything else falls back to a mask of its low 8 bits.

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, ExtractResult};

/// A parsed bits specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitsValue {
    /// Number of most-significant bits to take, 1..=8.
    Count(u8),
    /// Explicit 8-bit mask of the positions to take.
    Mask(u8),
}

impl BitsValue {
    /// Parse a single bits token: `"3"`, `"0x88"`, `"0b101"`, `"0011"`.
    ///
    /// The literal `"1"` is always a count of one bit (the MSB), never the
    /// mask `0b00000001`; the branch is checked before the binary grammar on
    /// purpose and callers depend on it.
    pub fn parse_single(s: &str) -> ExtractResult<Self> {
        // catch NOT A BINARY MASK early
        if s == "1" {
            return Ok(BitsValue::Count(1));
        }
        let invalid = || ExtractError::InvalidBitsValue(s.to_string());
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return Ok(BitsValue::Mask((v & 0xff) as u8));
        }
        if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
            let v = u32::from_str_radix(bin, 2).map_err(|_| invalid())?;
            return Ok(BitsValue::Mask((v & 0xff) as u8));
        }
        if !s.is_empty() && s.bytes().all(|b| b == b'0' || b == b'1') {
            // bare binary digits are still a mask
            let v = u32::from_str_radix(s, 2).map_err(|_| invalid())?;
            return Ok(BitsValue::Mask((v & 0xff) as u8));
        }
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let v: u32 = s.parse().map_err(|_| invalid())?;
            if (1..=8).contains(&v) {
                return Ok(BitsValue::Count(v as u8));
            }
            return Ok(BitsValue::Mask((v & 0xff) as u8));
        }
        Err(invalid())
    }

    /// Parse a full bits option: comma-separated values and `a-b` ranges,
    /// e.g. `"1,3,5"` or `"1-4"` or `"0x0f"`. Duplicates collapse.
    ///
    /// Ranges expand over the count interpretation only; a mask endpoint
    /// (`"0x80-3"`) is rejected.
    pub fn parse_list(s: &str) -> ExtractResult<Vec<BitsValue>> {
        let mut out = Vec::new();
        let push = |v: BitsValue, out: &mut Vec<BitsValue>| {
            if !out.contains(&v) {
                out.push(v);
            }
        };
        for part in s.split(',') {
            if let Some((lo, hi)) = part.split_once('-') {
                match (Self::parse_single(lo)?, Self::parse_single(hi)?) {
                    (BitsValue::Count(a), BitsValue::Count(b)) if a <= b => {
                        for n in a..=b {
                            push(BitsValue::Count(n), &mut out);
                        }
                    }
                    _ => return Err(ExtractError::InvalidBitsValue(part.to_string())),
                }
            } else {
                push(Self::parse_single(part)?, &mut out);
            }
        }
        Ok(out)
    }

    /// Resolve to the ordered list of single-bit masks.
    ///
    /// Always most-significant-first: a count of N yields bit 7 down to
    /// bit 8-N; an explicit mask yields the masks of its set bits scanned
    /// bit 7 down to bit 0. The packing endianness chosen later never
    /// changes this order.
    pub fn masks(&self) -> Vec<u8> {
        match *self {
            BitsValue::Count(n) => {
                let n = n.min(8) as u32;
                (0..n).map(|i| 1u8 << (7 - i)).collect()
            }
            BitsValue::Mask(m) => (0..8u32)
                .rev()
                .map(|b| 1u8 << b)
                .filter(|mask| m & mask != 0)
                .collect(),
        }
    }
}
