//! Bit packing under an output byte limit
//!
//! Groups every 8 extracted bits into one output byte under the requested
//! endianness, emitting each byte the instant it completes. Once the byte
//! count reaches the limit the packer signals stop upstream; incomplete
//! trailing bits are discarded, never padded.

use crate::params::BitOrder;

/// Accumulates a bitstream into limited output bytes.
#[derive(Debug)]
pub struct BitPacker {
    order: BitOrder,
    limit: u64,
    out: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitPacker {
    /// `limit` is the output byte cap and must be positive (specs normalize
    /// 0 to the unbounded sentinel before reaching here).
    pub fn new(order: BitOrder, limit: u64) -> Self {
        Self {
            order,
            limit,
            out: Vec::new(),
            current: 0,
            filled: 0,
        }
    }

    /// Append one extracted bit. Returns `false` once the limit is
    /// satisfied and no further bits are wanted.
    pub fn push(&mut self, bit: bool) -> bool {
        if self.is_full() {
            return false;
        }
        match self.order {
            BitOrder::MsbFirst => self.current = (self.current << 1) | bit as u8,
            BitOrder::LsbFirst => self.current |= (bit as u8) << self.filled,
        }
        self.filled += 1;
        if self.filled == 8 {
            self.out.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
        !self.is_full()
    }

    /// Whether the byte limit has been reached.
    pub fn is_full(&self) -> bool {
        self.out.len() as u64 >= self.limit
    }

    /// Completed bytes, dropping any partial trailing group.
    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(order: BitOrder, limit: u64, bits: &[u8]) -> Vec<u8> {
        let mut packer = BitPacker::new(order, limit);
        for &b in bits {
            if !packer.push(b != 0) {
                break;
            }
        }
        packer.finish()
    }

    #[test]
    fn test_msb_first_packing() {
        let bits = [1, 0, 1, 0, 0, 0, 0, 1];
        assert_eq!(pack(BitOrder::MsbFirst, 10, &bits), vec![0b1010_0001]);
    }

    #[test]
    fn test_lsb_first_packing() {
        let bits = [1, 0, 1, 0, 0, 0, 0, 1];
        assert_eq!(pack(BitOrder::LsbFirst, 10, &bits), vec![0b1000_0101]);
    }

    #[test]
    fn test_limit_stops_instantly() {
        let mut packer = BitPacker::new(BitOrder::MsbFirst, 1);
        for i in 0..8 {
            let more = packer.push(i % 2 == 0);
            assert_eq!(more, i < 7);
        }
        // limit satisfied, further bits refused
        assert!(!packer.push(true));
        assert_eq!(packer.finish(), vec![0b1010_1010]);
    }

    #[test]
    fn test_partial_trailing_bits_discarded() {
        let bits = [1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1];
        assert_eq!(pack(BitOrder::MsbFirst, 10, &bits), vec![0xff]);
    }

    #[test]
    fn test_round_trip_through_bit_positions() {
        // packing then unpacking with the same order reproduces the bits
        let bits = [0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 1, 1];
        let packed = pack(BitOrder::MsbFirst, 10, &bits);
        let mut unpacked = Vec::new();
        for byte in packed {
            for i in (0..8).rev() {
                unpacked.push((byte >> i) & 1);
            }
        }
        assert_eq!(unpacked, bits);
    }
}
