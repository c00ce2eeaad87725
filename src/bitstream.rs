//! Bit sink / bit source.
//!
//! rANS treats its payload as a stack of fixed-width `k`-bit groups: writes
//! during encode are consumed in the opposite order during decode. This is
//! exactly what `tiny-bitstream`'s `BitEstream`/`BitDstream` pair gives us.
//!
//! AC instead treats its payload as a plain forward bit sequence (append one
//! bit at a time while encoding, read bits in order while decoding), so it
//! gets its own minimal type rather than being forced through the rANS
//! sink/source.

use tiny_bitstream::{BitDstream, BitEstream, BitReader, BitWriter};

use crate::error::{CodecError, Result};

/// Append-only sink of `k`-bit groups, consumed LIFO by [`RansBitSource`].
pub struct RansBitSink {
    estream: BitEstream,
}

impl RansBitSink {
    pub fn new() -> Self {
        Self { estream: BitEstream::new() }
    }

    /// Append the `k`-bit representation of `value` to the stream.
    pub fn write_bits(&mut self, value: u64, k: u32) {
        self.estream.unchecked_write(value, k as u8);
    }

    /// Finish writing and return the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.estream
            .try_into()
            .expect("bit-packing a byte-aligned stream never fails")
    }
}

impl Default for RansBitSink {
    fn default() -> Self {
        Self::new()
    }
}

/// LIFO reader over the bytes written by a [`RansBitSink`]: each `read_bits`
/// call pops the most-recently-written group first.
pub struct RansBitSource {
    dstream: BitDstream,
}

impl RansBitSource {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        let mut dstream: BitDstream = bytes
            .try_into()
            .map_err(|_| CodecError::CorruptArtifact("payload is not a valid packed bitstream"))?;
        // tiny-bitstream embeds a leading alignment marker bit when packing;
        // consume and discard it before reading real renormalization groups.
        dstream
            .read(1)
            .map_err(|_| CodecError::DecodeError("payload truncated: missing alignment marker"))?;
        Ok(Self { dstream })
    }

    /// Pop the next `k`-bit group from the tail of the stream.
    pub fn read_bits(&mut self, k: u32) -> Result<u64> {
        self.dstream
            .read(k as u8)
            .map(|v| v as u64)
            .map_err(|_| CodecError::DecodeError("payload truncated: not enough bits remaining"))
    }
}

/// Forward (FIFO) bit sequence used by the AC core: `push_bit` appends,
/// `bit_at` reads back in the same order bits were appended.
#[derive(Debug, Default, Clone)]
pub struct AcBitStream {
    bits: Vec<bool>,
}

impl AcBitStream {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the `k`-bit big-endian representation of `value`.
    pub fn push_bits(&mut self, value: u128, k: u32) {
        for i in (0..k).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit_at(&self, i: usize) -> bool {
        self.bits[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Pack into bytes, big-endian within each byte, zero-padded at the end.
    pub fn to_bytes(&self) -> (Vec<u8>, u32) {
        let nbits = self.bits.len() as u32;
        let mut out = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        (out, nbits)
    }

    /// Reconstruct from packed bytes and an exact bit count.
    pub fn from_bytes(bytes: &[u8], nbits: u32) -> Self {
        let mut bits = Vec::with_capacity(nbits as usize);
        for i in 0..nbits as usize {
            let byte = bytes[i / 8];
            bits.push((byte >> (7 - (i % 8))) & 1 == 1);
        }
        Self { bits }
    }
}
