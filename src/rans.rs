//! Single-state rANS core.
//!
//! State invariant at every step boundary: `L <= x < b*L`. Encode pushes
//! symbols forward; decode pops them in reverse and the caller must reverse
//! the result. Renormalization and push/pop are wired to the shared
//! [`crate::model::Model`] and [`crate::bitstream`] types.

use crate::bitstream::{RansBitSink, RansBitSource};
use crate::error::{CodecError, Result};
use crate::model::Model;

/// Renormalization parameters shared by the single-lane and multi-lane
/// cores. `k` bits are exchanged per renormalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RansParams {
    pub k: u32,
    pub b: u64,
    pub l: u64,
    pub bl: u64,
}

impl RansParams {
    pub const DEFAULT_K: u32 = 8;
    pub const DEFAULT_L: u64 = 1 << 23;
    pub const DEFAULT_M: u32 = 4096;

    pub fn new(k: u32) -> Self {
        let b = 1u64 << k;
        let l = Self::DEFAULT_L;
        RansParams { k, b, l, bl: b * l }
    }
}

impl Default for RansParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}

/// Advance the encoder state by one symbol: renormalize, then push.
/// Returns the (possibly empty) sequence of emitted `k`-bit groups via
/// `sink`.
pub fn encode_step(x: &mut u64, params: &RansParams, model: &Model, idx: usize, sink: &mut RansBitSink) {
    let fs = model.freq[idx] as u64;
    let cs = model.cum[idx] as u64;
    let m = model.denom as u64;

    let threshold = (params.b * (params.l / m)) * fs;
    while *x >= threshold {
        sink.write_bits(*x % params.b, params.k);
        *x >>= params.k;
    }

    *x = (*x / fs) * m + cs + (*x % fs);
}

/// Reverse of [`encode_step`]: pop the symbol owning `x mod M`, then
/// renormalize by refilling from `source`.
pub fn decode_step(x: &mut u64, params: &RansParams, model: &Model, source: &mut RansBitSource) -> Result<u8> {
    let m = model.denom as u64;
    let slot = (*x % m) as u32;
    let idx = model.find_slot(slot)?;
    let fs = model.freq[idx] as u64;
    let cs = model.cum[idx] as u64;

    *x = (*x / m) * fs + slot as u64 - cs;

    while *x < params.l {
        let bits = source.read_bits(params.k)?;
        *x = (*x << params.k) | bits;
    }

    Ok(model.alphabet[idx])
}

/// Encode `data` against `model` with the given renormalization parameters.
/// Returns the final state and the payload bytes.
pub fn encode(data: &[u8], model: &Model, params: &RansParams) -> Result<(u64, Vec<u8>)> {
    if data.is_empty() {
        return Ok((params.l, Vec::new()));
    }

    let mut x = params.l;
    let mut sink = RansBitSink::new();

    for &s in data {
        let idx = model
            .index_of(s)
            .ok_or(CodecError::InvalidInput("symbol not present in the frequency model"))?;
        debug_assert!(params.l <= x && x < params.bl, "rANS state invariant violated before push");
        encode_step(&mut x, params, model, idx, &mut sink);
    }

    log::debug!("rans::encode: {} symbols, final state {}", data.len(), x);
    Ok((x, sink.into_bytes()))
}

/// Decode `length` symbols from `payload`, given the final encoder state and
/// the model/params used to produce it.
pub fn decode(length: usize, state: u64, payload: Vec<u8>, model: &Model, params: &RansParams) -> Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }
    model.validate()?;

    let mut x = state;
    let mut source = RansBitSource::new(payload)?;
    let mut out = Vec::with_capacity(length);

    for _ in 0..length {
        if !(params.l <= x && x < params.bl) {
            return Err(CodecError::DecodeError("rANS state invariant violated during decode"));
        }
        out.push(decode_step(&mut x, params, model, &mut source)?);
    }

    out.reverse();
    Ok(out)
}
