//! N-lane interleaved rANS core.
//!
//! `num_lanes` independent rANS states code alternating positions of the
//! input, all sharing one renormalization bitstream. The decoder must visit
//! lanes in the exact reverse of the encoder's visitation order; `rem = N mod
//! num_lanes` pins down which lane produced the last input symbol. Built on
//! the same [`crate::rans::encode_step`]/[`decode_step`] primitives as the
//! single-lane core, interleaved rather than serialized.

use crate::bitstream::{RansBitSink, RansBitSource};
use crate::error::{CodecError, Result};
use crate::model::Model;
use crate::rans::{decode_step, encode_step, RansParams};

pub const DEFAULT_NUM_LANES: u8 = 4;

/// Encode `data` across `num_lanes` interleaved rANS states. Returns the
/// final per-lane states, `rem = data.len() % num_lanes`, and the shared
/// payload.
pub fn encode(
    data: &[u8],
    model: &Model,
    params: &RansParams,
    num_lanes: u8,
) -> Result<(Vec<u64>, usize, Vec<u8>)> {
    if num_lanes == 0 {
        return Err(CodecError::InvalidInput("num_lanes must be at least 1"));
    }
    let num_lanes = num_lanes as usize;
    let rem = data.len() % num_lanes;

    if data.is_empty() {
        return Ok((vec![params.l; num_lanes], 0, Vec::new()));
    }

    let mut x = vec![params.l; num_lanes];
    let mut sink = RansBitSink::new();
    let mut lane_id = 0usize;

    for &s in data {
        let idx = model
            .index_of(s)
            .ok_or(CodecError::InvalidInput("symbol not present in the frequency model"))?;
        debug_assert!(params.l <= x[lane_id] && x[lane_id] < params.bl, "lane state invariant violated before push");
        encode_step(&mut x[lane_id], params, model, idx, &mut sink);
        lane_id = (lane_id + 1) % num_lanes;
    }

    log::debug!(
        "multi_lane_rans::encode: {} symbols, {} lanes, rem={}, final states {:?}",
        data.len(),
        num_lanes,
        rem,
        x
    );
    Ok((x, rem, sink.into_bytes()))
}

/// Decode `length` symbols, given the final per-lane states, `rem`, and the
/// model/params used during encoding.
pub fn decode(
    length: usize,
    mut states: Vec<u64>,
    rem: usize,
    payload: Vec<u8>,
    model: &Model,
    params: &RansParams,
) -> Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }
    model.validate()?;

    let num_lanes = states.len();
    if num_lanes == 0 {
        return Err(CodecError::CorruptArtifact("multi-lane header has zero lanes"));
    }
    if length % num_lanes != rem {
        return Err(CodecError::CorruptArtifact("rem is inconsistent with length and num_lanes"));
    }

    let mut source = RansBitSource::new(payload)?;
    let mut out = Vec::with_capacity(length);
    let mut lane_id = (rem + num_lanes - 1) % num_lanes;

    for _ in 0..length {
        if !(params.l <= states[lane_id] && states[lane_id] < params.bl) {
            return Err(CodecError::DecodeError("lane state invariant violated during decode"));
        }
        out.push(decode_step(&mut states[lane_id], params, model, &mut source)?);
        lane_id = (lane_id + num_lanes - 1) % num_lanes;
    }

    out.reverse();
    Ok(out)
}
