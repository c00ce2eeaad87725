//! Codec façade: one `encode`/`decode` pair parameterized over which core
//! does the work, carrying the model and state parameters in the artifact
//! header.

use crate::ac;
use crate::error::{CodecError, Result};
use crate::model::{build_model, Model};
use crate::multi_lane_rans::{self, DEFAULT_NUM_LANES};
use crate::rans::{self, RansParams};

/// Which core an [`Artifact`] was produced by / should be decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Ac,
    Rans,
    MultiLaneRans { num_lanes: u8 },
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Ac => "ac",
            Algorithm::Rans => "rans",
            Algorithm::MultiLaneRans { .. } => "multi-lane-rans",
        }
    }

    pub fn parse(name: &str, num_lanes: u8) -> Result<Algorithm> {
        match name {
            "ac" => Ok(Algorithm::Ac),
            "rans" => Ok(Algorithm::Rans),
            "multi-lane-rans" | "multi_lane_rans" => {
                Ok(Algorithm::MultiLaneRans { num_lanes })
            }
            _ => Err(CodecError::InvalidInput("unknown algorithm name")),
        }
    }
}

/// The per-algorithm final rANS state(s); `None` for AC, which has no
/// integer state to freeze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RansState {
    None,
    Single(u64),
    Lanes(Vec<u64>),
}

/// The logical container of a codec result: header fields plus payload.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub algorithm: Algorithm,
    pub length: usize,
    pub model: Model,
    pub params: RansParams,
    pub rem: usize,
    pub state: RansState,
    /// For AC: a packed bit payload plus its exact bit count. For rANS: the
    /// packed renormalization bytes.
    pub payload: Vec<u8>,
    pub payload_bits: u32,
}

/// Encode `data` with the given algorithm.
pub fn encode(data: &[u8], algorithm: Algorithm) -> Result<Artifact> {
    match algorithm {
        Algorithm::Ac => {
            let (bits, model) = ac::encode(data)?;
            let (payload, payload_bits) = bits.to_bytes();
            Ok(Artifact {
                algorithm,
                length: data.len(),
                model,
                params: RansParams::default(),
                rem: 0,
                state: RansState::None,
                payload,
                payload_bits,
            })
        }
        Algorithm::Rans => {
            let params = RansParams::default();
            let model = build_model(data, RansParams::DEFAULT_M)?;
            let (state, payload) = rans::encode(data, &model, &params)?;
            Ok(Artifact {
                algorithm,
                length: data.len(),
                model,
                params,
                rem: 0,
                state: RansState::Single(state),
                payload_bits: (payload.len() * 8) as u32,
                payload,
            })
        }
        Algorithm::MultiLaneRans { num_lanes } => {
            let params = RansParams::default();
            let model = build_model(data, RansParams::DEFAULT_M)?;
            let (states, rem, payload) = multi_lane_rans::encode(data, &model, &params, num_lanes)?;
            Ok(Artifact {
                algorithm,
                length: data.len(),
                model,
                params,
                rem,
                state: RansState::Lanes(states),
                payload_bits: (payload.len() * 8) as u32,
                payload,
            })
        }
    }
}

/// Decode an [`Artifact`] back to its original bytes.
pub fn decode(artifact: Artifact) -> Result<Vec<u8>> {
    match artifact.algorithm {
        Algorithm::Ac => {
            let bits = crate::bitstream::AcBitStream::from_bytes(&artifact.payload, artifact.payload_bits);
            ac::decode(artifact.length, &bits, &artifact.model)
        }
        Algorithm::Rans => {
            let state = match artifact.state {
                RansState::Single(x) => x,
                _ => return Err(CodecError::CorruptArtifact("rANS artifact is missing its single state")),
            };
            rans::decode(artifact.length, state, artifact.payload, &artifact.model, &artifact.params)
        }
        Algorithm::MultiLaneRans { num_lanes } => {
            let states = match artifact.state {
                RansState::Lanes(v) => v,
                _ => return Err(CodecError::CorruptArtifact("multi-lane artifact is missing its lane states")),
            };
            if states.len() != num_lanes as usize {
                return Err(CodecError::CorruptArtifact("num_lanes does not match the number of stored states"));
            }
            multi_lane_rans::decode(artifact.length, states, artifact.rem, artifact.payload, &artifact.model, &artifact.params)
        }
    }
}

/// Convenience: encode with the default multi-lane lane count.
pub fn encode_multi_lane_default(data: &[u8]) -> Result<Artifact> {
    encode(data, Algorithm::MultiLaneRans { num_lanes: DEFAULT_NUM_LANES })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(data: &[u8], algorithm: Algorithm) {
        let artifact = encode(data, algorithm).unwrap();
        assert_eq!(artifact.length, data.len());
        let decoded = decode(artifact).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn empty_input_all_algorithms() {
        for algo in [Algorithm::Ac, Algorithm::Rans, Algorithm::MultiLaneRans { num_lanes: 4 }] {
            let artifact = encode(b"", algo).unwrap();
            assert_eq!(artifact.length, 0);
            assert_eq!(decode(artifact).unwrap(), Vec::<u8>::new());
        }
    }

    #[test]
    fn scenario_2_single_byte_rans_header() {
        let artifact = encode(b"a", Algorithm::Rans).unwrap();
        assert_eq!(artifact.model.alphabet, vec![0x61]);
        assert_eq!(artifact.model.freq, vec![4096]);
        assert_eq!(artifact.model.cum, vec![0]);
        assert_eq!(decode(artifact).unwrap(), b"a");
    }

    #[test]
    fn scenario_3_all_algorithms() {
        let data = b"hello, rans! hello, rans! hello, rans!";
        round_trip(data, Algorithm::Ac);
        round_trip(data, Algorithm::Rans);
        round_trip(data, Algorithm::MultiLaneRans { num_lanes: 4 });

        let artifact = encode(data, Algorithm::MultiLaneRans { num_lanes: 4 }).unwrap();
        assert_eq!(artifact.rem, 38 % 4);
    }

    #[test]
    fn scenario_4_long_singleton_run() {
        round_trip(vec![b'a'; 1000].as_slice(), Algorithm::Rans);
    }

    #[test]
    fn scenario_5_five_symbol_cycle() {
        round_trip(b"abcde".repeat(500).as_slice(), Algorithm::Rans);
    }

    #[test]
    fn scenario_6_full_byte_range_multi_lane() {
        let data: Vec<u8> = (0..=255u8).collect::<Vec<_>>().repeat(10);
        let artifact = encode(&data, Algorithm::MultiLaneRans { num_lanes: 4 }).unwrap();
        assert_eq!(artifact.model.alphabet.len(), 256);
        assert!(artifact.model.freq.iter().all(|&f| f >= 1));
        assert_eq!(decode(artifact).unwrap(), data);
    }

    #[test]
    fn unknown_algorithm_name_is_invalid() {
        let err = Algorithm::parse("zstd", 4).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput(_)));
    }

    #[test]
    fn determinism_repeated_encodes_match() {
        let data = b"determinism check determinism check";
        let a1 = encode(data, Algorithm::Rans).unwrap();
        let a2 = encode(data, Algorithm::Rans).unwrap();
        assert_eq!(a1.model.freq, a2.model.freq);
        assert_eq!(a1.payload, a2.payload);
        assert_eq!(a1.state, a2.state);
    }
}
