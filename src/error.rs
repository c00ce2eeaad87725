//! The crate's unified error type.
//!
//! Shaped after `symphonia-core`'s hand-rolled `SymphoniaError`: a plain enum
//! with a manual `Display` impl, no `thiserror`. All façade entry points
//! return `Result<T, CodecError>`; the codec is a pure function and never
//! retries or partially recovers from a bad input.

use std::fmt;

/// All errors this crate can return.
#[derive(Debug)]
pub enum CodecError {
    /// The alphabet is larger than the requested denominator, or an unknown
    /// algorithm name/parameter was given.
    InvalidInput(&'static str),
    /// The frequency-table adjustment loop could not reach `sum(F) == M`
    /// without violating `F[i] >= 1`. Unreachable when `|A| <= M`.
    FrequencyQuantizationFailure,
    /// The bitstream could not be decoded: residual bits, a state-invariant
    /// violation, an inconsistent multi-lane header, or a slot lookup miss.
    DecodeError(&'static str),
    /// The artifact's header is missing fields, has out-of-range values, or
    /// is internally inconsistent (e.g. `sum(F) != M`, `|A| != |F|`).
    CorruptArtifact(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CodecError::FrequencyQuantizationFailure => {
                write!(f, "frequency table quantization failed to reach target sum")
            }
            CodecError::DecodeError(msg) => write!(f, "decode error: {msg}"),
            CodecError::CorruptArtifact(msg) => write!(f, "corrupt artifact: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

pub type Result<T> = std::result::Result<T, CodecError>;
