//! Static-model entropy codec: exact-rational arithmetic coding, single-state
//! rANS, and multi-lane interleaved rANS, all built on a shared static
//! frequency-table quantizer.
//!
//! See [`codec::encode`] / [`codec::decode`] for the façade entry points.

pub mod ac;
pub mod bitstream;
pub mod codec;
pub mod count;
pub mod error;
pub mod model;
pub mod multi_lane_rans;
pub mod rans;

pub use codec::{decode, encode, Algorithm, Artifact, RansState};
pub use error::{CodecError, Result};

