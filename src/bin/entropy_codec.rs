//! Minimal CLI front-end: read a file, encode, decode, compare, report the
//! compression ratio. This binary owns file I/O and argument parsing,
//! nothing else. Shaped after a "decode, compare, report, exit non-zero on
//! mismatch" CLI, simplified to a single in-process round-trip.

use std::fs;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use entropy_codec::{codec, Algorithm};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlgorithmArg {
    Ac,
    Rans,
    MultiLaneRans,
}

/// Round-trip a file through one of the codec's static-model algorithms.
#[derive(Parser, Debug)]
#[command(name = "entropy-codec", version, about)]
struct Cli {
    /// Which core to use.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Rans)]
    algorithm: AlgorithmArg,

    /// Number of interleaved lanes, only used with --algorithm multi-lane-rans.
    #[arg(long, default_value_t = 4)]
    num_lanes: u8,

    /// File to encode and round-trip.
    path: std::path::PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let data = match fs::read(&cli.path) {
        Ok(d) => d,
        Err(e) => {
            log::error!("failed to read {}: {e}", cli.path.display());
            return ExitCode::FAILURE;
        }
    };

    let algorithm = match cli.algorithm {
        AlgorithmArg::Ac => Algorithm::Ac,
        AlgorithmArg::Rans => Algorithm::Rans,
        AlgorithmArg::MultiLaneRans => Algorithm::MultiLaneRans { num_lanes: cli.num_lanes },
    };

    let artifact = match codec::encode(&data, algorithm) {
        Ok(a) => a,
        Err(e) => {
            log::error!("encode failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let encoded_bytes = artifact.payload.len();
    let artifact_for_decode = artifact.clone();
    let decoded = match codec::decode(artifact_for_decode) {
        Ok(d) => d,
        Err(e) => {
            log::error!("decode failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if decoded != data {
        log::error!("round-trip mismatch: decoded output does not match the original file");
        return ExitCode::FAILURE;
    }

    if data.is_empty() {
        println!("{}: empty input, nothing to compress", cli.path.display());
    } else {
        let ratio = data.len() as f64 / encoded_bytes.max(1) as f64;
        println!(
            "{}: {} bytes -> {} bytes ({:.2}x, algorithm={})",
            cli.path.display(),
            data.len(),
            encoded_bytes,
            ratio,
            algorithm.name()
        );
    }

    ExitCode::SUCCESS
}
