//! Static frequency-table quantization.
//!
//! Builds the alphabet, quantized frequency table and cumulative table for a
//! byte buffer. Used directly by the rANS cores (with `M` fixed to a power of
//! two) and reused by the AC core with `M` set to the unquantized total count,
//! in which case the adjustment loop is a no-op (the provisional table already
//! sums to `M`).

use crate::error::{CodecError, Result};

/// Alphabet, frequency table and cumulative table built from an input
/// buffer, quantized so that `freq` sums exactly to `denom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Sorted distinct byte values observed in the input.
    pub alphabet: Vec<u8>,
    /// `freq[i]` is the number of slots assigned to `alphabet[i]`. Always
    /// `>= 1`, sums to `denom`.
    pub freq: Vec<u32>,
    /// Exclusive prefix sum of `freq`; `cum[0] == 0`, strictly increasing.
    pub cum: Vec<u32>,
    /// Target sum of `freq` (`M` in the spec).
    pub denom: u32,
}

impl Model {
    /// Index of `symbol` in the alphabet, or `None` if absent.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.alphabet.binary_search(&symbol).ok()
    }

    /// Find the alphabet index `i` such that `cum[i] <= slot < cum[i] + freq[i]`.
    pub fn find_slot(&self, slot: u32) -> Result<usize> {
        for i in 0..self.freq.len() {
            let lo = self.cum[i];
            let hi = lo + self.freq[i];
            if lo <= slot && slot < hi {
                return Ok(i);
            }
        }
        Err(CodecError::DecodeError("slot lookup failed: no symbol owns this slot"))
    }

    /// Sanity-check an artifact-supplied model: `|A| == |F|`, `sum(F) ==
    /// denom`, `F[i] >= 1`, `cum` matches `freq`'s prefix sum.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.len() != self.freq.len() || self.freq.len() != self.cum.len() {
            return Err(CodecError::CorruptArtifact("alphabet/freq/cum length mismatch"));
        }
        let mut running = 0u32;
        for (i, &f) in self.freq.iter().enumerate() {
            if f == 0 {
                return Err(CodecError::CorruptArtifact("frequency table contains a zero entry"));
            }
            if self.cum[i] != running {
                return Err(CodecError::CorruptArtifact("cumulative table inconsistent with frequencies"));
            }
            running = running.checked_add(f).ok_or(CodecError::CorruptArtifact("frequency sum overflow"))?;
        }
        if running != self.denom {
            return Err(CodecError::CorruptArtifact("sum(F) != M"));
        }
        Ok(())
    }
}

/// Build `(A, F, C)` from `data`, quantized to sum exactly to `denom`.
///
/// Fails with [`CodecError::InvalidInput`] if the alphabet is larger than
/// `denom`. Empty input yields an empty model (`alphabet`, `freq`, `cum` all
/// empty).
pub fn build_model(data: &[u8], denom: u32) -> Result<Model> {
    if data.is_empty() {
        return Ok(Model { alphabet: Vec::new(), freq: Vec::new(), cum: Vec::new(), denom });
    }

    let mut counts = [0usize; 256];
    crate::count::simple_count_u8(data, &mut counts);

    let alphabet: Vec<u8> = (0u16..256).filter(|&b| counts[b as usize] > 0).map(|b| b as u8).collect();
    if alphabet.len() as u32 > denom {
        return Err(CodecError::InvalidInput("alphabet larger than the target denominator"));
    }

    let n: Vec<u32> = alphabet.iter().map(|&b| counts[b as usize] as u32).collect();
    let m2: u64 = n.iter().map(|&x| x as u64).sum();

    let mut f: Vec<u32> = n
        .iter()
        .map(|&ni| {
            let provisional = (ni as u64 * denom as u64) / m2;
            provisional.max(1) as u32
        })
        .collect();

    let mut sum: i64 = f.iter().map(|&x| x as i64).sum();
    let target = denom as i64;

    while sum < target {
        // argmax_i (n_i - F[i]), lowest index wins ties.
        let mut best = 0usize;
        let mut best_v = i64::MIN;
        for i in 0..f.len() {
            let v = n[i] as i64 - f[i] as i64;
            if v > best_v {
                best_v = v;
                best = i;
            }
        }
        f[best] += 1;
        sum += 1;
    }
    while sum > target {
        // argmax_i F[i] among those with F[i] > 1, lowest index wins ties.
        let mut best: Option<usize> = None;
        let mut best_v = 0u32;
        for i in 0..f.len() {
            if f[i] > 1 && f[i] > best_v {
                best_v = f[i];
                best = Some(i);
            }
        }
        match best {
            Some(i) => {
                f[i] -= 1;
                sum -= 1;
            }
            None => return Err(CodecError::FrequencyQuantizationFailure),
        }
    }

    debug_assert_eq!(sum, target);
    log::trace!("build_model: |A|={} M={} F={:?}", alphabet.len(), denom, f);

    let mut cum = Vec::with_capacity(f.len());
    let mut acc = 0u32;
    for &fi in &f {
        cum.push(acc);
        acc += fi;
    }

    Ok(Model { alphabet, freq: f, cum, denom })
}
