//! Exact-rational arithmetic coding core.
//!
//! Narrows `[L, U) ⊂ [0, 1)` per symbol and emits the shortest bit prefix
//! that lies strictly inside the final interval.
//!
//! Every interval endpoint in one encode/decode call is `count / m2` for the
//! same `m2` (the input's total symbol count), so all the rational
//! arithmetic here shares one denominator and reduces to exact `u128` integer
//! arithmetic. No bignum dependency is needed for the documented 1 MiB
//! round-trip guarantee.

use crate::bitstream::AcBitStream;
use crate::error::{CodecError, Result};
use crate::model::{build_model, Model};

/// A rational with a denominator shared across one encode/decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rational128 {
    num: u128,
    den: u128,
}

impl Rational128 {
    fn new(num: u128, den: u128) -> Self {
        Self { num, den }
    }

    fn zero(den: u128) -> Self {
        Self { num: 0, den }
    }

    fn sub(self, other: Rational128) -> Rational128 {
        debug_assert_eq!(self.den, other.den);
        Rational128::new(self.num - other.num, self.den)
    }

    /// `ceil(self * 2^k)` as an integer.
    fn ceil_mul_pow2(self, k: u32) -> u128 {
        let scaled_num = self.num << k;
        (scaled_num + self.den - 1) / self.den
    }

    fn le(self, other: Rational128) -> bool {
        self.num * other.den <= other.num * self.den
    }

    fn lt(self, other: Rational128) -> bool {
        self.num * other.den < other.num * self.den
    }
}

/// Build the per-symbol cumulative rational table `Cf[i] = cum[i+1] / m2`
/// (inclusive prefix sums) from a [`Model`] built with `denom == m2`.
fn cumulative_rationals(model: &Model) -> Vec<Rational128> {
    let m2 = model.denom as u128;
    let mut out = Vec::with_capacity(model.freq.len());
    let mut acc = 0u128;
    for &f in &model.freq {
        acc += f as u128;
        out.push(Rational128::new(acc, m2));
    }
    out
}

fn symbol_bounds(cf: &[Rational128], m2: u128, i: usize) -> (Rational128, Rational128) {
    let lo = if i == 0 { Rational128::zero(m2) } else { cf[i - 1] };
    (lo, cf[i])
}

/// Find the shortest bit string `w` (as `(value, k)`) such that the dyadic
/// interval `[n/2^k, (n+1)/2^k)` is strictly contained in `[lo, hi)`.
fn shortest_covering_prefix(lo: Rational128, hi: Rational128) -> (u128, u32) {
    let width = hi.sub(lo);
    debug_assert!(width.num > 0);

    // k := ceil(-log2(width)).
    let mut k: u32 = 0;
    {
        let mut probe = 1u128; // 2^k
        while probe * width.num < width.den {
            probe <<= 1;
            k += 1;
        }
    }

    loop {
        let n = lo.ceil_mul_pow2(k);
        // n + 1 < hi * 2^k  <=>  (n+1) * hi.den < hi.num * 2^k
        let lhs = (n + 1) * hi.den;
        let rhs = hi.num << k;
        if lhs < rhs {
            return (n, k);
        }
        k += 1;
    }
}

/// Encode `data` with AC. Returns the bitstream and the model used (built
/// off raw, unquantized counts; AC has no need for a power-of-two
/// denominator).
pub fn encode(data: &[u8]) -> Result<(AcBitStream, Model)> {
    let mut out = AcBitStream::new();
    if data.is_empty() {
        return Ok((out, Model { alphabet: Vec::new(), freq: Vec::new(), cum: Vec::new(), denom: 0 }));
    }

    let model = build_model(data, data.len() as u32)?;
    let cf = cumulative_rationals(&model);
    let m2 = model.denom as u128;

    for &s in data {
        let idx = model
            .index_of(s)
            .ok_or(CodecError::InvalidInput("symbol not present in the frequency model"))?;
        let (lo, hi) = symbol_bounds(&cf, m2, idx);
        let (n, k) = shortest_covering_prefix(lo, hi);
        out.push_bits(n, k);
    }

    log::debug!("ac::encode: {} symbols, {} bits emitted", data.len(), out.len());
    Ok((out, model))
}

/// Decode `length` symbols from `bits`, given the model used to encode them.
pub fn decode(length: usize, bits: &AcBitStream, model: &Model) -> Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }
    if model.alphabet.is_empty() {
        return Err(CodecError::CorruptArtifact("AC model is empty but length > 0"));
    }

    let cf = cumulative_rationals(model);
    let m2 = model.denom as u128;

    let mut out = Vec::with_capacity(length);
    // L = num / 2^nbits is the binary fraction 0.b1 b2 ... bn read so far;
    // U = L + 2^-nbits = (num + 1) / 2^nbits.
    let mut num: u128 = 0;
    let mut nbits: u32 = 0;
    let mut i = 0usize;

    while i < bits.len() {
        nbits += 1;
        num = (num << 1) | (bits.bit_at(i) as u128);
        i += 1;

        let scale = 1u128 << nbits;
        let lo = Rational128::new(num, scale);
        let hi = Rational128::new(num + 1, scale);

        if let Some(j) = find_symbol(&cf, m2, lo, hi) {
            out.push(model.alphabet[j]);
            num = 0;
            nbits = 0;

            if out.len() == length {
                if i != bits.len() {
                    return Err(CodecError::DecodeError("AC payload has residual bits after the last symbol"));
                }
                return Ok(out);
            }
        }
    }

    Err(CodecError::DecodeError("AC payload exhausted before decoding the expected number of symbols"))
}

fn find_symbol(cf: &[Rational128], m2: u128, lo: Rational128, hi: Rational128) -> Option<usize> {
    for j in 0..cf.len() {
        let (range_lo, range_hi) = symbol_bounds(cf, m2, j);
        if range_lo.le(lo) && hi.lt(range_hi) {
            return Some(j);
        }
    }
    None
}
