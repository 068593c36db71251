//! One dimensional integer Haar lifting steps.
//!
//! The forward step maps a sample pair `(x0, x1)` onto
//! `a = floor((x0 + x1) / 2)` and `d = x0 - x1`, the inverse recovers
//! `x0 = a + floor((d + 1) / 2)` and `x1 = x0 - d`.
//! Both use floor division, also for negative operands, which makes
//! `inverse_pair(forward_pair(x0, x1)) == (x0, x1)` and
//! `forward_pair(inverse_pair(a, d)) == (a, d)` hold for every integer.
//!
//! Coefficients are `i64`. Two levels of pair sums and differences of `i32`
//! samples stay within `±2^33`, so no `i32` input can overflow.

/// forward lifting step for one pair
#[inline]
pub fn forward_pair(x0: i64, x1: i64) -> (i64, i64) {
    ((x0 + x1).div_euclid(2), x0 - x1)
}

/// inverse lifting step for one pair
#[inline]
pub fn inverse_pair(approximation: i64, detail: i64) -> (i64, i64) {
    let x0 = approximation + (detail + 1).div_euclid(2);
    (x0, x0 - detail)
}

/// Splits `samples` into `(approximation, detail)`, each `ceil(len / 2)` long.
///
/// An odd length is padded by repeating the last sample.
pub fn forward(samples: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let pairs = samples.len().div_ceil(2);
    let mut approximation = Vec::with_capacity(pairs);
    let mut detail = Vec::with_capacity(pairs);

    for pair in samples.chunks(2) {
        let x0 = pair[0];
        let x1 = pair.get(1).copied().unwrap_or(x0);
        let (a, d) = forward_pair(x0, x1);
        approximation.push(a);
        detail.push(d);
    }

    (approximation, detail)
}

/// Merges `approximation` and `detail` back into `len` samples,
/// dropping the padding sample if `len` is odd.
pub fn inverse(approximation: &[i64], detail: &[i64], len: usize) -> Vec<i64> {
    let mut samples = Vec::with_capacity(approximation.len() * 2);
    for (&a, &d) in approximation.iter().zip(detail) {
        let (x0, x1) = inverse_pair(a, d);
        samples.push(x0);
        samples.push(x1);
    }
    samples.truncate(len);

    samples
}
