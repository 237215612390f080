//! Integer and statistical helpers shared by the pre-flight oracle and
//! the balance scorer

use num_traits::PrimInt;

/// Greatest common divisor by Euclid's method
///
/// `gcd(a, 0)` and `gcd(0, a)` both return `a`.
pub fn gcd<T: PrimInt>(a: T, b: T) -> T {
    let mut a = a;
    let mut b = b;
    while b != T::zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Fold `gcd` over a sequence of values
///
/// Returns `None` for an empty sequence.
pub fn gcd_all<T, I>(values: I) -> Option<T>
where
    T: PrimInt,
    I: IntoIterator<Item = T>,
{
    values.into_iter().reduce(gcd)
}

/// Population mean and variance of a sample
///
/// An empty sample yields `(0.0, 0.0)`.
pub fn mean_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}
