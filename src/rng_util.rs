/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draw from a normal distribution with mean 0 via Box–Muller.
#[inline]
pub(crate) fn normal(rng: &mut fastrand::Rng, sigma: f64) -> f64 {
    // 1 - f64() keeps the argument of ln strictly positive.
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    sigma * (-2.0 * u1.ln()).sqrt() * (core::f64::consts::TAU * u2).cos()
}
