use crate::config::TRUNCATION;
use crate::jacobi::{SamplingContext, sample_jacobi, sample_jacobi_zero};
use crate::rng::RngDraw;
use crate::special::inverse_gaussian_cdf;

use std::f64::consts::{FRAC_PI_2, LN_2, PI};
const PI_SQ: f64 = PI * PI;

/// Draw a quarter of the sum of `n` independent J*(1, `z`) variates using Devroye's algorithm.
///
/// Each J*(1, z) is drawn by rejection from a mixture of a truncated inverse Gaussian and an
/// exponential tail (Polson, Scott & Windle 2013, Algorithm 1; Devroye 2009). The result is
/// distributed as PG(n, 2z), with mean `n tanh(z) / (4z)`: callers holding a Polya-Gamma tilt
/// `c` pass `z = c / 2`, as [`PolyaGamma::draw`](crate::PolyaGamma::draw) does.
///
/// The distribution is symmetric in `z`, so only `|z|` is used. `n = 0` yields 0.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `n` - Number of J*(1, z) draws to sum
/// * `z` - Jacobi tilt (half the Polya-Gamma tilt)
///
/// # Returns
/// An exact draw whose law is PG(n, 2z)
///
/// # Example
/// ```rust
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// use polya_gamma_devroye::sample_devroye;
/// let mut rng = StdRng::seed_from_u64(0);
/// let draw = sample_devroye(&mut rng, 3, 1.5);
/// assert!(draw > 0.0);
/// ```
pub fn sample_devroye<R: RngDraw + ?Sized>(rng: &mut R, n: u64, z: f64) -> f64 {
    let z = z.abs();
    let mut ctx = SamplingContext::default();

    if z == 0.0 {
        let sum: f64 = (0..n).map(|_| sample_jacobi_zero(rng, &mut ctx)).sum();
        return 0.25 * sum;
    }

    ctx.initialize(z);
    ctx.ratio = inverse_gaussian_mass(&ctx, z);

    let sum: f64 = (0..n).map(|_| sample_jacobi(rng, &mut ctx)).sum();
    0.25 * sum
}

/// Probability of proposing from the truncated inverse Gaussian component of J*(1, `z`).
///
/// The masses of the two proposal components are
/// `q = (pi/2) exp(-k T) / k` and `p = 2 exp(-z) F_IG(T | mu, 1)`, and the weight is
/// `p / (p + q)`. It is evaluated as `1 / (1 + exp(log q - log p))` so that it stays
/// finite when both masses underflow for large `z`.
fn inverse_gaussian_mass(ctx: &SamplingContext, z: f64) -> f64 {
    let log_q = FRAC_PI_2.ln() - ctx.k * TRUNCATION - ctx.k.ln();
    let log_p = LN_2 - z + inverse_gaussian_cdf(TRUNCATION, ctx.mu, 1.0).ln();
    1.0 / (1.0 + (log_q - log_p).exp())
}

/// Approximate PG(`h`, 2`z`) by truncating its infinite gamma-convolution representation.
///
/// Computes `0.5 * sum_{n < terms} G_n / (pi^2 (n + 1/2)^2 + z^2)` with `G_n ~ Gamma(h, 1)`,
/// so `z` is the same half tilt that [`sample_devroye`] takes. The dropped tail makes the draw
/// biased low by roughly `h / (2 pi^2 terms)` in expectation; increase `terms` when that
/// matters.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `h` - Positive shape, not necessarily an integer
/// * `z` - Jacobi tilt (half the Polya-Gamma tilt)
/// * `terms` - Number of gamma variates in the truncated series
///
/// # Returns
/// An approximate draw from PG(h, 2z)
///
/// # Example
/// ```rust
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// use polya_gamma_devroye::sample_gamma_convolution;
/// let mut rng = StdRng::seed_from_u64(0);
/// let draw = sample_gamma_convolution(&mut rng, 2.5, 0.7, 200);
/// assert!(draw > 0.0);
/// ```
pub fn sample_gamma_convolution<R: RngDraw + ?Sized>(
    rng: &mut R,
    h: f64,
    z: f64,
    terms: usize,
) -> f64 {
    let z_sq = z * z;
    // smallest terms first
    let sum: f64 = (0..terms)
        .rev()
        .map(|n| {
            let c = n as f64 + 0.5;
            rng.sample_gamma(h) / (PI_SQ * c * c + z_sq)
        })
        .sum();
    0.5 * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONVOLUTION_TERMS;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Analytic mean of a quarter of the sum of `n` J*(1, z) variates, i.e. PG(n, 2z)
    fn quarter_jacobi_mean(n: f64, z: f64) -> f64 {
        if z == 0.0 { n / 4.0 } else { n * z.tanh() / (4.0 * z) }
    }

    fn sample_moments(draws: &[f64]) -> (f64, f64) {
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, var)
    }

    #[test]
    fn mixture_weight_matches_direct_formula() {
        for &z in &[0.01, 0.5, 1.0, 3.0, 10.0] {
            let mut ctx = SamplingContext::default();
            ctx.initialize(z);
            let q = FRAC_PI_2 * (-ctx.k * TRUNCATION).exp() / ctx.k;
            let p = 2.0 * (-z).exp() * inverse_gaussian_cdf(TRUNCATION, ctx.mu, 1.0);
            assert_relative_eq!(inverse_gaussian_mass(&ctx, z), p / (p + q), max_relative = 1e-12);
        }
    }

    #[test]
    fn mixture_weight_is_finite_for_huge_tilt() {
        for &z in &[800.0, 1e4, 1e6] {
            let mut ctx = SamplingContext::default();
            ctx.initialize(z);
            let ratio = inverse_gaussian_mass(&ctx, z);
            assert!((0.0..=1.0).contains(&ratio), "z = {z}: ratio {ratio}");
        }
    }

    #[test]
    fn pg_one_zero_moments() {
        let n = 100_000;
        let mut rng = StdRng::seed_from_u64(1);
        let draws: Vec<f64> = (0..n).map(|_| sample_devroye(&mut rng, 1, 0.0)).collect();
        let (mean, var) = sample_moments(&draws);
        // E = 1/4, Var = 1/24; standard error of the mean is ~6.5e-4
        assert!((mean - 0.25).abs() < 4e-3, "mean {mean}");
        assert!((var - 1.0 / 24.0).abs() / (1.0 / 24.0) < 0.05, "variance {var}");
    }

    #[test]
    fn tilt_sign_is_irrelevant() {
        let a = sample_devroye(&mut StdRng::seed_from_u64(8), 2, 1.3);
        let b = sample_devroye(&mut StdRng::seed_from_u64(8), 2, -1.3);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_shape_is_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_devroye(&mut rng, 0, 1.0), 0.0);
    }

    #[test]
    fn extreme_tilts_stay_finite() {
        let mut rng = StdRng::seed_from_u64(77);
        for &z in &[1e-8, 1e4] {
            for _ in 0..10_000 {
                let x = sample_devroye(&mut rng, 1, z);
                assert!(x.is_finite() && x > 0.0, "z = {z}: {x}");
            }
        }
    }

    #[test]
    fn huge_tilt_mean_matches_theory() {
        let z = 1e4;
        let n = 20_000;
        let mut rng = StdRng::seed_from_u64(12);
        let draws: Vec<f64> = (0..n).map(|_| sample_devroye(&mut rng, 1, z)).collect();
        let (mean, _) = sample_moments(&draws);
        assert_relative_eq!(mean, quarter_jacobi_mean(1.0, z), max_relative = 0.02);
    }

    #[test]
    fn tilt_enters_the_jacobi_kernel_unscaled() {
        // at z = 2 the mean is tanh(2)/8 = 0.1205; halving the tilt again would give 0.1904
        let z = 2.0;
        let n = 100_000;
        let mut rng = StdRng::seed_from_u64(9);
        let draws: Vec<f64> = (0..n).map(|_| sample_devroye(&mut rng, 1, z)).collect();
        let (mean, _) = sample_moments(&draws);
        assert_relative_eq!(mean, 0.25 * z.tanh() / z, max_relative = 0.02);

        let draws: Vec<f64> = (0..n / 5)
            .map(|_| sample_gamma_convolution(&mut rng, 1.0, z, DEFAULT_CONVOLUTION_TERMS))
            .collect();
        let (mean, _) = sample_moments(&draws);
        assert_relative_eq!(mean, 0.25 * z.tanh() / z, max_relative = 0.02);
    }

    #[test]
    fn gamma_convolution_mean_matches_truncated_series() {
        let (h, z) = (1.7, 1.0);
        let n = 20_000;
        let mut rng = StdRng::seed_from_u64(3);
        let draws: Vec<f64> = (0..n)
            .map(|_| sample_gamma_convolution(&mut rng, h, z, DEFAULT_CONVOLUTION_TERMS))
            .collect();
        let (mean, _) = sample_moments(&draws);
        let truncated_mean: f64 = 0.5
            * (0..DEFAULT_CONVOLUTION_TERMS)
                .map(|k| {
                    let c = k as f64 + 0.5;
                    h / (PI_SQ * c * c + z * z)
                })
                .sum::<f64>();
        // the truncated series sits just below the exact mean
        assert!(truncated_mean < quarter_jacobi_mean(h, z));
        assert_relative_eq!(truncated_mean, quarter_jacobi_mean(h, z), max_relative = 2e-3);
        assert_relative_eq!(mean, truncated_mean, max_relative = 0.02);
    }
}
