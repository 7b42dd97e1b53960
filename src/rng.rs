//! The random-variate engine the samplers draw from.
//!
//! Every sampler in this crate is generic over [`RngDraw`], so any
//! [`rand::Rng`] works out of the box and tests can substitute scripted
//! engines that replay fixed sequences.

use rand::{Rng, prelude::Distribution};
use statrs::distribution::{Exp, Gamma, Normal};

/// Unified interface for the primitive draws the samplers consume.
///
/// Each call advances the engine's hidden state. The samplers only branch on
/// the returned values, never on the state itself.
pub trait RngDraw {
    /// Sample from the standard uniform distribution on `[0, 1)`.
    fn sample_unif(&mut self) -> f64;

    /// Sample from the Exp(1) distribution.
    fn sample_exp(&mut self) -> f64;

    /// Sample from Gamma(`shape`, rate = 1).
    fn sample_gamma(&mut self, shape: f64) -> f64;

    /// Sample from the (untruncated) Inverse-Gaussian distribution IG(`mu`, `lambda`).
    fn sample_wald(&mut self, mu: f64, lambda: f64) -> f64;
}

impl<R: Rng + ?Sized> RngDraw for R {
    #[inline(always)]
    fn sample_unif(&mut self) -> f64 {
        self.r#gen::<f64>()
    }

    #[inline(always)]
    fn sample_exp(&mut self) -> f64 {
        Exp::new(1.0).expect("Exp(1) is always valid").sample(self)
    }

    /// An invalid shape yields NaN instead of a panic, matching the
    /// NaN-propagating contract of the numeric core.
    #[inline(always)]
    fn sample_gamma(&mut self, shape: f64) -> f64 {
        Gamma::new(shape, 1.0).map_or(f64::NAN, |gamma| gamma.sample(self))
    }

    /// Michael, Schucany & Haas (1976) transformation of a chi-square(1) variate.
    ///
    /// The smaller root of the quadratic is written as `mu / (1 + r + sqrt(r(r + 2)))`
    /// with `r = mu * y / (2 * lambda)`, which avoids the cancellation of the
    /// textbook form `mu + mu*r - mu*sqrt(r(r + 2))` when `mu * y` is large.
    #[inline(always)]
    fn sample_wald(&mut self, mu: f64, lambda: f64) -> f64 {
        let normal_sample = Normal::standard().sample(self);
        let r = 0.5 * mu * normal_sample * normal_sample / lambda;
        let sample = mu / (1.0 + r + (r * (r + 2.0)).sqrt());

        if self.sample_unif() > mu / (mu + sample) {
            mu * mu / sample
        } else {
            sample
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn wald_moments_match_theory() {
        let (mu, lambda) = (1.5, 2.0);
        let n = 100_000;
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..n).map(|_| rng.sample_wald(mu, lambda)).collect();
        assert!(draws.iter().all(|&x| x > 0.0 && x.is_finite()));

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        // E[X] = mu, Var[X] = mu^3 / lambda
        assert!((mean - mu).abs() / mu < 0.02, "mean {mean}");
        let th_var = mu.powi(3) / lambda;
        assert!((var - th_var).abs() / th_var < 0.08, "var {var}");
    }

    #[test]
    fn wald_is_stable_for_huge_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let x = rng.sample_wald(1e8, 1.0);
            assert!(x > 0.0 && x.is_finite(), "bad draw {x}");
        }
    }

    #[test]
    fn invalid_gamma_shape_is_nan() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(rng.sample_gamma(-1.0).is_nan());
        assert!(rng.sample_gamma(2.0) >= 0.0);
    }

    #[test]
    fn uniform_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let u = rng.sample_unif();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
