//! Samplers for the Jacobi kernel J*(1, z).
//!
//! Both samplers draw a candidate from a two-component mixture and then run
//! Devroye's alternating-series test against the coefficients `a_n(x | T)`:
//! the partial sums are alternately lower and upper bounds of the target
//! density at `x`, so a single uniform decides acceptance after a few terms.
//!
//! # References
//! - Devroye, L. (2009). On exact simulation algorithms for some distributions
//!   related to Jacobi theta functions. *Statistics & Probability Letters* 79(21).
//! - Polson, N.G., Scott, J.G., & Windle, J. (2013). Bayesian inference for
//!   logistic models using Polya-Gamma latent variables. *JASA* 108(504).

use crate::config::TRUNCATION;
use crate::rng::RngDraw;
use crate::truncated::right_bounded_inverse_gaussian;
use std::f64::consts::PI;

const PI_SQ: f64 = PI * PI;
/// pi^2 / 8
const PI_SQ_8: f64 = 0.125 * PI_SQ;
/// log(pi / 2)
const LN_FRAC_PI_2: f64 = 0.4515827052894548;

/// Mixture masses of the J*(1, 0) proposal at `T = 2/pi` (Devroye 2009, p. 7).
const JACOBI_ZERO_P: f64 = 0.422599094;
const JACOBI_ZERO_Q: f64 = 0.57810262346829443;
const JACOBI_ZERO_RATIO: f64 = JACOBI_ZERO_P / (JACOBI_ZERO_P + JACOBI_ZERO_Q);

/// Values cached for the duration of one sampling call.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SamplingContext {
    /// Mean of the inverse-Gaussian proposal, `1/z`.
    pub(crate) mu: f64,
    /// Rate of the exponential tail proposal, `pi^2/8 + z^2/2`.
    pub(crate) k: f64,
    /// Probability of drawing from the inverse-Gaussian component.
    pub(crate) ratio: f64,
    /// Current candidate.
    pub(crate) x: f64,
    /// `ln(x)`, cached for the small-`x` coefficients.
    pub(crate) logx: f64,
}

impl SamplingContext {
    /// Precompute the tilt-dependent proposal parameters for `z != 0`.
    pub(crate) fn initialize(&mut self, z: f64) {
        self.mu = 1.0 / z;
        self.k = PI_SQ_8 + 0.5 * z * z;
    }

    #[inline]
    fn set_candidate(&mut self, x: f64) {
        self.x = x;
        self.logx = x.ln();
    }
}

/// How the odd (lower-bound) step of the series test compares `u` with `s`.
///
/// J*(1, 0) accepts on `u < s`, J*(1, z) on `u <= s`. The two tests only
/// differ when `u` lands exactly on a partial sum, which is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acceptance {
    Strict,
    Inclusive,
}

impl Acceptance {
    #[inline(always)]
    pub(crate) fn accepts(self, u: f64, s: f64) -> bool {
        match self {
            Acceptance::Strict => u < s,
            Acceptance::Inclusive => u <= s,
        }
    }
}

/// The `n`-th coefficient `a_n(x | T)` of the alternating series.
///
/// Above `T` the Gaussian-tail form is used; at or below `T` the
/// theta-transformed form, evaluated in the log domain so that neither
/// exponent overflows for small `x`. Both are the same function of `x`.
#[inline]
pub(crate) fn series_term(n: usize, ctx: &SamplingContext) -> f64 {
    let n_plus_half = n as f64 + 0.5;
    let n_plus_half_pi = PI * n_plus_half;
    let x = ctx.x;

    if x > TRUNCATION {
        n_plus_half_pi * (-0.5 * x * n_plus_half_pi * n_plus_half_pi).exp()
    } else if x > 0.0 {
        n_plus_half_pi
            * (-1.5 * (LN_FRAC_PI_2 + ctx.logx) - 2.0 * n_plus_half * n_plus_half / x).exp()
    } else {
        0.0
    }
}

/// Run the alternating-series test for the candidate in `ctx`.
///
/// Returns `true` if the candidate is accepted.
#[inline]
fn series_accepts<R: RngDraw + ?Sized>(
    rng: &mut R,
    ctx: &SamplingContext,
    acceptance: Acceptance,
) -> bool {
    let mut series_sum = series_term(0, ctx);
    let threshold = rng.sample_unif() * series_sum;
    let mut term_index = 0;

    loop {
        term_index += 1;
        let term = series_term(term_index, ctx);

        if term_index % 2 == 1 {
            // partial sum is now a lower bound
            series_sum -= term;
            if acceptance.accepts(threshold, series_sum) {
                return true;
            }
        } else {
            // partial sum is now an upper bound
            series_sum += term;
            if threshold > series_sum {
                return false;
            }
        }
    }
}

/// Sample from J*(1, 0).
pub(crate) fn sample_jacobi_zero<R: RngDraw + ?Sized>(
    rng: &mut R,
    ctx: &mut SamplingContext,
) -> f64 {
    loop {
        let proposal = if rng.sample_unif() < JACOBI_ZERO_RATIO {
            // truncated inverse chi-square below T; 2/T = pi
            let e1 = loop {
                let e1 = rng.sample_exp();
                let e2 = rng.sample_exp();
                if e1 * e1 <= PI * e2 {
                    break e1;
                }
            };
            let denom = 1.0 + TRUNCATION * e1;
            TRUNCATION / (denom * denom)
        } else {
            TRUNCATION + 8.0 * rng.sample_exp() / PI_SQ
        };
        ctx.set_candidate(proposal);

        if series_accepts(rng, ctx, Acceptance::Strict) {
            return ctx.x;
        }
    }
}

/// Sample from J*(1, z) for `z != 0`.
///
/// `ctx` must have been initialized for `z` and carry the mixture weight.
/// The series test uses `a_n(x | T)` rather than `a_n(x | z, T)`: the tilt
/// factor is common to every term and is absorbed into the mixture weight,
/// which keeps the coefficients bounded for large `z` (Polson et al. 2013, p. 13).
pub(crate) fn sample_jacobi<R: RngDraw + ?Sized>(rng: &mut R, ctx: &mut SamplingContext) -> f64 {
    loop {
        let proposal = if rng.sample_unif() < ctx.ratio {
            right_bounded_inverse_gaussian(rng, ctx.mu, 1.0, TRUNCATION)
        } else {
            TRUNCATION + rng.sample_exp() / ctx.k
        };
        ctx.set_candidate(proposal);

        if series_accepts(rng, ctx, Acceptance::Inclusive) {
            return ctx.x;
        }
    }
}
