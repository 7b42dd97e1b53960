//! Errors reported by the validating constructors.
//!
//! The sampling routines themselves never fail: out-of-domain arguments
//! simply produce NaN or meaningless numbers, so validation happens once,
//! up front, when a [`crate::PolyaGamma`] or [`crate::SamplerConfig`] is built.

use thiserror::Error;

/// Invalid sampler parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolyaGammaError {
    /// The shape parameter must be finite and strictly positive.
    #[error("shape parameter must be finite and positive, got {0}")]
    InvalidShape(f64),

    /// The gamma-convolution sum needs at least one term.
    #[error("gamma convolution needs at least one term")]
    InvalidConvolutionTerms,
}
