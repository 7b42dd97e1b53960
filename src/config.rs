//! Tunable constants of the samplers.

use crate::error::PolyaGammaError;
use tracing::warn;

/// Truncation point `T = 2/pi` of the J* sampler.
///
/// It separates the inverse-Gaussian and exponential proposal families and the
/// two forms of the series coefficients. The J*(1, 0) mixture weights are
/// computed for this value, so it is fixed rather than configurable.
pub const TRUNCATION: f64 = std::f64::consts::FRAC_2_PI;

/// Number of terms kept in the gamma-convolution approximation by default.
pub const DEFAULT_CONVOLUTION_TERMS: usize = 200;

/// Fewer terms than this leave a visible bias in the convolution sampler.
const LOW_TERM_WARNING: usize = 50;

/// Configuration shared by the sampling entry points.
///
/// # Example
/// ```rust
/// use polya_gamma_devroye::SamplerConfig;
/// let config = SamplerConfig::default().with_convolution_terms(500).unwrap();
/// assert_eq!(config.convolution_terms(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    convolution_terms: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            convolution_terms: DEFAULT_CONVOLUTION_TERMS,
        }
    }
}

impl SamplerConfig {
    /// Set the number of terms of the truncated gamma-convolution series.
    ///
    /// More terms reduce the truncation bias of non-integer shape draws at a
    /// linear cost in gamma variates per draw.
    ///
    /// # Errors
    /// Returns [`PolyaGammaError::InvalidConvolutionTerms`] if `terms` is zero.
    pub fn with_convolution_terms(mut self, terms: usize) -> Result<Self, PolyaGammaError> {
        if terms == 0 {
            return Err(PolyaGammaError::InvalidConvolutionTerms);
        }
        if terms < LOW_TERM_WARNING {
            warn!(terms, "gamma convolution truncated to few terms; draws will be biased low");
        }
        self.convolution_terms = terms;
        Ok(self)
    }

    /// Number of terms of the truncated gamma-convolution series.
    pub fn convolution_terms(&self) -> usize {
        self.convolution_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_term_count() {
        assert_eq!(SamplerConfig::default().convolution_terms(), 200);
    }

    #[test]
    fn zero_terms_rejected() {
        assert_eq!(
            SamplerConfig::default().with_convolution_terms(0),
            Err(PolyaGammaError::InvalidConvolutionTerms)
        );
        assert_eq!(
            SamplerConfig::default().with_convolution_terms(10).map(|c| c.convolution_terms()),
            Ok(10)
        );
    }
}
