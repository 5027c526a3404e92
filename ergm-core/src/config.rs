//! Tunable estimation constants, carried explicitly rather than as module
//! globals (as the Python reference implementation does).

use crate::error::{ErgmError, Result};

/// Estimation constants shared across Algorithm S, Algorithm EE, and the
/// basic sampler.
///
/// # Examples
/// ```
/// use ergm_core::EstimationConfig;
///
/// let config = EstimationConfig::builder().build().expect("defaults are valid");
/// assert_eq!(config.lambda(), 2.0);
/// assert_eq!(config.sampler_proposals(), 1000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimationConfig {
    lambda: f64,
    aca_s: f64,
    maxstep_s: f64,
    aca_ee: f64,
    comp_c: f64,
    sampler_proposals: usize,
}

impl EstimationConfig {
    /// Starts a builder populated with the reference implementation's
    /// default constants.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Decay constant used by the alternating statistics. Must be `> 1.0`.
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Algorithm S step-size multiplier.
    #[must_use]
    pub const fn aca_s(&self) -> f64 {
        self.aca_s
    }

    /// Algorithm S one-sided step clamp.
    #[must_use]
    pub const fn maxstep_s(&self) -> f64 {
        self.maxstep_s
    }

    /// Algorithm EE step-size multiplier.
    #[must_use]
    pub const fn aca_ee(&self) -> f64 {
        self.aca_ee
    }

    /// Algorithm EE coefficient-of-variation target.
    #[must_use]
    pub const fn comp_c(&self) -> f64 {
        self.comp_c
    }

    /// Number of Metropolis–Hastings proposals per basic sampler call.
    #[must_use]
    pub const fn sampler_proposals(&self) -> usize {
        self.sampler_proposals
    }
}

/// Builds and validates an [`EstimationConfig`].
///
/// # Examples
/// ```
/// use ergm_core::EstimationConfig;
///
/// let config = EstimationConfig::builder()
///     .with_lambda(3.0)
///     .with_sampler_proposals(500)
///     .build()
///     .expect("lambda > 1 and proposals > 0");
/// assert_eq!(config.lambda(), 3.0);
/// assert_eq!(config.sampler_proposals(), 500);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConfigBuilder {
    lambda: f64,
    aca_s: f64,
    maxstep_s: f64,
    aca_ee: f64,
    comp_c: f64,
    sampler_proposals: usize,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            lambda: 2.0,
            aca_s: 0.1,
            maxstep_s: 0.1,
            aca_ee: 1e-9,
            comp_c: 1e-2,
            sampler_proposals: 1000,
        }
    }
}

impl ConfigBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the alternating-statistics decay constant.
    #[must_use]
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Overrides the Algorithm S step-size multiplier.
    #[must_use]
    pub fn with_aca_s(mut self, aca_s: f64) -> Self {
        self.aca_s = aca_s;
        self
    }

    /// Overrides the Algorithm S one-sided step clamp.
    #[must_use]
    pub fn with_maxstep_s(mut self, maxstep_s: f64) -> Self {
        self.maxstep_s = maxstep_s;
        self
    }

    /// Overrides the Algorithm EE step-size multiplier.
    #[must_use]
    pub fn with_aca_ee(mut self, aca_ee: f64) -> Self {
        self.aca_ee = aca_ee;
        self
    }

    /// Overrides the Algorithm EE coefficient-of-variation target.
    #[must_use]
    pub fn with_comp_c(mut self, comp_c: f64) -> Self {
        self.comp_c = comp_c;
        self
    }

    /// Overrides the number of proposals per basic sampler call.
    #[must_use]
    pub fn with_sampler_proposals(mut self, sampler_proposals: usize) -> Self {
        self.sampler_proposals = sampler_proposals;
        self
    }

    /// Validates the configuration and constructs an [`EstimationConfig`].
    ///
    /// # Errors
    /// Returns [`ErgmError::InvalidConfig`] if `lambda <= 1.0`, any
    /// multiplier is non-finite or negative, or `sampler_proposals == 0`.
    pub fn build(self) -> Result<EstimationConfig> {
        if !(self.lambda > 1.0) {
            return Err(ErgmError::InvalidConfig {
                reason: format!("lambda must be > 1.0, got {}", self.lambda),
            });
        }
        for (name, value) in [
            ("aca_s", self.aca_s),
            ("maxstep_s", self.maxstep_s),
            ("aca_ee", self.aca_ee),
            ("comp_c", self.comp_c),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ErgmError::InvalidConfig {
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        if self.sampler_proposals == 0 {
            return Err(ErgmError::InvalidConfig {
                reason: "sampler_proposals must be > 0".to_owned(),
            });
        }
        Ok(EstimationConfig {
            lambda: self.lambda,
            aca_s: self.aca_s,
            maxstep_s: self.maxstep_s,
            aca_ee: self.aca_ee,
            comp_c: self.comp_c,
            sampler_proposals: self.sampler_proposals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::EstimationConfig;

    #[test]
    fn defaults_match_reference_constants() {
        let config = EstimationConfig::builder().build().expect("defaults valid");
        assert_eq!(config.lambda(), 2.0);
        assert_eq!(config.aca_s(), 0.1);
        assert_eq!(config.maxstep_s(), 0.1);
        assert_eq!(config.aca_ee(), 1e-9);
        assert_eq!(config.comp_c(), 1e-2);
        assert_eq!(config.sampler_proposals(), 1000);
    }

    #[test]
    fn lambda_must_exceed_one() {
        assert!(EstimationConfig::builder().with_lambda(1.0).build().is_err());
        assert!(EstimationConfig::builder().with_lambda(0.5).build().is_err());
    }

    #[test]
    fn sampler_proposals_must_be_positive() {
        assert!(
            EstimationConfig::builder()
                .with_sampler_proposals(0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn negative_multiplier_is_rejected() {
        assert!(EstimationConfig::builder().with_aca_s(-1.0).build().is_err());
    }
}
