use super::evaluation::EligibilityConfig;
use super::repository::FallbackRanges;
use super::validation::{CardRules, LengthBounds};
use crate::config::ConfigError;

/// Resolved approval settings, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalConfig {
    pub card: CardRules,
    pub eligibility: EligibilityConfig,
    pub fallback: FallbackRanges,
}

impl ApprovalConfig {
    /// Reject settings the decision flow cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds("card number length", self.card.number_length)?;
        check_bounds("CVV length", self.card.cvv_length)?;

        if self.card.luhn_modulus == 0 {
            return Err(ConfigError::ZeroModulus);
        }

        let days = self.eligibility.days_per_year;
        if !days.is_finite() || days <= 0.0 {
            return Err(ConfigError::InvalidDaysPerYear(days));
        }

        for (name, range) in [
            ("random credit score", &self.fallback.score),
            ("random credit duration", &self.fallback.duration_years),
        ] {
            if range.start() > range.end() {
                return Err(ConfigError::InvalidBounds {
                    name,
                    min: u64::from(*range.start()),
                    max: u64::from(*range.end()),
                });
            }
        }

        Ok(())
    }
}

fn check_bounds(name: &'static str, bounds: LengthBounds) -> Result<(), ConfigError> {
    if bounds.min == 0 || bounds.min > bounds.max {
        return Err(ConfigError::InvalidBounds {
            name,
            min: bounds.min as u64,
            max: bounds.max as u64,
        });
    }
    Ok(())
}
