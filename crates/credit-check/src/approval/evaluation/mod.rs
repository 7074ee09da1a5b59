mod config;
mod policy;
mod tiers;

pub use config::{EligibilityConfig, DEFAULT_DAYS_PER_YEAR, DEFAULT_LEGAL_AGE};
pub use policy::{ApprovalBasis, DenialReason, EligibilityOutcome};
pub use tiers::{ApprovalTier, TierTable, TierTableError};

use super::domain::CreditMetrics;
use chrono::NaiveDate;

#[cfg(test)]
pub(crate) use policy::age_in_years;

/// Stateless evaluator applying the age gate and tier table.
#[derive(Debug, Clone, Default)]
pub struct EligibilityPolicy {
    config: EligibilityConfig,
}

impl EligibilityPolicy {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Existing customers bypass every other rule; everyone else must be of legal age and
    /// fall in a tier whose minimum history they meet.
    pub fn decide(
        &self,
        is_existing_customer: bool,
        date_of_birth: NaiveDate,
        metrics: CreditMetrics,
        today: NaiveDate,
    ) -> EligibilityOutcome {
        policy::decide_outcome(
            &self.config,
            is_existing_customer,
            date_of_birth,
            metrics,
            today,
        )
    }
}
