use super::tiers::TierTable;

pub const DEFAULT_LEGAL_AGE: u32 = 18;
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.2425;

/// Age gate and tier table backing the eligibility decision.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityConfig {
    pub legal_age: u32,
    pub days_per_year: f64,
    pub tiers: TierTable,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            legal_age: DEFAULT_LEGAL_AGE,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
            tiers: TierTable::standard(),
        }
    }
}
