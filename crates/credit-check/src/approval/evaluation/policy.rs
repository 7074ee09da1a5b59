use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::CreditMetrics;
use super::config::EligibilityConfig;

/// Why an application was approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ApprovalBasis {
    ExistingCustomer,
    Tier { tier: String },
}

/// Enumerates denial reasons so decisions can be explained and audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DenialReason {
    Underage {
        age: i64,
        legal_age: u32,
    },
    NoMatchingTier {
        score: u32,
    },
    InsufficientDuration {
        tier: String,
        required_years: u32,
        actual_years: u32,
    },
}

impl DenialReason {
    pub fn summary(&self) -> String {
        match self {
            DenialReason::Underage { age, legal_age } => {
                format!("denied: applicant age {age} below legal age {legal_age}")
            }
            DenialReason::NoMatchingTier { score } => {
                format!("denied: credit score {score} outside every approval tier")
            }
            DenialReason::InsufficientDuration {
                tier,
                required_years,
                actual_years,
            } => format!(
                "denied: {tier} tier requires {required_years} year(s) of history, found {actual_years}"
            ),
        }
    }
}

/// Eligibility decision for one applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EligibilityOutcome {
    Approved(ApprovalBasis),
    Denied(DenialReason),
}

impl EligibilityOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, EligibilityOutcome::Approved(_))
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityOutcome::Approved(ApprovalBasis::ExistingCustomer) => {
                "approved: existing customer".to_string()
            }
            EligibilityOutcome::Approved(ApprovalBasis::Tier { tier }) => {
                format!("approved: meets {tier} tier requirements")
            }
            EligibilityOutcome::Denied(reason) => reason.summary(),
        }
    }
}

/// Whole years elapsed; negative when the birth date lies in the future.
pub(crate) fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate, days_per_year: f64) -> i64 {
    let days = (today - date_of_birth).num_days();
    (days as f64 / days_per_year).floor() as i64
}

pub(crate) fn decide_outcome(
    config: &EligibilityConfig,
    is_existing_customer: bool,
    date_of_birth: NaiveDate,
    metrics: CreditMetrics,
    today: NaiveDate,
) -> EligibilityOutcome {
    if is_existing_customer {
        return EligibilityOutcome::Approved(ApprovalBasis::ExistingCustomer);
    }

    let age = age_in_years(date_of_birth, today, config.days_per_year);
    if age < i64::from(config.legal_age) {
        return EligibilityOutcome::Denied(DenialReason::Underage {
            age,
            legal_age: config.legal_age,
        });
    }

    let Some(tier) = config.tiers.tier_for(metrics.score) else {
        return EligibilityOutcome::Denied(DenialReason::NoMatchingTier {
            score: metrics.score,
        });
    };

    if metrics.duration_years < tier.min_duration_years {
        return EligibilityOutcome::Denied(DenialReason::InsufficientDuration {
            tier: tier.name.clone(),
            required_years: tier.min_duration_years,
            actual_years: metrics.duration_years,
        });
    }

    EligibilityOutcome::Approved(ApprovalBasis::Tier {
        tier: tier.name.clone(),
    })
}
