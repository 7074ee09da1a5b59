use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use super::config::ApprovalConfig;
use crate::config::ConfigError;
use super::domain::{mask_card_number, ApprovalStatus, CreditApplication};
use super::evaluation::{EligibilityOutcome, EligibilityPolicy};
use super::repository::{CreditStore, ScoreRepository};
use super::validation::{join_messages, CardFieldError, CardValidator, ValidationReport};

/// Outcome of one processed application, recorded exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditDecision {
    pub card_number: String,
    pub outcome: EligibilityOutcome,
    pub errors: Vec<CardFieldError>,
}

impl CreditDecision {
    pub fn is_approved(&self) -> bool {
        self.outcome.is_approved()
    }

    pub fn status(&self) -> ApprovalStatus {
        if self.is_approved() {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Denied
        }
    }

    /// Validation messages joined for display, `None` when the card was structurally valid.
    pub fn error_detail(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| join_messages(&self.errors))
    }
}

/// Error raised by the credit check service.
#[derive(Debug, thiserror::Error)]
pub enum CreditCheckError {
    /// The application failed structural validation. The decision was still computed and
    /// recorded, but the caller sees the validation failure.
    #[error("{detail}")]
    ValidationFailed {
        detail: String,
        decision: Box<CreditDecision>,
    },
}

/// Service composing card validation, metrics lookup, eligibility, and the audit trail.
pub struct CreditCheckService<S> {
    validator: Arc<CardValidator>,
    policy: Arc<EligibilityPolicy>,
    scores: ScoreRepository<S>,
}

impl<S> CreditCheckService<S>
where
    S: CreditStore + 'static,
{
    /// Build the service, rejecting settings the decision flow cannot run with.
    pub fn new(store: Arc<S>, config: ApprovalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ApprovalConfig {
            card,
            eligibility,
            fallback,
        } = config;

        Ok(Self {
            validator: Arc::new(CardValidator::new(card)),
            policy: Arc::new(EligibilityPolicy::new(eligibility)),
            scores: ScoreRepository::new(store, fallback),
        })
    }

    pub fn store(&self) -> &Arc<S> {
        self.scores.store()
    }

    /// Structural checks only; no metrics lookup and nothing recorded.
    pub fn validate(&self, application: &CreditApplication, today: NaiveDate) -> ValidationReport {
        self.validator.validate(application, today)
    }

    /// Process an application against the local calendar date.
    pub fn process(
        &self,
        application: CreditApplication,
    ) -> Result<CreditDecision, CreditCheckError> {
        self.process_on(application, Local::now().date_naive())
    }

    /// Validate, fetch metrics, evaluate, record, then respond.
    pub fn process_on(
        &self,
        application: CreditApplication,
        today: NaiveDate,
    ) -> Result<CreditDecision, CreditCheckError> {
        let report = self.validator.validate(&application, today);
        let metrics = self.scores.fetch_metrics(&application.credit_card_number);
        let outcome = self.policy.decide(
            application.is_existing_customer,
            application.date_of_birth,
            metrics,
            today,
        );

        let decision = CreditDecision {
            card_number: application.credit_card_number,
            outcome,
            errors: report.into_errors(),
        };
        let detail = decision.error_detail();

        self.scores
            .record_transaction(&decision.card_number, decision.is_approved(), detail.clone());

        info!(
            card = %mask_card_number(&decision.card_number),
            status = decision.status().label(),
            validation_errors = decision.errors.len(),
            rationale = %decision.outcome.summary(),
            "credit application processed"
        );

        match detail {
            Some(detail) => Err(CreditCheckError::ValidationFailed {
                detail,
                decision: Box::new(decision),
            }),
            None => Ok(decision),
        }
    }
}
