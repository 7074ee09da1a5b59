//! Credit approval intake: card validation, eligibility evaluation, and the audit trail.

pub mod checksum;
pub mod config;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use checksum::{is_valid_checksum, ChecksumError, DEFAULT_LUHN_MODULUS};
pub use config::ApprovalConfig;
pub use domain::{
    mask_card_number, ApprovalStatus, CreditApplication, CreditMetrics, ExpirationMonth,
    TransactionRecord,
};
pub use evaluation::{
    ApprovalBasis, ApprovalTier, DenialReason, EligibilityConfig, EligibilityOutcome,
    EligibilityPolicy, TierTable, TierTableError,
};
pub use import::{CreditMetricsImporter, MetricsImportError};
pub use repository::{CreditStore, FallbackRanges, ScoreRepository, StoreError};
pub use router::{approval_router, ApplicationPayload, CreditApprovalResponse};
pub use service::{CreditCheckError, CreditCheckService, CreditDecision};
pub use validation::{CardFieldError, CardRules, CardValidator, LengthBounds, ValidationReport};
