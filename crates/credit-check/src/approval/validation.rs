use chrono::NaiveDate;
use serde::Serialize;

use super::checksum::{is_valid_checksum, ChecksumError, DEFAULT_LUHN_MODULUS};
use super::domain::CreditApplication;

/// Inclusive length window for digit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

/// Structural card checks, resolved once from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRules {
    pub number_length: LengthBounds,
    pub cvv_length: LengthBounds,
    pub luhn_modulus: u32,
    pub accepted_issuers: Vec<String>,
}

impl Default for CardRules {
    fn default() -> Self {
        Self {
            number_length: LengthBounds::new(8, 19),
            cvv_length: LengthBounds::new(3, 4),
            luhn_modulus: DEFAULT_LUHN_MODULUS,
            accepted_issuers: vec![
                "Visa".to_string(),
                "MasterCard".to_string(),
                "American Express".to_string(),
            ],
        }
    }
}

/// Business-rule failures reported back to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardFieldError {
    #[error("Card number must be between {min} and {max} digits")]
    CardNumberLength { min: usize, max: usize },
    #[error("CVV must be {min} or {max} digits")]
    CvvLength { min: usize, max: usize },
    #[error("CVV must contain only digits")]
    CvvNotNumeric,
    #[error("Card is expired")]
    Expired,
    #[error("Invalid credit card issuer")]
    UnsupportedIssuer,
    #[error("Invalid credit card number")]
    ChecksumMismatch,
    #[error("Invalid credit card number: {0}")]
    MalformedCardNumber(ChecksumError),
}

/// Ordered collection of every failed check for one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<CardFieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[CardFieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<CardFieldError> {
        self.errors
    }

    /// Messages joined with `"; "`, suitable for direct display.
    pub fn detail(&self) -> String {
        join_messages(&self.errors)
    }
}

pub(crate) fn join_messages(errors: &[CardFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Stateless validator applying [`CardRules`] to an application.
#[derive(Debug, Clone, Default)]
pub struct CardValidator {
    rules: CardRules,
}

impl CardValidator {
    pub fn new(rules: CardRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CardRules {
        &self.rules
    }

    /// Run every check; failures accumulate in step order and never short-circuit.
    pub fn validate(&self, application: &CreditApplication, today: NaiveDate) -> ValidationReport {
        let checks = [
            self.check_number_length(&application.credit_card_number),
            self.check_cvv(&application.cvv),
            check_expiration(application, today),
            self.check_issuer(&application.credit_card_issuer),
            self.check_checksum(&application.credit_card_number),
        ];

        ValidationReport {
            errors: checks.into_iter().flatten().collect(),
        }
    }

    fn check_number_length(&self, number: &str) -> Option<CardFieldError> {
        let bounds = self.rules.number_length;
        (!bounds.contains(number.chars().count())).then_some(CardFieldError::CardNumberLength {
            min: bounds.min,
            max: bounds.max,
        })
    }

    fn check_cvv(&self, cvv: &str) -> Option<CardFieldError> {
        let bounds = self.rules.cvv_length;
        if !bounds.contains(cvv.chars().count()) {
            return Some(CardFieldError::CvvLength {
                min: bounds.min,
                max: bounds.max,
            });
        }
        (!cvv.chars().all(|c| c.is_ascii_digit())).then_some(CardFieldError::CvvNotNumeric)
    }

    fn check_issuer(&self, issuer: &str) -> Option<CardFieldError> {
        let issuer = issuer.trim();
        let accepted = self
            .rules
            .accepted_issuers
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(issuer));
        (!accepted).then_some(CardFieldError::UnsupportedIssuer)
    }

    fn check_checksum(&self, number: &str) -> Option<CardFieldError> {
        match is_valid_checksum(number, self.rules.luhn_modulus) {
            Ok(true) => None,
            Ok(false) => Some(CardFieldError::ChecksumMismatch),
            Err(err) => Some(CardFieldError::MalformedCardNumber(err)),
        }
    }
}

fn check_expiration(application: &CreditApplication, today: NaiveDate) -> Option<CardFieldError> {
    application
        .expiration_date
        .is_before(today)
        .then_some(CardFieldError::Expired)
}
