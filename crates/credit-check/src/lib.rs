//! Credit approval decision engine.
//!
//! Validates submitted card details, evaluates applicant eligibility against a tiered
//! score/duration table, and records every decision through a pluggable store.

pub mod approval;
pub mod config;
pub mod error;
pub mod telemetry;
