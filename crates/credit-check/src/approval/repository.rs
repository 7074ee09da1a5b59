use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, error, warn};

use super::domain::{mask_card_number, CreditMetrics, TransactionRecord};

/// Storage abstraction so the approval flow can be exercised in isolation.
pub trait CreditStore: Send + Sync {
    fn fetch_metrics(&self, card_number: &str) -> Result<Option<CreditMetrics>, StoreError>;
    fn append_transaction(&self, record: TransactionRecord) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored record malformed: {0}")]
    Malformed(String),
}

/// Ranges used to synthesize metrics for applicants the store does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRanges {
    pub score: RangeInclusive<u32>,
    pub duration_years: RangeInclusive<u32>,
}

impl FallbackRanges {
    pub fn sample(&self) -> CreditMetrics {
        let mut rng = rand::thread_rng();
        CreditMetrics::new(
            rng.gen_range(self.score.clone()),
            rng.gen_range(self.duration_years.clone()),
        )
    }
}

impl Default for FallbackRanges {
    fn default() -> Self {
        Self {
            score: 300..=850,
            duration_years: 0..=10,
        }
    }
}

/// Store wrapper enforcing the lookup fallback and best-effort audit contract.
pub struct ScoreRepository<S> {
    store: Arc<S>,
    fallback: FallbackRanges,
}

impl<S> ScoreRepository<S>
where
    S: CreditStore,
{
    pub fn new(store: Arc<S>, fallback: FallbackRanges) -> Self {
        Self { store, fallback }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stored metrics for the card, or randomized values when absent or unreadable.
    pub fn fetch_metrics(&self, card_number: &str) -> CreditMetrics {
        match self.store.fetch_metrics(card_number) {
            Ok(Some(metrics)) => metrics,
            Ok(None) => {
                let metrics = self.fallback.sample();
                debug!(
                    card = %mask_card_number(card_number),
                    score = metrics.score,
                    duration = metrics.duration_years,
                    "no stored credit metrics; using fallback values"
                );
                metrics
            }
            Err(err) => {
                let metrics = self.fallback.sample();
                warn!(
                    card = %mask_card_number(card_number),
                    error = %err,
                    "failed to fetch credit metrics; using fallback values"
                );
                metrics
            }
        }
    }

    /// Append the audit row; failures are logged and never propagated.
    pub fn record_transaction(&self, card_number: &str, approved: bool, errors: Option<String>) {
        let record = TransactionRecord {
            card_number: card_number.to_string(),
            approved,
            errors,
            recorded_at: Utc::now(),
        };

        if let Err(err) = self.store.append_transaction(record) {
            error!(
                card = %mask_card_number(card_number),
                error = %err,
                "failed to record credit approval transaction"
            );
        }
    }
}
