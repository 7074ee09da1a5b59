use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::approval::domain::{
    CreditApplication, CreditMetrics, ExpirationMonth, TransactionRecord,
};
use crate::approval::repository::{CreditStore, FallbackRanges, StoreError};
use crate::approval::{ApprovalConfig, CreditCheckService};

pub(super) const VALID_VISA: &str = "4929439557473282537";
pub(super) const VALID_AMEX: &str = "373337942404166";
pub(super) const VALID_MASTERCARD: &str = "5127626881039365";
pub(super) const BAD_CHECKSUM: &str = "1234567890123456";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn application() -> CreditApplication {
    CreditApplication {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
        is_existing_customer: false,
        credit_card_number: VALID_VISA.to_string(),
        expiration_date: ExpirationMonth::new(2027, 8).expect("valid month"),
        cvv: "123".to_string(),
        credit_card_issuer: "Visa".to_string(),
    }
}

/// Fallback pinned to a single value so unknown cards are deterministic.
pub(super) fn pinned_config(score: u32, duration_years: u32) -> ApprovalConfig {
    ApprovalConfig {
        fallback: FallbackRanges {
            score: score..=score,
            duration_years: duration_years..=duration_years,
        },
        ..ApprovalConfig::default()
    }
}

pub(super) fn build_service(
    seed: &[(&str, u32, u32)],
) -> (CreditCheckService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded(seed));
    let service =
        CreditCheckService::new(store.clone(), pinned_config(300, 0)).expect("valid config");
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    metrics: Arc<Mutex<HashMap<String, CreditMetrics>>>,
    transactions: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl MemoryStore {
    pub(super) fn seeded(seed: &[(&str, u32, u32)]) -> Self {
        let store = Self::default();
        {
            let mut guard = store.metrics.lock().expect("metrics mutex poisoned");
            for (card, score, duration) in seed {
                guard.insert(card.to_string(), CreditMetrics::new(*score, *duration));
            }
        }
        store
    }

    pub(super) fn transactions(&self) -> Vec<TransactionRecord> {
        self.transactions
            .lock()
            .expect("transaction mutex poisoned")
            .clone()
    }
}

impl CreditStore for MemoryStore {
    fn fetch_metrics(&self, card_number: &str) -> Result<Option<CreditMetrics>, StoreError> {
        let guard = self.metrics.lock().expect("metrics mutex poisoned");
        Ok(guard.get(card_number).copied())
    }

    fn append_transaction(&self, record: TransactionRecord) -> Result<(), StoreError> {
        self.transactions
            .lock()
            .expect("transaction mutex poisoned")
            .push(record);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl CreditStore for UnavailableStore {
    fn fetch_metrics(&self, _card_number: &str) -> Result<Option<CreditMetrics>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn append_transaction(&self, _record: TransactionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
