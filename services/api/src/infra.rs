use chrono::NaiveDate;
use credit_check::approval::{
    CreditMetrics, CreditMetricsImporter, CreditStore, ExpirationMonth, StoreError,
    TransactionRecord,
};
use credit_check::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local credit store: seeded metrics plus an append-only transaction log.
#[derive(Default)]
pub(crate) struct InMemoryCreditStore {
    metrics: RwLock<HashMap<String, CreditMetrics>>,
    transactions: Mutex<Vec<TransactionRecord>>,
}

impl InMemoryCreditStore {
    pub(crate) fn seeded(metrics: HashMap<String, CreditMetrics>) -> Self {
        Self {
            metrics: RwLock::new(metrics),
            transactions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn insert_metrics(&self, card_number: &str, metrics: CreditMetrics) {
        self.metrics
            .write()
            .expect("metrics lock poisoned")
            .insert(card_number.to_string(), metrics);
    }

    pub(crate) fn transactions(&self) -> Vec<TransactionRecord> {
        self.transactions
            .lock()
            .expect("transaction mutex poisoned")
            .clone()
    }
}

impl CreditStore for InMemoryCreditStore {
    fn fetch_metrics(&self, card_number: &str) -> Result<Option<CreditMetrics>, StoreError> {
        let guard = self
            .metrics
            .read()
            .map_err(|_| StoreError::Unavailable("metrics lock poisoned".to_string()))?;
        Ok(guard.get(card_number).copied())
    }

    fn append_transaction(&self, record: TransactionRecord) -> Result<(), StoreError> {
        let mut guard = self
            .transactions
            .lock()
            .map_err(|_| StoreError::Unavailable("transaction lock poisoned".to_string()))?;
        guard.push(record);
        Ok(())
    }
}

pub(crate) fn seed_store(path: Option<&Path>) -> Result<InMemoryCreditStore, AppError> {
    let Some(path) = path else {
        return Ok(InMemoryCreditStore::default());
    };

    let metrics =
        CreditMetricsImporter::from_path(path).map_err(|err| AppError::seed(path, err))?;
    info!(path = %path.display(), cards = metrics.len(), "seeded credit metrics");
    Ok(InMemoryCreditStore::seeded(metrics))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_expiration(raw: &str) -> Result<ExpirationMonth, String> {
    raw.parse::<ExpirationMonth>().map_err(|err| err.to_string())
}
