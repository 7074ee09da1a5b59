use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{mask_card_number, CreditMetrics};

#[derive(Debug)]
pub enum MetricsImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateCard(String),
}

impl std::fmt::Display for MetricsImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsImportError::Io(err) => write!(f, "failed to read metrics seed: {}", err),
            MetricsImportError::Csv(err) => write!(f, "invalid metrics CSV data: {}", err),
            MetricsImportError::DuplicateCard(card) => write!(
                f,
                "card {} appears more than once in metrics seed",
                mask_card_number(card)
            ),
        }
    }
}

impl std::error::Error for MetricsImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetricsImportError::Io(err) => Some(err),
            MetricsImportError::Csv(err) => Some(err),
            MetricsImportError::DuplicateCard(_) => None,
        }
    }
}

impl From<std::io::Error> for MetricsImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for MetricsImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct MetricsRow {
    card_number: String,
    score: u32,
    duration: u32,
}

/// Loads `card_number,score,duration` rows used to seed a credit store.
pub struct CreditMetricsImporter;

impl CreditMetricsImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<HashMap<String, CreditMetrics>, MetricsImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<HashMap<String, CreditMetrics>, MetricsImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut metrics = HashMap::new();

        for row in csv_reader.deserialize::<MetricsRow>() {
            let row = row?;
            if metrics.contains_key(&row.card_number) {
                return Err(MetricsImportError::DuplicateCard(row.card_number));
            }
            metrics.insert(row.card_number, CreditMetrics::new(row.score, row.duration));
        }

        Ok(metrics)
    }
}
