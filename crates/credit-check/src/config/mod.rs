use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::approval::{
    ApprovalConfig, ApprovalTier, CardRules, EligibilityConfig, FallbackRanges, LengthBounds,
    TierTable, TierTableError,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub approval: ApprovalConfig,
    /// Optional CSV of `card_number,score,duration` rows used to seed the credit store.
    pub metrics_seed: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = AppEnvironment::from_str(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let approval = approval_from_lookup(&lookup)?;
        approval.validate()?;

        let metrics_seed = lookup("CREDIT_METRICS_CSV")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            approval,
            metrics_seed,
        })
    }
}

fn approval_from_lookup<F>(lookup: &F) -> Result<ApprovalConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ApprovalConfig::default();

    let card = CardRules {
        number_length: LengthBounds::new(
            parse_or(
                lookup,
                "MINIMUM_CREDIT_CARD_NUMBER_LENGTH",
                defaults.card.number_length.min,
            )?,
            parse_or(
                lookup,
                "MAXIMUM_CREDIT_CARD_NUMBER_LENGTH",
                defaults.card.number_length.max,
            )?,
        ),
        cvv_length: LengthBounds::new(
            parse_or(
                lookup,
                "MINIMUM_CREDIT_CARD_CVV_LENGTH",
                defaults.card.cvv_length.min,
            )?,
            parse_or(
                lookup,
                "MAXIMUM_CREDIT_CARD_CVV_LENGTH",
                defaults.card.cvv_length.max,
            )?,
        ),
        luhn_modulus: parse_or(lookup, "LUHN_MODULUS", defaults.card.luhn_modulus)?,
        accepted_issuers: defaults.card.accepted_issuers,
    };

    let mut tiers = Vec::new();
    for tier in defaults.eligibility.tiers.tiers() {
        let prefix = tier.name.to_ascii_uppercase();
        tiers.push(ApprovalTier::new(
            &tier.name,
            parse_or(lookup, &format!("{prefix}_CREDIT_MIN"), tier.min_score)?,
            parse_or(lookup, &format!("{prefix}_CREDIT_MAX"), tier.max_score)?,
            parse_or(
                lookup,
                &format!("{prefix}_CREDIT_MIN_DURATION"),
                tier.min_duration_years,
            )?,
        ));
    }

    let eligibility = EligibilityConfig {
        legal_age: parse_or(lookup, "LEGAL_AGE", defaults.eligibility.legal_age)?,
        days_per_year: parse_or(lookup, "DAYS_IN_YEAR", defaults.eligibility.days_per_year)?,
        tiers: TierTable::new(tiers)?,
    };

    let fallback = FallbackRanges {
        score: parse_or(
            lookup,
            "RANDOM_CREDIT_SCORE_MIN",
            *defaults.fallback.score.start(),
        )?..=parse_or(
            lookup,
            "RANDOM_CREDIT_SCORE_MAX",
            *defaults.fallback.score.end(),
        )?,
        duration_years: parse_or(
            lookup,
            "RANDOM_CREDIT_DURATION_MIN",
            *defaults.fallback.duration_years.start(),
        )?..=parse_or(
            lookup,
            "RANDOM_CREDIT_DURATION_MAX",
            *defaults.fallback.duration_years.end(),
        )?,
    };

    Ok(ApprovalConfig {
        card,
        eligibility,
        fallback,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: String, value: String },
    InvalidBounds { name: &'static str, min: u64, max: u64 },
    ZeroModulus,
    InvalidDaysPerYear(f64),
    Tiers(TierTableError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has unparseable value '{value}'")
            }
            ConfigError::InvalidBounds { name, min, max } => {
                write!(f, "{name} bounds are invalid (min {min}, max {max})")
            }
            ConfigError::ZeroModulus => write!(f, "LUHN_MODULUS must be greater than zero"),
            ConfigError::InvalidDaysPerYear(value) => {
                write!(f, "DAYS_IN_YEAR must be a positive number, found {value}")
            }
            ConfigError::Tiers(err) => write!(f, "invalid credit tier table: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Tiers(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TierTableError> for ConfigError {
    fn from(value: TierTableError) -> Self {
        Self::Tiers(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        for key in ["APP_ENV", "APP_HOST", "APP_PORT", "APP_LOG_LEVEL", "LEGAL_AGE"] {
            env::remove_var(key);
        }

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.approval.eligibility.legal_age, 18);
    }

    #[test]
    fn defaults_match_canonical_rules() {
        let config = AppConfig::from_lookup(|_| None).expect("defaults load");

        assert_eq!(config.approval, ApprovalConfig::default());
        assert_eq!(config.approval.card.number_length, LengthBounds::new(8, 19));
        assert_eq!(config.approval.card.cvv_length, LengthBounds::new(3, 4));
        assert_eq!(config.approval.card.luhn_modulus, 10);
        assert!(config.metrics_seed.is_none());
    }

    #[test]
    fn reads_overrides_for_rules_and_tiers() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("LEGAL_AGE", "21"),
            ("DAYS_IN_YEAR", "365.25"),
            ("MINIMUM_CREDIT_CARD_NUMBER_LENGTH", "16"),
            ("MAXIMUM_CREDIT_CARD_NUMBER_LENGTH", "16"),
            ("POOR_CREDIT_MIN_DURATION", "12"),
            ("RANDOM_CREDIT_SCORE_MIN", "600"),
            ("CREDIT_METRICS_CSV", "seed/metrics.csv"),
        ]))
        .expect("overrides load");

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.approval.eligibility.legal_age, 21);
        assert_eq!(config.approval.eligibility.days_per_year, 365.25);
        assert_eq!(config.approval.card.number_length, LengthBounds::new(16, 16));
        assert_eq!(
            config.approval.eligibility.tiers.tiers()[0].min_duration_years,
            12
        );
        assert_eq!(*config.approval.fallback.score.start(), 600);
        assert_eq!(
            config.metrics_seed,
            Some(PathBuf::from("seed/metrics.csv"))
        );
    }

    #[test]
    fn malformed_numbers_fail_fast() {
        let result = AppConfig::from_lookup(lookup_from(&[("LEGAL_AGE", "eighteen")]));

        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "LEGAL_AGE");
                assert_eq!(value, "eighteen");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_tier_overrides_are_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("POOR_CREDIT_MAX", "550")]));
        assert!(matches!(
            result,
            Err(ConfigError::Tiers(TierTableError::Overlap { .. }))
        ));
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("LUHN_MODULUS", "0")]));
        assert!(matches!(result, Err(ConfigError::ZeroModulus)));
    }

    #[test]
    fn accepts_localhost_host() {
        let config = AppConfig::from_lookup(lookup_from(&[("APP_HOST", "localhost")]))
            .expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}
