// src/config.rs
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::ledger::{CommissionBase, LedgerSettings};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("DRIVER_COMMISSION_RATE must be between 0 and 1, got {0}")]
    RateOutOfRange(f64),
    #[error("{0} must not be negative")]
    Negative(&'static str),
}

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub ledger: LedgerSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let commission_rate: f64 = parse_or(&get, "DRIVER_COMMISSION_RATE", 0.1)?;
        if !(0.0..=1.0).contains(&commission_rate) {
            return Err(ConfigError::RateOutOfRange(commission_rate));
        }

        let maintenance_threshold_km: f64 = parse_or(&get, "MAINTENANCE_THRESHOLD_KM", 4000.0)?;
        if maintenance_threshold_km < 0.0 {
            return Err(ConfigError::Negative("MAINTENANCE_THRESHOLD_KM"));
        }

        let tyre_lifespan_km: f64 = parse_or(&get, "TYRE_LIFESPAN_KM", 50_000.0)?;
        if tyre_lifespan_km <= 0.0 {
            return Err(ConfigError::Invalid {
                name: "TYRE_LIFESPAN_KM",
                value: tyre_lifespan_km.to_string(),
            });
        }

        let commission_base = match get("COMMISSION_BASE").as_deref().map(str::trim) {
            None => CommissionBase::Net,
            Some(v) if v.eq_ignore_ascii_case("net") => CommissionBase::Net,
            Some(v) if v.eq_ignore_ascii_case("gross") => CommissionBase::Gross,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "COMMISSION_BASE",
                    value: other.to_string(),
                })
            }
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url: get("DATABASE_URL"),
            max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            host: parse_or(&get, "HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or(&get, "PORT", 3000)?,
            cors_origins,
            ledger: LedgerSettings {
                commission_rate,
                commission_base,
                maintenance_threshold_km,
                tyre_lifespan_km,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config_from(&[]).unwrap();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.ledger.commission_rate, 0.1);
        assert_eq!(cfg.ledger.commission_base, CommissionBase::Net);
        assert_eq!(cfg.ledger.maintenance_threshold_km, 4000.0);
        assert_eq!(cfg.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://localhost/fleet"),
            ("PORT", "8080"),
            ("DRIVER_COMMISSION_RATE", "0.15"),
            ("COMMISSION_BASE", "Gross"),
            ("MAINTENANCE_THRESHOLD_KM", "5000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/fleet"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.ledger.commission_rate, 0.15);
        assert_eq!(cfg.ledger.commission_base, CommissionBase::Gross);
        assert_eq!(cfg.ledger.maintenance_threshold_km, 5000.0);
        assert_eq!(cfg.cors_origins.len(), 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert_eq!(
            config_from(&[("DRIVER_COMMISSION_RATE", "1.5")]).unwrap_err(),
            ConfigError::RateOutOfRange(1.5)
        );
        assert!(config_from(&[("COMMISSION_BASE", "profit")]).is_err());
        assert!(config_from(&[("MAINTENANCE_THRESHOLD_KM", "-1")]).is_err());
    }
}
