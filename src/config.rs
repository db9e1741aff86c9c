//! Runtime configuration loaded from the environment (and `.env` if present).

use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use crate::pricing::calculators::PREVIEW_OCCUPANCY_RATE;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Maximum number of tour listings kept in memory
    pub tour_cache_capacity: u64,
    pub tour_cache_ttl: Duration,
    /// Occupancy rate used by previews that carry no rate of their own
    pub preview_occupancy_rate: Decimal,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let preview_occupancy_rate: Decimal =
            try_load("PREVIEW_OCCUPANCY_RATE", &PREVIEW_OCCUPANCY_RATE.to_string())?;
        if preview_occupancy_rate < Decimal::ZERO || preview_occupancy_rate > Decimal::ONE_HUNDRED {
            anyhow::bail!("PREVIEW_OCCUPANCY_RATE must be within 0..=100, got {preview_occupancy_rate}");
        }

        Ok(Self {
            host: try_load("HOST", "0.0.0.0")?,
            port: try_load("PORT", "8080")?,
            tour_cache_capacity: try_load("TOUR_CACHE_CAPACITY", "1000")?,
            tour_cache_ttl: Duration::from_secs(try_load("TOUR_CACHE_TTL_SECS", "3600")?),
            preview_occupancy_rate,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            tour_cache_capacity: 1000,
            tour_cache_ttl: Duration::from_secs(60 * 60),
            preview_occupancy_rate: PREVIEW_OCCUPANCY_RATE,
        }
    }
}

fn try_load<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_to_default() {
        let port: u16 = try_load("TOURPRICE_TEST_UNSET_PORT", "9090").unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_try_load_rejects_garbage() {
        let result: Result<u16> = try_load("TOURPRICE_TEST_UNSET_GARBAGE", "not-a-port");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_bind_address() {
        assert_eq!(Config::default().bind_address(), "0.0.0.0:8080");
    }
}
