use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::utils::calculations::DEFAULT_AMAZON_FEE_RATE;
use crate::utils::pagination::DEFAULT_MAX_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDataset {
    Generated,
    Reference,
}

impl FromStr for MockDataset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generated" => Ok(MockDataset::Generated),
            "reference" => Ok(MockDataset::Reference),
            other => Err(anyhow::anyhow!(
                "MOCK_DATASET must be 'generated' or 'reference', got '{}'",
                other
            )),
        }
    }
}

impl std::fmt::Display for MockDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MockDataset::Generated => write!(f, "generated"),
            MockDataset::Reference => write!(f, "reference"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Single switch between the in-memory mock and the REST backend.
    pub use_mock_api: bool,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub amazon_fee_rate: Decimal,
    pub mock_dataset: MockDataset,
    pub mock_latency: Duration,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_mock_api: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout: Duration::from_secs(15),
            default_page_size: 10,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            amazon_fee_rate: DEFAULT_AMAZON_FEE_RATE,
            mock_dataset: MockDataset::Generated,
            mock_latency: Duration::ZERO,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            use_mock_api: match lookup("USE_MOCK_API") {
                Some(raw) => parse_bool("USE_MOCK_API", &raw)?,
                None => defaults.use_mock_api,
            },
            api_base_url: lookup("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_timeout: match lookup("API_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(parse_number("API_TIMEOUT_SECS", &raw)?),
                None => defaults.api_timeout,
            },
            default_page_size: match lookup("DEFAULT_PAGE_SIZE") {
                Some(raw) => parse_number("DEFAULT_PAGE_SIZE", &raw)?,
                None => defaults.default_page_size,
            },
            max_page_size: match lookup("MAX_PAGE_SIZE") {
                Some(raw) => parse_number("MAX_PAGE_SIZE", &raw)?,
                None => defaults.max_page_size,
            },
            amazon_fee_rate: match lookup("AMAZON_FEE_RATE") {
                Some(raw) => Decimal::from_str(raw.trim())
                    .map_err(|e| anyhow::anyhow!("AMAZON_FEE_RATE is not a decimal: {}", e))?,
                None => defaults.amazon_fee_rate,
            },
            mock_dataset: match lookup("MOCK_DATASET") {
                Some(raw) => raw.parse()?,
                None => defaults.mock_dataset,
            },
            mock_latency: match lookup("MOCK_LATENCY_MS") {
                Some(raw) => Duration::from_millis(parse_number("MOCK_LATENCY_MS", &raw)?),
                None => defaults.mock_latency,
            },
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(anyhow::anyhow!("Page sizes must be at least 1"));
        }

        if self.default_page_size > self.max_page_size {
            return Err(anyhow::anyhow!(
                "DEFAULT_PAGE_SIZE ({}) must not exceed MAX_PAGE_SIZE ({})",
                self.default_page_size,
                self.max_page_size
            ));
        }

        if self.amazon_fee_rate < Decimal::ZERO || self.amazon_fee_rate > Decimal::ONE {
            return Err(anyhow::anyhow!("AMAZON_FEE_RATE must be between 0 and 1"));
        }

        if !self.use_mock_api {
            let url = Url::parse(&self.api_base_url)
                .map_err(|e| anyhow::anyhow!("API_BASE_URL is not a valid URL: {}", e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(anyhow::anyhow!(
                    "API_BASE_URL must start with 'http://' or 'https://'"
                ));
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn backend_name(&self) -> &'static str {
        if self.use_mock_api {
            "mock"
        } else {
            "api"
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("{} must be a boolean, got '{}'", key, other)),
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> anyhow::Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got '{}'", key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.use_mock_api);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.amazon_fee_rate, Decimal::new(98, 3));
        assert_eq!(config.mock_dataset, MockDataset::Generated);
        assert_eq!(config.api_timeout, Duration::from_secs(15));
        assert_eq!(config.backend_name(), "mock");
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("USE_MOCK_API", "false"),
            ("API_BASE_URL", "https://skus.example.com/api"),
            ("DEFAULT_PAGE_SIZE", "25"),
            ("AMAZON_FEE_RATE", "0.15"),
            ("MOCK_DATASET", "Reference"),
            ("MOCK_LATENCY_MS", "150"),
        ])
        .unwrap();
        assert!(!config.use_mock_api);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.amazon_fee_rate, Decimal::new(15, 2));
        assert_eq!(config.mock_dataset, MockDataset::Reference);
        assert_eq!(config.mock_latency, Duration::from_millis(150));
        assert_eq!(config.backend_name(), "api");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("USE_MOCK_API", "maybe")]).is_err());
        assert!(config_from(&[("DEFAULT_PAGE_SIZE", "0")]).is_err());
        assert!(config_from(&[("DEFAULT_PAGE_SIZE", "500")]).is_err());
        assert!(config_from(&[("AMAZON_FEE_RATE", "1.5")]).is_err());
        assert!(config_from(&[("MOCK_DATASET", "huge")]).is_err());
        assert!(config_from(&[("USE_MOCK_API", "false"), ("API_BASE_URL", "ftp://x")]).is_err());
        assert!(config_from(&[("USE_MOCK_API", "false"), ("API_BASE_URL", "/api")]).is_err());
    }

    #[test]
    fn test_base_url_not_checked_in_mock_mode() {
        assert!(config_from(&[("API_BASE_URL", "/api")]).is_ok());
    }
}
