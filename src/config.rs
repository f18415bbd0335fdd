use crate::error::{ApiError, Result};
use crate::pricing::PriceRangeSettings;
use crate::resolver::OperationStatusMapping;
use reqwest::Url;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RELAX_PERCENT: i64 = 20;

/// Settings for talking to the listings backend and for the search pipeline
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
    pub operation: OperationStatusMapping,
    pub pricing: PriceRangeSettings,
    /// How far the relaxed retry widens each price bound, in percent
    pub relax_percent: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("Invalid default base URL"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("geohogar-scout/", env!("CARGO_PKG_VERSION")).to_string(),
            operation: OperationStatusMapping::default(),
            pricing: PriceRangeSettings::default(),
            relax_percent: DEFAULT_RELAX_PERCENT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    /// Build a config from `GEOHOGAR_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("GEOHOGAR_API_URL") {
            config = config.with_base_url(&url)?;
        }
        if let Some(secs) = lookup("GEOHOGAR_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("GEOHOGAR_TIMEOUT_SECS", &secs)?);
        }
        if let Some(percent) = lookup("GEOHOGAR_RELAX_PERCENT") {
            config = config.with_relax_percent(parse_var("GEOHOGAR_RELAX_PERCENT", &percent)?)?;
        }

        match (
            lookup("GEOHOGAR_RENT_STATUS_ID"),
            lookup("GEOHOGAR_SALE_STATUS_ID"),
        ) {
            (Some(rent), Some(sale)) => {
                config.operation = OperationStatusMapping::Explicit {
                    rent: parse_var("GEOHOGAR_RENT_STATUS_ID", &rent)?,
                    sale: parse_var("GEOHOGAR_SALE_STATUS_ID", &sale)?,
                };
            }
            (None, None) => {}
            _ => {
                return Err(ApiError::Config(
                    "GEOHOGAR_RENT_STATUS_ID and GEOHOGAR_SALE_STATUS_ID must be set together"
                        .to_string(),
                ))
            }
        }

        Ok(config)
    }

    /// Set the API root. A trailing slash is added so relative joins keep
    /// the last path segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        self.base_url = Url::parse(&normalized)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_operation(mut self, operation: OperationStatusMapping) -> Self {
        self.operation = operation;
        self
    }

    pub fn with_pricing(mut self, pricing: PriceRangeSettings) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_relax_percent(mut self, percent: i64) -> Result<Self> {
        if !(0..=100).contains(&percent) {
            return Err(ApiError::Config(format!(
                "relax percent must be between 0 and 100, got {percent}"
            )));
        }
        self.relax_percent = percent;
        Ok(self)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::Config(format!("{key} has an invalid value: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.relax_percent, 20);
        assert!(matches!(config.operation, OperationStatusMapping::Keywords { .. }));
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("GEOHOGAR_API_URL", "http://10.0.0.5:4000/api"),
            ("GEOHOGAR_TIMEOUT_SECS", "5"),
            ("GEOHOGAR_RELAX_PERCENT", "10"),
            ("GEOHOGAR_RENT_STATUS_ID", "1"),
            ("GEOHOGAR_SALE_STATUS_ID", "2"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "http://10.0.0.5:4000/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.relax_percent, 10);
        assert_eq!(
            config.operation,
            OperationStatusMapping::Explicit { rent: 1, sale: 2 }
        );
    }

    #[test]
    fn rejects_half_configured_status_ids() {
        let err = ApiConfig::from_lookup(lookup(&[("GEOHOGAR_RENT_STATUS_ID", "1")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = ApiConfig::from_lookup(lookup(&[("GEOHOGAR_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("GEOHOGAR_TIMEOUT_SECS"));

        assert!(ApiConfig::default().with_relax_percent(150).is_err());
    }

    #[test]
    fn rejects_bad_url() {
        assert!(matches!(
            ApiConfig::new("not a url").unwrap_err(),
            ApiError::InvalidUrl(_)
        ));
    }
}
