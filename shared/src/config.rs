use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::filter::FilterPolicy;
use crate::notify::ToastTiming;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/api/rides";
pub const DEFAULT_CARD_STAGGER_MS: u64 = 100;

/// Runtime settings handed to the core by the shell.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    pub endpoint: String,
    pub nearby_max_km: f64,
    pub recent_limit: usize,
    pub card_stagger_ms: u64,
    pub toast: ToastTiming,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let policy = FilterPolicy::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            nearby_max_km: policy.nearby_max_km,
            recent_limit: policy.recent_limit,
            card_stagger_ms: DEFAULT_CARD_STAGGER_MS,
            toast: ToastTiming::default(),
        }
    }
}

impl FeedConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;

        if !self.nearby_max_km.is_finite() || self.nearby_max_km < 0.0 {
            return Err(ConfigError::InvalidNearbyThreshold(self.nearby_max_km));
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::ZeroRecentLimit);
        }
        if self.toast.dwell_ms == 0 {
            return Err(ConfigError::ZeroDwell);
        }
        Ok(())
    }

    /// Parses the endpoint, accepting only absolute http(s) URLs with a host.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            url: self.endpoint.clone(),
            reason,
        };

        let url = Url::parse(self.endpoint.trim()).map_err(|e| invalid(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".into()));
        }
        Ok(url)
    }

    #[must_use]
    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            nearby_max_km: self.nearby_max_km,
            recent_limit: self.recent_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint, "http://localhost:4000/api/rides");
        assert_eq!(config.nearby_max_km, 3.0);
        assert_eq!(config.recent_limit, 4);
        assert_eq!(config.toast.dwell_ms, 5000);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = FeedConfig::from_json("{}").unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = FeedConfig::from_json(
            r#"{"endpoint":"https://rides.example.com/api/rides","recentLimit":6,"toast":{"dwellMs":2000}}"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://rides.example.com/api/rides");
        assert_eq!(config.recent_limit, 6);
        assert_eq!(config.toast.dwell_ms, 2000);
        assert_eq!(config.toast.exit_ms, 300);
        assert_eq!(config.filter_policy().recent_limit, 6);
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let err = FeedConfig::from_json(r#"{"endpoint":"ftp://example.com/rides"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        let err = FeedConfig::from_json(r#"{"endpoint":"not a url"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert_eq!(
            FeedConfig::from_json(r#"{"recentLimit":0}"#).unwrap_err(),
            ConfigError::ZeroRecentLimit
        );
        assert!(matches!(
            FeedConfig::from_json(r#"{"nearbyMaxKm":-1.0}"#).unwrap_err(),
            ConfigError::InvalidNearbyThreshold(_)
        ));
        assert_eq!(
            FeedConfig::from_json(r#"{"toast":{"dwellMs":0}}"#).unwrap_err(),
            ConfigError::ZeroDwell
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            FeedConfig::from_json("{").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
