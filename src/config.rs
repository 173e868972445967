//! Configuration types for weibo-timeline

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest page size the remote timeline endpoint accepts per request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Remote API endpoint configuration
///
/// Groups settings describing where and how to reach the API server.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server (default: `https://api.weibo.com`)
    ///
    /// Overridable so tests can point the client at a local mock server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment (default: "2")
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Timeout applied to each individual HTTP request (default: 30 seconds)
    ///
    /// Distinct from the aggregation job deadline: this bounds a single
    /// page fetch at the transport level.
    #[serde(default = "default_request_timeout", with = "duration_secs_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Aggregation engine configuration (page size, concurrency, liveness tick)
///
/// Used as a nested sub-config within [`Config`] and consumed directly by
/// [`TimelineAggregator`](crate::aggregator::TimelineAggregator).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Statuses requested per page (default: 100, must be 1..=[`MAX_PAGE_SIZE`])
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hard ceiling on concurrent page workers (default: 20)
    ///
    /// Bounds simultaneous outbound connections to the remote service,
    /// independent of how many statuses were requested.
    #[serde(default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: usize,

    /// Liveness tick re-evaluating the job deadline (default: 1 second)
    ///
    /// The collector wakes at least this often even when no worker produces
    /// or completes, so a configured timeout overshoots by at most roughly
    /// one tick.
    #[serde(default = "default_tick_interval", with = "duration_millis_serde")]
    pub tick_interval: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_concurrent_pages: default_max_concurrent_pages(),
            tick_interval: default_tick_interval(),
        }
    }
}

impl AggregatorConfig {
    /// Validate engine settings, returning [`Error::Config`] on the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config {
                message: format!(
                    "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.page_size
                ),
                key: Some("page_size".to_string()),
            });
        }
        if self.max_concurrent_pages == 0 {
            return Err(Error::Config {
                message: "max_concurrent_pages must be greater than zero".to_string(),
                key: Some("max_concurrent_pages".to_string()),
            });
        }
        if self.tick_interval.is_zero() {
            return Err(Error::Config {
                message: "tick_interval must be greater than zero".to_string(),
                key: Some("tick_interval".to_string()),
            });
        }
        Ok(())
    }
}

/// Main configuration for weibo-timeline
///
/// Fields are organized into logical sub-configs:
/// - [`api`](ApiConfig) - endpoint location and per-request transport timeout
/// - [`aggregator`](AggregatorConfig) - page size, worker ceiling, liveness tick
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML format
/// has no nesting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API endpoint settings
    #[serde(flatten)]
    pub api: ApiConfig,

    /// Aggregation engine settings
    #[serde(flatten)]
    pub aggregator: AggregatorConfig,
}

impl Config {
    /// Validate the whole configuration, returning [`Error::Config`] on the
    /// first violation.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(Error::Config {
                message: "base_url must not be empty".to_string(),
                key: Some("base_url".to_string()),
            });
        }
        if self.api.api_version.is_empty() {
            return Err(Error::Config {
                message: "api_version must not be empty".to_string(),
                key: Some("api_version".to_string()),
            });
        }
        self.aggregator.validate()
    }
}

fn default_base_url() -> String {
    "https://api.weibo.com".to_string()
}

fn default_api_version() -> String {
    "2".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_page_size() -> usize {
    100
}

fn default_max_concurrent_pages() -> usize {
    20
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

// Duration serialization helper (whole seconds)
mod duration_secs_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds, for sub-second intervals)
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.weibo.com");
        assert_eq!(config.api.api_version, "2");
        assert_eq!(config.api.request_timeout, Duration::from_secs(30));
        assert_eq!(config.aggregator.page_size, 100);
        assert_eq!(config.aggregator.max_concurrent_pages, 20);
        assert_eq!(config.aggregator.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn default_config_validates() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn empty_json_object_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.aggregator.page_size, 100);
        assert_eq!(config.api.base_url, "https://api.weibo.com");
    }

    #[test]
    fn flattened_fields_round_trip_through_json() {
        let config = Config {
            api: ApiConfig {
                base_url: "http://localhost:9090".to_string(),
                api_version: "2".to_string(),
                request_timeout: Duration::from_secs(5),
            },
            aggregator: AggregatorConfig {
                page_size: 50,
                max_concurrent_pages: 4,
                tick_interval: Duration::from_millis(250),
            },
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        // Flattened: sub-config fields appear at the top level
        assert_eq!(parsed["base_url"], "http://localhost:9090");
        assert_eq!(parsed["page_size"], 50);
        assert_eq!(parsed["tick_interval"], 250);
        assert_eq!(parsed["request_timeout"], 5);

        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.aggregator.page_size, 50);
        assert_eq!(restored.aggregator.tick_interval, Duration::from_millis(250));
        assert_eq!(restored.api.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let config = AggregatorConfig {
            page_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config { key: Some(ref k), .. } if k == "page_size"
        ));
    }

    #[test]
    fn oversized_page_size_fails_validation() {
        let config = AggregatorConfig {
            page_size: MAX_PAGE_SIZE + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn page_size_at_max_is_accepted() {
        let config = AggregatorConfig {
            page_size: MAX_PAGE_SIZE,
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn zero_max_concurrent_pages_fails_validation() {
        let config = AggregatorConfig {
            max_concurrent_pages: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config { key: Some(ref k), .. } if k == "max_concurrent_pages"
        ));
    }

    #[test]
    fn zero_tick_interval_fails_validation() {
        let config = AggregatorConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let config = Config {
            api: ApiConfig {
                base_url: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config { key: Some(ref k), .. } if k == "base_url"
        ));
    }
}
