//! Configuration for the end-to-end harness.
//!
//! The harness resolves its settings from the environment exactly once and
//! passes explicit values to the client. Nothing in the client reads process
//! globals.

use crate::client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SERVICE_READY_TIMEOUT,
};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;
use validator::Validate;

/// Base URL override used by the project suite (checked first)
pub const ENV_APISERVER_URL: &str = "APISERVER_URL";
/// Base URL of the MatrixHub API
pub const ENV_MATRIXHUB_BASE_URL: &str = "MATRIXHUB_BASE_URL";
/// Name of the test cluster
pub const ENV_CLUSTER_NAME: &str = "E2E_CLUSTER_NAME";
/// Image under test
pub const ENV_MATRIXHUB_IMAGE: &str = "E2E_MATRIXHUB_IMAGE";
/// Kubeconfig for the test cluster
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

/// Default test cluster name
pub const DEFAULT_CLUSTER_NAME: &str = "matrixhub-e2e";
/// Default image under test
pub const DEFAULT_MATRIXHUB_IMAGE: &str = "ghcr.io/matrixhub-ai/matrixhub:latest";

/// Kubernetes namespace MatrixHub is deployed into
pub const MATRIXHUB_NAMESPACE: &str = "matrixhub";
/// MatrixHub service name
pub const MATRIXHUB_SERVICE_NAME: &str = "matrixhub";
/// MatrixHub service port
pub const MATRIXHUB_PORT: u16 = 9527;
/// MatrixHub deployment name
pub const MATRIXHUB_DEPLOYMENT: &str = "matrixhub";
/// MatrixHub configmap name
pub const MATRIXHUB_CONFIGMAP_NAME: &str = "matrixhub-config";

/// Settings for an end-to-end run against a MatrixHub deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct E2eConfig {
    /// MatrixHub API base URL
    #[validate(url)]
    pub base_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Readiness timeout in seconds
    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Interval between readiness probes in milliseconds
    #[validate(range(min = 10, max = 60000))]
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Test cluster name
    #[serde(default = "default_cluster_name")]
    pub cluster_name: String,

    /// Image under test
    #[serde(default = "default_image")]
    pub image: String,

    /// Optional kubeconfig path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_ready_timeout_secs() -> u64 {
    DEFAULT_SERVICE_READY_TIMEOUT
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_cluster_name() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

fn default_image() -> String {
    DEFAULT_MATRIXHUB_IMAGE.to_string()
}

impl E2eConfig {
    /// Create a configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved base URL is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. `APISERVER_URL` wins over
    /// `MATRIXHUB_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved base URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let base_url = var(ENV_APISERVER_URL)
            .or_else(|| var(ENV_MATRIXHUB_BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        debug!(base_url = %base_url, "resolved MatrixHub base URL");

        let mut config = Self::new(base_url)?;
        if let Some(cluster) = var(ENV_CLUSTER_NAME) {
            config.cluster_name = cluster;
        }
        if let Some(image) = var(ENV_MATRIXHUB_IMAGE) {
            config.image = image;
        }
        config.kubeconfig = var(ENV_KUBECONFIG).map(PathBuf::from);

        Ok(config)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set readiness timeout in seconds.
    #[must_use]
    pub const fn with_ready_timeout(mut self, seconds: u64) -> Self {
        self.ready_timeout_secs = seconds;
        self
    }

    /// Set the readiness poll interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the readiness timeout as a Duration.
    #[must_use]
    pub const fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    /// Get the poll interval as a Duration.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// HTTP client settings derived from this configuration.
    #[must_use]
    pub const fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_timeout(self.request_timeout())
            .with_poll_interval(self.poll_interval())
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid MatrixHub URL: {}", e)))
    }
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            ready_timeout_secs: default_ready_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            cluster_name: default_cluster_name(),
            image: default_image(),
            kubeconfig: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_e2e_config_new() {
        let config = E2eConfig::new("http://matrixhub.example.com:9527").unwrap();
        assert_eq!(config.base_url, "http://matrixhub.example.com:9527");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.ready_timeout_secs, 180);
        assert_eq!(config.cluster_name, DEFAULT_CLUSTER_NAME);
    }

    #[test]
    fn test_e2e_config_invalid_url() {
        let result = E2eConfig::new("not-a-url");
        match result {
            Err(Error::ConfigError(message)) => assert!(message.contains("base_url")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = E2eConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cluster_name, "matrixhub-e2e");
        assert_eq!(config.image, "ghcr.io/matrixhub-ai/matrixhub:latest");
        assert!(config.kubeconfig.is_none());
    }

    #[test]
    fn test_from_lookup_apiserver_url_wins() {
        let config = E2eConfig::from_lookup(lookup_from(&[
            (ENV_APISERVER_URL, "http://apiserver:8080"),
            (ENV_MATRIXHUB_BASE_URL, "http://matrixhub:9527"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://apiserver:8080");
    }

    #[test]
    fn test_from_lookup_empty_values_are_unset() {
        let config = E2eConfig::from_lookup(lookup_from(&[
            (ENV_APISERVER_URL, ""),
            (ENV_MATRIXHUB_BASE_URL, "http://matrixhub:9527"),
            (ENV_CLUSTER_NAME, ""),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://matrixhub:9527");
        assert_eq!(config.cluster_name, DEFAULT_CLUSTER_NAME);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = E2eConfig::from_lookup(lookup_from(&[
            (ENV_CLUSTER_NAME, "ci-cluster"),
            (ENV_MATRIXHUB_IMAGE, "registry.local/matrixhub:dev"),
            (ENV_KUBECONFIG, "/tmp/kubeconfig"),
        ]))
        .unwrap();
        assert_eq!(config.cluster_name, "ci-cluster");
        assert_eq!(config.image, "registry.local/matrixhub:dev");
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
    }

    #[test]
    fn test_from_lookup_rejects_bad_url() {
        let result = E2eConfig::from_lookup(lookup_from(&[(ENV_MATRIXHUB_BASE_URL, "nope")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_durations_and_client_config() {
        let config = E2eConfig::default()
            .with_request_timeout(5)
            .with_ready_timeout(60)
            .with_poll_interval(200);

        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.ready_timeout(), Duration::from_secs(60));
        assert_eq!(config.poll_interval(), Duration::from_millis(200));

        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.poll_interval, Duration::from_millis(200));
    }

    #[test]
    fn test_parse_base_url() {
        let config = E2eConfig::default();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(MATRIXHUB_PORT));
    }

    #[test]
    fn test_config_validation_ranges() {
        let mut config = E2eConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        config.poll_interval_ms = 1;
        assert!(config.validate().is_err());

        config.poll_interval_ms = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: E2eConfig =
            serde_json::from_str(r#"{"base_url":"http://matrixhub:9527"}"#).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.image, DEFAULT_MATRIXHUB_IMAGE);
    }
}
