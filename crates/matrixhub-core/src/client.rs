//! HTTP client settings and default timing constants.
//!
//! This module provides the transport configuration shared by MatrixHub API
//! clients, along with the timeouts used by the end-to-end harness.

use std::time::Duration;

/// Default MatrixHub API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:9527";

/// Default timeout for a single API request (in seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default time to wait for the service to become ready (in seconds)
pub const DEFAULT_SERVICE_READY_TIMEOUT: u64 = 180;

/// Default interval between readiness probes (in milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default connect timeout (in seconds)
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Harness timeouts

/// Time allowed for a pod to start
pub const POD_START_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Time allowed for a pod to restart
pub const POD_RESTART_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Time allowed for a command executed in a pod
pub const EXEC_COMMAND_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Time allowed for an expected event to occur
pub const EVENT_OCCUR_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed for a resource to be deleted
pub const RESOURCE_DELETE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Time allowed for a batch of resources to be created
pub const BATCH_CREATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Time allowed for informers to sync
pub const INFORMER_SYNC_STATUS_TIME: Duration = Duration::from_secs(30);

/// Pause inserted between dependent operations
pub const FORCED_WAITING_TIME: Duration = Duration::from_secs(1);

/// HTTP client configuration.
///
/// Controls request timeouts, readiness polling and connection pooling. The
/// value is copied into a client at construction and never changes after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Interval between readiness probes
    pub poll_interval: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the readiness poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
