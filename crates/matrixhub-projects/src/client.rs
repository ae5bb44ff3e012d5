//! Asynchronous MatrixHub project client.

use crate::models::CreateProjectRequest;
use crate::readiness::{self, HealthProbe};
use crate::Result;
use async_trait::async_trait;
use matrixhub_core::client::ClientConfig;
use matrixhub_core::config::E2eConfig;
use matrixhub_core::{classify, Error, OperationResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!("matrixhub-e2e/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";
const HEALTH_PATH: &str = "healthz";
const PROJECTS_PATH: [&str; 3] = ["api", "v1alpha1", "projects"];

/// Builder for [`ProjectClient`].
#[derive(Debug, Clone)]
pub struct ProjectClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    user_agent: String,
}

impl ProjectClientBuilder {
    /// Create a builder for the specified base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::from_url(Url::parse(base_url.as_ref())?)
    }

    /// Create a builder from an end-to-end configuration.
    pub fn from_config(config: &E2eConfig) -> Result<Self> {
        Ok(Self::from_url(config.parse_base_url()?)?.with_http_config(config.client_config()))
    }

    fn from_url(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidEndpoint(format!(
                "`{base_url}` cannot be used as a base URL"
            )));
        }

        Ok(Self {
            base_url,
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub const fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = timeout;
        self
    }

    /// Override the readiness poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.http_config.poll_interval = interval;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ProjectClient> {
        let http = ClientBuilder::new()
            .user_agent(&self.user_agent)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .build()
            .map_err(|err| {
                Error::ConfigError(format!("Failed to build MatrixHub HTTP client: {err}"))
            })?;

        Ok(ProjectClient {
            http,
            base_url: self.base_url,
            config: self.http_config,
        })
    }
}

/// Asynchronous client for the MatrixHub project API.
///
/// Clones share the underlying connection pool. Every call takes a
/// [`CancellationToken`] and returns [`Error::Cancelled`] if it fires
/// before the exchange completes.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    http: Client,
    base_url: Url,
    config: ClientConfig,
}

impl ProjectClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ProjectClientBuilder::new(base_url)?.build()
    }

    /// Construct a client from an end-to-end configuration.
    pub fn from_config(config: &E2eConfig) -> Result<Self> {
        ProjectClientBuilder::from_config(config)?.build()
    }

    /// Start a builder for the given base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ProjectClientBuilder> {
        ProjectClientBuilder::new(base_url)
    }

    /// Return the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the HTTP configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a project.
    ///
    /// The name is sent unchanged; validation is left to the service.
    pub async fn create_project(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let url = self.collection_url()?;
        let body = serde_json::to_vec(&CreateProjectRequest::new(name))?;
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body);

        self.send("create_project", request, cancel).await
    }

    /// Fetch a project by name.
    pub async fn get_project(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let request = self.http.get(self.project_url(name)?).header(ACCEPT, JSON);
        self.send("get_project", request, cancel).await
    }

    /// Delete a project by name.
    ///
    /// Some server builds do not implement this endpoint; callers cleaning
    /// up after a test should ignore both outcomes.
    pub async fn delete_project(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        let request = self.http.delete(self.project_url(name)?).header(ACCEPT, JSON);
        self.send("delete_project", request, cancel).await
    }

    /// Probe `/healthz`. Succeeds only on an exact 200.
    pub async fn health_check(&self, cancel: &CancellationToken) -> Result<()> {
        let url = self.endpoint(&[HEALTH_PATH])?;
        let request = self.http.get(url);

        let status = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(Error::Cancelled("health check cancelled".to_string()));
            }
            response = request.send() => response?.status(),
        };

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(Error::Unhealthy {
                status: status.as_u16(),
            })
        }
    }

    /// Poll the health endpoint until it succeeds or `timeout` elapses.
    ///
    /// Probes run every [`ClientConfig::poll_interval`].
    pub async fn wait_until_ready(
        &self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        info!(base_url = %self.base_url, ?timeout, "Waiting for MatrixHub to be ready");
        readiness::wait_until_ready(self, timeout, self.config.poll_interval, cancel).await
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<OperationResult> {
        debug!(operation, "Sending MatrixHub request");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(|err| {
                Error::HttpError(format!("failed to read {operation} response: {err}"))
            })?;
            Ok::<_, Error>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(Error::Cancelled(format!("{operation} cancelled")));
            }
            exchange = exchange => exchange?,
        };

        let result = classify(status, &body);
        debug!(
            operation,
            http_status = result.http_status,
            succeeded = result.succeeded,
            error_code = ?result.error_code(),
            "MatrixHub request completed"
        );
        Ok(result)
    }

    fn collection_url(&self) -> Result<Url> {
        self.endpoint(&PROJECTS_PATH)
    }

    /// URL of a single project.
    ///
    /// `.` and `..` (in any percent-encoded spelling) are dot segments to
    /// every URL parser and cannot name a single path segment, so they are
    /// refused rather than resolved against the collection.
    fn project_url(&self, name: &str) -> Result<Url> {
        if matches!(name, "." | "..") {
            return Err(Error::InvalidEndpoint(format!(
                "project name `{name}` cannot be used as a path segment"
            )));
        }

        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| self.not_a_base())?
            .push(name);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| self.not_a_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn not_a_base(&self) -> Error {
        Error::InvalidEndpoint(format!("`{}` cannot be used as a base URL", self.base_url))
    }
}

#[async_trait]
impl HealthProbe for ProjectClient {
    async fn probe(&self, cancel: &CancellationToken) -> Result<()> {
        self.health_check(cancel).await
    }
}

/// Build a client for `base_url` and wait for the service to be ready.
pub async fn wait_for_service_ready(
    base_url: impl AsRef<str>,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<()> {
    ProjectClient::new(base_url)?
        .wait_until_ready(timeout, cancel)
        .await
}
