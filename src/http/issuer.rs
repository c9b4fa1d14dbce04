use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::{Client, Method, Request};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    args::DEFAULT_USER_AGENT,
    domain::RunConfig,
    error::{AppError, AppResult, HttpError},
    metrics::RequestOutcome,
};

/// Builds the HTTP client shared by all workers of a run.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed.
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Performs one request/response cycle per call against the run's target.
#[derive(Debug, Clone)]
pub struct RequestIssuer {
    client: Client,
    config: Arc<RunConfig>,
    method: Method,
}

impl RequestIssuer {
    #[must_use]
    pub fn new(client: Client, config: Arc<RunConfig>) -> Self {
        let method = Method::from(config.method);
        Self {
            client,
            config,
            method,
        }
    }

    fn build_request(&self) -> Result<Request, reqwest::Error> {
        let mut builder = self
            .client
            .request(self.method.clone(), self.config.uri.as_str());
        for (key, value) in &self.config.headers {
            builder = builder.header(key, value);
        }
        if !self.config.body.is_empty() {
            builder = builder.body(self.config.body.clone());
        }
        builder.build()
    }

    /// Sends one request and drains the response body.
    ///
    /// Never fails: build, transport and body errors all come back as a
    /// failed outcome so the calling worker keeps looping.
    pub async fn issue(&self) -> RequestOutcome {
        let start = Instant::now();
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                debug!("Error creating request: {}", err);
                return RequestOutcome::failure(start.elapsed(), false);
            }
        };
        let bytes_written = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map_or(0, |body| u64::try_from(body.len()).unwrap_or(u64::MAX));

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!("Request error: {}", err);
                return RequestOutcome::failure(start.elapsed(), err.is_timeout());
            }
        };
        let status_code = response.status().as_u16();

        match drain_response_body(response).await {
            Ok(bytes_read) => {
                RequestOutcome::success(start.elapsed(), status_code, bytes_read, bytes_written)
            }
            Err(err) => {
                debug!("Failed to read response body: {}", err);
                RequestOutcome::failure(start.elapsed(), err.is_timeout())
            }
        }
    }
}

/// Reads the body to the end so the connection can go back to the pool.
async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
