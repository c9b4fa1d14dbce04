use std::time::Duration;

use crate::args::HttpMethod;

/// Immutable description of one benchmark run.
///
/// Built once before the run starts and shared read-only (behind an `Arc`)
/// by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub uri: String,
    pub method: HttpMethod,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub connections: usize,
    pub duration: Duration,
    pub request_timeout: Duration,
    /// Informational only. Responses with a different status still count as
    /// successful exchanges; they are tallied as unexpected.
    pub expected_status_code: u16,
}

impl RunConfig {
    pub const DEFAULT_CONNECTIONS: usize = 10;
    pub const DEFAULT_DURATION_SECS: u64 = 10;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: HttpMethod::Get,
            body: String::new(),
            headers: Vec::new(),
            connections: Self::DEFAULT_CONNECTIONS,
            duration: Duration::from_secs(Self::DEFAULT_DURATION_SECS),
            request_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            expected_status_code: Self::DEFAULT_EXPECTED_STATUS,
        }
    }

    #[must_use]
    pub const fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }

    #[must_use]
    pub fn body_len(&self) -> u64 {
        u64::try_from(self.body.len()).unwrap_or(u64::MAX)
    }
}
