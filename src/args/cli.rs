use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::RunConfig;
use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::parsers::{parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrency-bounded HTTP benchmark - a fixed pool of workers hammers one endpoint for a fixed duration and reports throughput, latency, and status-code statistics."
)]
pub struct BenchArgs {
    /// The uri to benchmark against (required, may come from the config file)
    #[arg(long, short = 'u')]
    pub uri: Option<String>,

    /// Number of connections (concurrent workers) to open to the server
    #[arg(
        long = "clients",
        short = 'c',
        alias = "connections",
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub connections: PositiveUsize,

    /// Number of seconds to run the benchmark
    #[arg(long = "duration", short = 'd', default_value = "10")]
    pub duration: u64,

    /// Number of seconds before a single request times out
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub timeout: PositiveU64,

    /// HTTP method to use
    #[arg(long, short = 'm', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Request body to send
    #[arg(long, short = 'b', default_value = "")]
    pub body: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Expected status code (informational; mismatches are reported, not failed)
    #[arg(long = "expect", short = 'e', default_value = "200")]
    pub expected_status_code: u16,

    /// Output file to write results as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Log a diagnostic line for every failed request
    #[arg(long)]
    pub debug: bool,

    /// Disable colored console output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to a TOML or JSON config file (defaults to ./barrage.toml or ./barrage.json)
    #[arg(long)]
    pub config: Option<String>,
}

impl BenchArgs {
    /// Builds the immutable run configuration handed to the engine.
    ///
    /// # Errors
    ///
    /// Returns an error when the uri is missing, empty, unparsable, or not
    /// an http(s) URL.
    pub fn to_run_config(&self) -> AppResult<RunConfig> {
        let uri = self
            .uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| AppError::validation(ValidationError::MissingUri))?;

        let parsed = url::Url::parse(uri).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: uri.to_owned(),
                source: err,
            })
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::http(HttpError::UnsupportedScheme {
                url: uri.to_owned(),
                scheme: parsed.scheme().to_owned(),
            }));
        }

        Ok(RunConfig {
            uri: uri.to_owned(),
            method: self.method,
            body: self.body.clone(),
            headers: self.headers.clone(),
            connections: self.connections.get(),
            duration: Duration::from_secs(self.duration),
            request_timeout: Duration::from_secs(self.timeout.get()),
            expected_status_code: self.expected_status_code,
        })
    }
}
