use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveU64, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not set
/// explicitly on the command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "uri")
        && let Some(uri) = config.uri.clone()
    {
        args.uri = Some(uri);
    }

    if !is_cli(matches, "connections")
        && let Some(clients) = config.clients
    {
        args.connections = ensure_positive_usize(clients, "clients")?;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = duration;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout
    {
        args.timeout = ensure_positive_u64(timeout, "timeout")?;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = body;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            let pair = parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?;
            parsed.push(pair);
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "expected_status_code")
        && let Some(expect) = config.expect
    {
        args.expected_status_code = expect;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.as_ref()
    {
        args.output = Some(PathBuf::from(output));
    }

    if !is_cli(matches, "debug")
        && let Some(debug) = config.debug
    {
        args.debug = debug;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &'static str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}
