use std::ffi::OsString;
use std::path::Path;

use barrage::{
    app::{self, RunCoordinator},
    args::{BenchArgs, DEFAULT_CONFIG_FILES},
    config,
    domain::RunConfig,
    error::{AppError, AppResult, ValidationError},
};
use clap::{ArgMatches, CommandFactory, FromArgMatches};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some(config_file) = config::load_config(args.config.as_deref())? {
        config::apply_config(&mut args, &matches, &config_file)?;
    }

    crate::logger::init_logging(args.debug, args.no_color);

    let run_config = match args.to_run_config() {
        Ok(run_config) => run_config,
        Err(err) => {
            tracing::error!("{}", err);
            return Err(err);
        }
    };
    app::print_parameters(
        &run_config,
        args.output.as_deref(),
        args.debug,
        args.no_color,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(run_config, &args))
}

/// Parses the command line.
///
/// An empty invocation without a default config file has no uri to run
/// against: it prints help and fails.
fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let mut cmd = BenchArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Err(AppError::validation(ValidationError::MissingUri));
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;

    Ok((args, matches))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(run_config: RunConfig, args: &BenchArgs) -> AppResult<()> {
    let result = RunCoordinator::new(run_config).run().await?;
    app::print_results(&result, args.no_color);

    if let Some(path) = args.output.as_deref() {
        match app::write_result(&result, path).await {
            Ok(()) => println!("Results written to {}", path.display()),
            Err(err) => tracing::error!("Error writing results: {}", err),
        }
    }
    Ok(())
}
