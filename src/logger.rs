use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Fallback filter for `--debug`; dependency crates stay at info.
const DEBUG_FILTER: &str = "barrage=debug,info";
const DEFAULT_FILTER: &str = "info";

pub fn init_logging(debug: bool, no_color: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let filter = std::env::var("BARRAGE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(true, false);
        init_logging(false, true);
    }
}
