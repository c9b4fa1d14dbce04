pub const DEFAULT_USER_AGENT: &str = concat!("barrage/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["barrage.toml", "barrage.json"];
