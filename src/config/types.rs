use serde::Deserialize;

use crate::args::HttpMethod;

/// On-disk run settings. Every field is optional; explicit CLI flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub uri: Option<String>,
    #[serde(alias = "connections")]
    pub clients: Option<usize>,
    pub duration: Option<u64>,
    pub timeout: Option<u64>,
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
    pub headers: Option<Vec<String>>,
    #[serde(alias = "expected_status")]
    pub expect: Option<u16>,
    pub output: Option<String>,
    pub debug: Option<bool>,
    pub no_color: Option<bool>,
}
