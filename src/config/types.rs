// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Routes configuration: which handler name each request gets
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Matched in order, first match wins
    #[serde(default)]
    pub handlers: Vec<HandlerRoute>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            handlers: vec![HandlerRoute {
                name: Some("foo".to_string()),
                match_rule: RouteMatch {
                    prefix: Some("/foo".to_string()),
                    ..RouteMatch::default()
                },
                handler: "foo_handler".to_string(),
            }],
        }
    }
}

/// Assigns a handler name to matching requests
#[derive(Debug, Deserialize, Clone)]
pub struct HandlerRoute {
    /// Optional route name for identification
    #[serde(default)]
    pub name: Option<String>,
    /// Match conditions (prefix, path, headers)
    #[serde(rename = "match", default)]
    pub match_rule: RouteMatch,
    /// Handler name given to matching requests
    pub handler: String,
}

/// Route matching conditions
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RouteMatch {
    /// Path prefix match (e.g., "/api" matches "/api/users")
    #[serde(default)]
    pub prefix: Option<String>,
    /// Exact path match
    #[serde(default)]
    pub path: Option<String>,
    /// Header matchers (optional)
    #[serde(default)]
    pub headers: Option<Vec<HeaderMatcher>>,
}

/// Header matching condition
#[derive(Debug, Deserialize, Clone)]
pub struct HeaderMatcher {
    /// Header name
    pub name: String,
    /// Expected value (exact match)
    #[serde(default)]
    pub exact: Option<String>,
    /// Prefix match
    #[serde(default)]
    pub prefix: Option<String>,
    /// Check if header is present
    #[serde(default)]
    pub present: Option<bool>,
}
