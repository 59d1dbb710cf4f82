// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HandlerRoute, HeaderMatcher, HttpConfig, LoggingConfig, PerformanceConfig,
    RouteMatch, RoutesConfig, ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Layers, lowest first: built-in defaults, the file (if present),
    /// then `SERVER_*` environment variables (`SERVER_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "foo_module/1.0")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn is_debug(&self) -> bool {
        self.logging.level.eq_ignore_ascii_case("debug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, PoisonError};

    // Environment variables are process-wide; config loads in this module
    // must not overlap with the env override test
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_defaults_without_file() {
        let _guard = env_guard();
        let cfg = Config::load_from("does-not-exist/foo_module_config").unwrap();
        assert_eq!(cfg.http.server_name, "foo_module/1.0");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.performance.max_connections.is_none());

        assert_eq!(cfg.routes.handlers.len(), 1);
        assert_eq!(cfg.routes.handlers[0].handler, "foo_handler");
        assert_eq!(cfg.routes.handlers[0].match_rule.prefix.as_deref(), Some("/foo"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = env_guard();
        let path = std::env::temp_dir().join(format!(
            "foo_module_config_test_{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "0.0.0.0"
port = 9090
workers = 2

[performance]
max_connections = 64

[[routes.handlers]]
handler = "foo_handler"
[routes.handlers.match]
path = "/hello"
"#
        )
        .unwrap();
        drop(file);

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.routes.handlers.len(), 1);
        assert_eq!(cfg.routes.handlers[0].match_rule.path.as_deref(), Some("/hello"));
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let _guard = env_guard();
        let mut cfg = Config::load_from("does-not-exist/foo_module_config").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let _guard = env_guard();
        std::env::set_var("SERVER_SERVER__PORT", "47913");
        std::env::set_var("SERVER_HTTP__SERVER_NAME", "foo_module-env-test");

        let cfg = Config::load_from("does-not-exist/foo_module_config");

        std::env::remove_var("SERVER_SERVER__PORT");
        std::env::remove_var("SERVER_HTTP__SERVER_NAME");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.server.port, 47913);
        assert_eq!(cfg.http.server_name, "foo_module-env-test");
        // untouched keys keep their defaults
        assert_eq!(cfg.server.host, "127.0.0.1");
    }
}
