//! Shared configuration for the core and the gateway.

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file (without extension is fine; the format is detected).
pub const ENV_CONFIG_PATH: &str = "CERTDESK_CONFIG";

/// Global application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by `/v1/status`.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// JSON knowledge file. When unset the built-in knowledge base is used.
    #[serde(default)]
    pub knowledge_path: Option<String>,
    /// Cosmetic pause before the assistant reply is returned, in milliseconds. 0 disables it.
    #[serde(default)]
    pub reply_delay_ms: u64,
    /// Queries longer than this (in chars) are rejected by the gateway.
    pub max_query_chars: usize,
    /// Open chat sessions the gateway keeps at once; new sessions are refused beyond this.
    pub max_sessions: usize,
    /// Sessions untouched for this long (seconds) are dropped by the gateway's sweeper.
    pub session_idle_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Certificate Desk".to_string(),
            port: 8001,
            knowledge_path: None,
            reply_delay_ms: 0,
            max_query_chars: 2000,
            max_sessions: 1000,
            session_idle_secs: 1800,
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `CERTDESK__*` > file at
    /// `CERTDESK_CONFIG` (or `config/gateway`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config/gateway".to_string());
        Self::load_from(&config_path)
    }

    /// Same as [`CoreConfig::load`] with an explicit file path. A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("reply_delay_ms", defaults.reply_delay_ms as i64)?
            .set_default("max_query_chars", defaults.max_query_chars as i64)?
            .set_default("max_sessions", defaults.max_sessions as i64)?
            .set_default("session_idle_secs", defaults.session_idle_secs as i64)?;

        let built = builder
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CERTDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        built.try_deserialize()
    }
}
