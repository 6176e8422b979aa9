//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub game: GameConfig,

    #[serde(default)]
    pub payments: PaymentsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins, empty means any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory served under `/web` (built UI and card images)
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> String {
    "web".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            web_dir: default_web_dir(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("football-stars").join("game.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./game.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Economy and match tuning
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_starting_coins")]
    pub starting_coins: i64,

    #[serde(default = "default_pack_price")]
    pub pack_price: i64,

    #[serde(default = "default_daily_reward")]
    pub daily_reward: (i64, i64),

    #[serde(default = "default_enemy_power")]
    pub enemy_power: (i64, i64),

    #[serde(default = "default_win_reward")]
    pub win_reward: (i64, i64),

    #[serde(default = "default_win_rating")]
    pub win_rating: i64,

    #[serde(default = "default_loss_rating")]
    pub loss_rating: i64,

    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,

    /// JSON player catalog; the bundled one is used when unset
    #[serde(default)]
    pub players_file: Option<String>,

    /// JSON club catalog; the bundled one is used when unset
    #[serde(default)]
    pub clubs_file: Option<String>,
}

fn default_starting_coins() -> i64 {
    1000
}

fn default_pack_price() -> i64 {
    300
}

fn default_daily_reward() -> (i64, i64) {
    (200, 500)
}

fn default_enemy_power() -> (i64, i64) {
    (150, 300)
}

fn default_win_reward() -> (i64, i64) {
    (200, 400)
}

fn default_win_rating() -> i64 {
    25
}

fn default_loss_rating() -> i64 {
    10
}

fn default_leaderboard_limit() -> usize {
    20
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            pack_price: default_pack_price(),
            daily_reward: default_daily_reward(),
            enemy_power: default_enemy_power(),
            win_reward: default_win_reward(),
            win_rating: default_win_rating(),
            loss_rating: default_loss_rating(),
            leaderboard_limit: default_leaderboard_limit(),
            players_file: None,
            clubs_file: None,
        }
    }
}

/// Telegram Payments configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    /// Provider token from BotFather; coin purchases are disabled without it
    #[serde(default)]
    pub provider_token: Option<String>,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// How many coins one unit of currency buys
    #[serde(default = "default_coins_per_unit")]
    pub coins_per_unit: i64,

    #[serde(default = "default_max_amount")]
    pub max_amount: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_coins_per_unit() -> i64 {
    10
}

fn default_max_amount() -> i64 {
    100_000
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            provider_token: None,
            currency: default_currency(),
            coins_per_unit: default_coins_per_unit(),
            max_amount: default_max_amount(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("football-stars").join("config.toml")),
            Some(PathBuf::from("/etc/football-stars/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("FOOTBALL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("FOOTBALL_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(web_dir) = var("FOOTBALL_WEB_DIR") {
            self.server.web_dir = web_dir;
        }

        if let Some(db_path) = var("FOOTBALL_DB_PATH") {
            self.storage.db_path = db_path;
        }

        if let Some(token) = var("FOOTBALL_PROVIDER_TOKEN") {
            self.payments.provider_token = Some(token).filter(|t| !t.is_empty());
        }

        if let Some(level) = var("FOOTBALL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FOOTBALL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Football Stars Configuration
#
# Environment variables override these settings:
# - FOOTBALL_HOST
# - FOOTBALL_PORT
# - FOOTBALL_WEB_DIR
# - FOOTBALL_DB_PATH
# - FOOTBALL_PROVIDER_TOKEN
# - FOOTBALL_LOG_LEVEL
# - FOOTBALL_LOG_FORMAT

[server]
host = "0.0.0.0"
port = 5000

# Allowed CORS origins (empty = any)
cors_origins = []

# Served under /web: the built UI and images/players/*
web_dir = "web"

[storage]
db_path = "./game.db"

[game]
starting_coins = 1000
pack_price = 300

# Inclusive [min, max] ranges
daily_reward = [200, 500]
enemy_power = [150, 300]
win_reward = [200, 400]

win_rating = 25
loss_rating = 10
leaderboard_limit = 20

# Custom catalogs (bundled ones are used when unset)
# players_file = "players.json"
# clubs_file = "clubs.json"

[payments]
# Provider token from BotFather. Coin purchases are disabled without it.
# provider_token = ""
currency = "USD"

# 10 coins = 1 USD
coins_per_unit = 10
max_amount = 100000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
