use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

fn default_max_pool_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Upper bound on concurrent per-host resolutions in cross-host lookups.
    #[serde(default = "default_crosshost_concurrency")]
    pub crosshost_concurrency: usize,
    /// Window used for cross-host lookups when the request gives no range.
    #[serde(default = "default_window_secs")]
    pub default_window_secs: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            crosshost_concurrency: default_crosshost_concurrency(),
            default_window_secs: default_window_secs(),
        }
    }
}

fn default_crosshost_concurrency() -> usize {
    8
}

fn default_window_secs() -> i64 {
    3600
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.host.is_empty(),
            "database.host must be non-empty"
        );
        anyhow::ensure!(
            !self.database.database.is_empty(),
            "database.database must be non-empty"
        );
        anyhow::ensure!(!self.database.user.is_empty(), "database.user must be non-empty");
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.query.crosshost_concurrency > 0,
            "query.crosshost_concurrency must be > 0, got {}",
            self.query.crosshost_concurrency
        );
        anyhow::ensure!(
            self.query.default_window_secs > 0,
            "query.default_window_secs must be > 0, got {}",
            self.query.default_window_secs
        );
        Ok(())
    }
}
