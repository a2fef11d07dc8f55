use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Where confirmed reservations are persisted between runs. Empty
    /// disables persistence and keeps the store in memory only
    #[serde(default = "default_reservations_path")]
    pub reservations_path: String,
}

fn default_reservations_path() -> String {
    "data/reservations.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Optional path to a flights dataset; the builtin inventory is used
    /// when absent
    #[serde(default)]
    pub flights_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Layering: defaults, then the RUN_MODE file, then an untracked
            // local override, then AROYA__-prefixed environment variables
            // (e.g. `AROYA__SERVER__PORT=9000`)
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("AROYA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
