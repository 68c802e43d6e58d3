//! Server configuration, read from flags or the environment.

use chrono::Duration;
use clap::Parser;

use crate::inventory::alerts::DEFAULT_ALERT_WINDOW_DAYS;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_KEY_STORAGE_POINT: &str = "Claviculário A-01";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Asset inventory API server.
#[derive(Parser, Debug, Clone)]
#[command(name = "asset-inventory", about = "Asset inventory API server")]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// Origins allowed by CORS, comma separated.
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:5173,http://localhost:8080"
    )]
    pub allowed_origins: Vec<String>,

    /// How many days ahead maintenance, licenses and contracts raise alerts.
    #[arg(long, env = "ALERT_WINDOW_DAYS", default_value_t = DEFAULT_ALERT_WINDOW_DAYS)]
    pub alert_window_days: u32,

    /// Storage point assigned to newly registered keys.
    #[arg(long, env = "KEY_STORAGE_POINT", default_value = DEFAULT_KEY_STORAGE_POINT)]
    pub key_storage_point: String,

    /// Load the demo users, assets and keys at startup.
    #[arg(long, env = "SEED_DEMO_DATA", default_value_t = true, action = clap::ArgAction::Set)]
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            alert_window_days: DEFAULT_ALERT_WINDOW_DAYS,
            key_storage_point: DEFAULT_KEY_STORAGE_POINT.to_string(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn with_alert_window_days(mut self, days: u32) -> Self {
        self.alert_window_days = days;
        self
    }

    pub fn with_key_storage_point(mut self, storage_point: impl Into<String>) -> Self {
        self.key_storage_point = storage_point.into();
        self
    }

    pub fn with_seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub fn alert_window(&self) -> Duration {
        Duration::days(i64::from(self.alert_window_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_over_defaults() {
        let config = AppConfig::parse_from([
            "asset-inventory",
            "--alert-window-days",
            "45",
            "--allowed-origins",
            "https://inventory.example.com,http://localhost:4000",
            "--seed-demo-data",
            "false",
        ]);
        assert_eq!(config.alert_window_days, 45);
        assert_eq!(
            config.allowed_origins,
            vec!["https://inventory.example.com", "http://localhost:4000"]
        );
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn builders_override_defaults() {
        let config = AppConfig::default().with_alert_window_days(7).with_seed_demo_data(false);
        assert_eq!(config.alert_window(), Duration::days(7));
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.key_storage_point, "Claviculário A-01");
        assert!(!config.seed_demo_data);
    }
}
