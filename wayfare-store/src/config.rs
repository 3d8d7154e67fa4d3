use std::env;
use std::time::Duration;

use serde::Deserialize;
use wayfare_core::ValidationMode;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default = "default_seed_demo_trips")]
    pub seed_demo_trips: bool,
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
}

fn default_seed_demo_trips() -> bool {
    true
}

fn default_thinking_delay_ms() -> u64 {
    1500
}

impl EngineConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file that isn't checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `WAYFARE_ENGINE__THINKING_DELAY_MS=0`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
