//! Runtime configuration read from the environment (and `.env` via dotenv).

use chrono_tz::Tz;
use std::error::Error;
use std::path::PathBuf;

pub const DEFAULT_NETWORK: &str = "101.0.0.0/8";
pub const DEFAULT_COUNT: u64 = 8;
/// Rows listed by default in prefix mode.
pub const DEFAULT_LIST: u64 = 8;
pub const DEFAULT_MAX_LIST: u64 = 2048;
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Settings for the command line tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Network used when none is given on the command line.
    pub network: String,
    /// Subnet count used when neither count nor prefix is given.
    pub count: u64,
    /// Upper bound on listed rows.
    pub max_list: u64,
    pub log_config: PathBuf,
    /// Level for the fallback console logger.
    pub log_level: log::LevelFilter,
    /// Timezone used to date export file names.
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            network: DEFAULT_NETWORK.to_string(),
            count: DEFAULT_COUNT,
            max_list: DEFAULT_MAX_LIST,
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
            log_level: log::LevelFilter::Info,
            timezone: Tz::UTC,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read `SUBNET_PLANNER_*` variables.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(network) = lookup("SUBNET_PLANNER_NETWORK") {
            config.network = network;
        }
        if let Some(count) = lookup("SUBNET_PLANNER_COUNT") {
            config.count = count
                .trim()
                .parse()
                .map_err(|e| format!("SUBNET_PLANNER_COUNT={count}: {e}"))?;
        }
        if let Some(max_list) = lookup("SUBNET_PLANNER_MAX_LIST") {
            config.max_list = max_list
                .trim()
                .parse()
                .map_err(|e| format!("SUBNET_PLANNER_MAX_LIST={max_list}: {e}"))?;
            if config.max_list == 0 {
                let msg = format!("SUBNET_PLANNER_MAX_LIST={max_list}: must be at least 1");
                return Err(msg.into());
            }
        }
        if let Some(path) = lookup("SUBNET_PLANNER_LOG_CONFIG") {
            config.log_config = PathBuf::from(path);
        }
        if let Some(level) = lookup("SUBNET_PLANNER_LOG_LEVEL") {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|e| format!("SUBNET_PLANNER_LOG_LEVEL={level}: {e}"))?;
        }
        if let Some(tz) = lookup("SUBNET_PLANNER_TZ") {
            config.timezone = tz
                .trim()
                .parse()
                .map_err(|e| format!("SUBNET_PLANNER_TZ={tz}: {e}"))?;
        }

        log::debug!("config={config:?}");
        Ok(config)
    }
}
