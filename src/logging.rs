//! log4rs setup.

use crate::config::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

const FALLBACK_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Console-only config used when no log4rs file is present.
pub fn fallback_config(level: log::LevelFilter) -> Result<LogConfig, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Initialize logging from `config.log_config`, or a stderr logger if the file is missing.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if config.log_config.exists() {
        log4rs::init_file(&config.log_config, Default::default()).map_err(|e| {
            format!(
                "Error initializing log4rs from {}: {e}",
                config.log_config.display()
            )
        })?;
        log::debug!("Logging configured from {}", config.log_config.display());
    } else {
        log4rs::init_config(fallback_config(config.log_level)?)?;
        log::debug!(
            "{} not found, logging to stderr at {}",
            config.log_config.display(),
            config.log_level
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_config_builds() {
        let config = fallback_config(log::LevelFilter::Warn).expect("valid fallback config");
        assert_eq!(config.root().level(), log::LevelFilter::Warn);
        assert_eq!(config.appenders().len(), 1);
    }
}
