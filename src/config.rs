use anyhow::{anyhow, Result};
use std::{env, fmt, str::FromStr};

use crate::session::DEFAULT_ANALYZE_PROGRESS_INTERVAL;

pub fn get_env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

pub fn get_env_cast_or<T: FromStr + fmt::Display>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(value_raw) => T::from_str(&value_raw)
            .map_err(|_| anyhow!("{} is not a valid {} value!", value_raw, key)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tcp_listen_host: String,
    pub tcp_listen_port: u16,
    /// Created empty at startup if missing, and used when a query names no database.
    pub default_database: String,
    pub analyze_progress_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tcp_listen_host: "127.0.0.1".to_string(),
            tcp_listen_port: 3307,
            default_database: "mydb".to_string(),
            analyze_progress_interval: DEFAULT_ANALYZE_PROGRESS_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default = Config::default();
        Ok(Config {
            tcp_listen_host: get_env_or("INFOSCHEMA_TCP_LISTEN_HOST", default.tcp_listen_host),
            tcp_listen_port: get_env_cast_or(
                "INFOSCHEMA_TCP_LISTEN_PORT",
                default.tcp_listen_port,
            )?,
            default_database: get_env_or("INFOSCHEMA_DEFAULT_DATABASE", default.default_database),
            analyze_progress_interval: get_env_cast_or(
                "INFOSCHEMA_ANALYZE_PROGRESS_INTERVAL",
                default.analyze_progress_interval,
            )?,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔌 TCP listen host: {}", self.tcp_listen_host)?;
        writeln!(f, "🔌 TCP listen port: {}", self.tcp_listen_port)?;
        writeln!(f, "🗄 Default database: {}", self.default_database)?;
        write!(
            f,
            "📊 Analyze progress interval: {} rows",
            self.analyze_progress_interval
        )
    }
}
