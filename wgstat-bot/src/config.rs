//! Bot configuration: Telegram connection, admin id, stats command, logging.
//! Loaded once from env at startup; never mutated afterward.

use anyhow::Result;
use std::env;
use tracing::error;
use wgstat_core::WgstatError;

/// Default path of the stats script when WGSTAT_CMD is not set.
pub const DEFAULT_WGSTAT_CMD: &str = "/usr/local/sbin/wgstat.sh";

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// BOT_ADMIN_ID: the single identity allowed to run /stats
    pub admin_id: i64,
    /// WGSTAT_CMD: shell-tokenizable command line of the stats script
    pub wgstat_cmd: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    ///
    /// The error messages for missing BOT_TOKEN / BOT_ADMIN_ID are the
    /// operator-facing startup diagnostics and surface verbatim from main.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    error!("BOT_TOKEN is not set");
                    WgstatError::Config("Установите BOT_TOKEN с токеном бота".to_string())
                })?,
        };

        let admin_id_raw = env::var("BOT_ADMIN_ID").ok().filter(|v| !v.trim().is_empty());
        let admin_id = match admin_id_raw {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                error!(value = %raw, "BOT_ADMIN_ID must be an integer");
                WgstatError::Config("BOT_ADMIN_ID должен быть числом".to_string())
            })?,
            None => {
                error!("BOT_ADMIN_ID is not set");
                return Err(WgstatError::Config(
                    "Установите BOT_ADMIN_ID с ID администратора бота".to_string(),
                )
                .into());
            }
        };

        let wgstat_cmd =
            env::var("WGSTAT_CMD").unwrap_or_else(|_| DEFAULT_WGSTAT_CMD.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/wgstat-bot.log".to_string());

        Ok(Self {
            bot_token,
            admin_id,
            wgstat_cmd,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config. Call after load() to fail fast before connecting.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("BOT_TOKEN");
        env::remove_var("BOT_ADMIN_ID");
        env::remove_var("WGSTAT_CMD");
        env::remove_var("TELEGRAM_API_URL");
        env::remove_var("TELOXIDE_API_URL");
        env::remove_var("LOG_FILE");
    }

    #[test]
    #[serial]
    fn test_load_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("BOT_ADMIN_ID", "123456");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.admin_id, 123456);
        assert_eq!(config.wgstat_cmd, DEFAULT_WGSTAT_CMD);
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.log_file, "logs/wgstat-bot.log");
    }

    #[test]
    #[serial]
    fn test_load_with_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "custom_token");
        env::set_var("BOT_ADMIN_ID", "-42");
        env::set_var("WGSTAT_CMD", "docker exec wg wgstat.sh");
        env::set_var("LOG_FILE", "/tmp/wgstat.log");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.admin_id, -42);
        assert_eq!(config.wgstat_cmd, "docker exec wg wgstat.sh");
        assert_eq!(config.log_file, "/tmp/wgstat.log");
    }

    #[test]
    #[serial]
    fn test_token_argument_overrides_env() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("BOT_ADMIN_ID", "1");

        let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "cli_token");
    }

    #[test]
    #[serial]
    fn test_missing_token_fails() {
        clear_env();
        env::set_var("BOT_ADMIN_ID", "1");

        let err = BotConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_missing_admin_id_fails() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");

        let err = BotConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("BOT_ADMIN_ID"));
    }

    #[test]
    #[serial]
    fn test_non_integer_admin_id_fails() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("BOT_ADMIN_ID", "not-a-number");

        let err = BotConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("числом"));
    }

    #[test]
    #[serial]
    fn test_invalid_api_url_fails_validation() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("BOT_ADMIN_ID", "1");
        env::set_var("TELEGRAM_API_URL", "not a url");

        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_err());
    }
}
