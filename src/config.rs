//! Runtime settings read from the environment (after `.env` is loaded).

use std::time::Duration;

use serenity::model::id::GuildId;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "!z";
pub const DEFAULT_SEARCH_RESULTS: usize = 5;
pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing DISCORD_TOKEN")]
    MissingToken,

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    /// When set, messages from other guilds are ignored
    pub guild: Option<GuildId>,
    pub search_results: usize,
    pub advance_interval: Duration,
    pub ytdlp_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = get("DISCORD_TOKEN")
            .or_else(|| get("ZEDIA_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let prefix = get("ZEDIA_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                key: "ZEDIA_PREFIX",
                reason: "must not contain whitespace".to_string(),
            });
        }

        let guild = get("ZEDIA_GUILD_ID")
            .map(|raw| parse_positive::<u64>("ZEDIA_GUILD_ID", &raw).map(GuildId::new))
            .transpose()?;

        let search_results = get("ZEDIA_SEARCH_RESULTS")
            .map(|raw| parse_positive::<usize>("ZEDIA_SEARCH_RESULTS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_SEARCH_RESULTS);

        let advance_interval = get("ZEDIA_ADVANCE_INTERVAL_MS")
            .map(|raw| parse_positive::<u64>("ZEDIA_ADVANCE_INTERVAL_MS", &raw))
            .transpose()?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ADVANCE_INTERVAL);

        let ytdlp_path = get("YTDLP_PATH").unwrap_or_else(|| DEFAULT_YTDLP_PATH.to_string());

        Ok(Config {
            token,
            prefix,
            guild,
            search_results,
            advance_interval,
            ytdlp_path,
        })
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;

    if value < T::from(1) {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use test_case::test_case;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(
            config,
            Config {
                token: "abc".into(),
                prefix: "!z".into(),
                guild: None,
                search_results: 5,
                advance_interval: Duration::from_secs(1),
                ytdlp_path: "yt-dlp".into(),
            }
        );
    }

    #[test]
    fn test_token_fallback() {
        let config = config_from(&[("ZEDIA_TOKEN", "fallback")]).unwrap();
        assert_eq!(config.token, "fallback");
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(config_from(&[("DISCORD_TOKEN", "  ")]), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("ZEDIA_PREFIX", "%"),
            ("ZEDIA_GUILD_ID", "1234"),
            ("ZEDIA_SEARCH_RESULTS", "3"),
            ("ZEDIA_ADVANCE_INTERVAL_MS", "250"),
            ("YTDLP_PATH", "/usr/local/bin/yt-dlp"),
        ])
        .unwrap();

        assert_eq!(config.prefix, "%");
        assert_eq!(config.guild, Some(GuildId::new(1234)));
        assert_eq!(config.search_results, 3);
        assert_eq!(config.advance_interval, Duration::from_millis(250));
        assert_eq!(config.ytdlp_path, "/usr/local/bin/yt-dlp");
    }

    #[test_case("ZEDIA_SEARCH_RESULTS", "0" ; "zero results")]
    #[test_case("ZEDIA_SEARCH_RESULTS", "many" ; "non numeric results")]
    #[test_case("ZEDIA_ADVANCE_INTERVAL_MS", "0" ; "zero interval")]
    #[test_case("ZEDIA_GUILD_ID", "0" ; "zero guild")]
    #[test_case("ZEDIA_PREFIX", "! z" ; "prefix with space")]
    fn test_invalid_values(key: &str, value: &str) {
        assert_matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), (key, value)]),
            Err(ConfigError::Invalid { .. })
        );
    }
}
