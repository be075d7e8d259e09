use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::ConfigError;

const DEFAULT_RATS_FILE: &str = "rats.txt";
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// KEY=VALUE config file. Absent or blank keys fall back to the process environment.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    /// File value for `key`, or the environment's when the file leaves it absent or blank.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .or_else(|| env::var(key).ok().filter(|value| !value.is_empty()))
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}

/// Settings the bot runtime needs, resolved from an [`AppConfig`].
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub discord_token: String,
    pub guild_id: Option<u64>,
    pub rat_report_channel_id: Option<u64>,
    pub rats_file: PathBuf,
    pub timezone: Tz,
}

impl BotSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let discord_token = config
            .get("DISCORD_TOKEN")
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        Ok(Self {
            discord_token,
            guild_id: parse_id(config, "GUILD_ID")?,
            rat_report_channel_id: parse_id(config, "RAT_REPORT_CHANNEL_ID")?,
            rats_file: config
                .get("RATS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RATS_FILE)),
            timezone: timezone(config)?,
        })
    }
}

/// Zone used to decide what "today" is. Defaults to New York.
pub fn timezone(config: &AppConfig) -> Result<Tz, ConfigError> {
    match config.get("BOT_TIMEZONE") {
        Some(value) => value.parse::<Tz>().map_err(|_| ConfigError::InvalidValue {
            key: "BOT_TIMEZONE",
            value,
        }),
        None => Ok(DEFAULT_TIMEZONE),
    }
}

fn parse_id(config: &AppConfig, key: &'static str) -> Result<Option<u64>, ConfigError> {
    config
        .get(key)
        .map(|value| {
            value
                .parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .ok_or(ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
