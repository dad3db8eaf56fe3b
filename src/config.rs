// Runtime configuration, read from the environment (and `.env` via dotenv).

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_EXPORT_FILE: &str = "data/moderation_export.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub discord_token: String,
    /// Register commands in this guild only, for fast iteration.
    pub guild_id: Option<u64>,
    /// Snapshot to load at startup instead of the demo records.
    pub seed_file: Option<PathBuf>,
    pub export_file: PathBuf,
    pub require_actor: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .context("DISCORD_TOKEN is required. Create a .env file with your bot token.")?;

        let guild_id = lookup("MODERATION_GUILD_ID").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                // Discord ids are never zero.
                Ok(id) if id != 0 => Some(id),
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid MODERATION_GUILD_ID");
                    None
                }
            }
        });

        let seed_file = lookup("MODERATION_SEED_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let export_file = lookup("MODERATION_EXPORT_FILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string())
            .into();

        let require_actor = match lookup("MODERATION_REQUIRE_ACTOR") {
            None => true,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid MODERATION_REQUIRE_ACTOR, using true");
                true
            }),
        };

        Ok(Self {
            discord_token,
            guild_id,
            seed_file,
            export_file,
            require_actor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_token_is_required() {
        assert!(load(&[]).is_err());
        assert!(load(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DISCORD_TOKEN", "token")]).unwrap();

        assert_eq!(config.guild_id, None);
        assert_eq!(config.seed_file, None);
        assert_eq!(config.export_file, PathBuf::from(DEFAULT_EXPORT_FILE));
        assert!(config.require_actor);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = load(&[
            ("DISCORD_TOKEN", "token"),
            ("MODERATION_GUILD_ID", "not-a-number"),
            ("MODERATION_SEED_FILE", "seed.json"),
            ("MODERATION_REQUIRE_ACTOR", "false"),
        ])
        .unwrap();
        assert_eq!(config.guild_id, None);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
        assert!(!config.require_actor);

        let config = load(&[
            ("DISCORD_TOKEN", "token"),
            ("MODERATION_GUILD_ID", "1432001978447167611"),
            ("MODERATION_REQUIRE_ACTOR", "maybe"),
        ])
        .unwrap();
        assert_eq!(config.guild_id, Some(1432001978447167611));
        assert!(config.require_actor);
    }
}
