use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blinds::{
    validate_levels, BlindLevel, BlindManager, DEFAULT_BLIND_LEVELS, DEFAULT_HANDS_PER_LEVEL,
};
use crate::errors::ConfigError;
use crate::player::PlayerState;

pub const ENV_CONFIG: &str = "HOLDEM_CONFIG";
pub const ENV_SEED: &str = "HOLDEM_SEED";
pub const ENV_HANDS_PER_LEVEL: &str = "HOLDEM_HANDS_PER_LEVEL";
pub const ENV_STARTING_STACK: &str = "HOLDEM_STARTING_STACK";

/// Tournament settings. Resolved as defaults, then a TOML file, then the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub starting_stack: u32,
    pub hands_per_level: u32,
    pub seed: Option<u64>,
    pub blind_levels: Vec<BlindLevel>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1000,
            hands_per_level: DEFAULT_HANDS_PER_LEVEL,
            seed: None,
            blind_levels: DEFAULT_BLIND_LEVELS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

/// Where each setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub hands_per_level: ValueSource,
    pub blind_levels: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            hands_per_level: ValueSource::Default,
            blind_levels: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: TournamentConfig,
    pub sources: ConfigSources,
}

/// Every key optional so a file can override a subset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    hands_per_level: Option<u32>,
    #[serde(default)]
    blind_levels: Option<Vec<BlindLevel>>,
    #[serde(default)]
    seed: Option<u64>,
}

impl TournamentConfig {
    /// Parses a TOML document over the defaults and validates the result.
    ///
    /// ```
    /// use holdem_engine::config::TournamentConfig;
    ///
    /// let cfg = TournamentConfig::from_toml_str("starting_stack = 1500\nseed = 42").unwrap();
    /// assert_eq!(cfg.starting_stack, 1500);
    /// assert_eq!(cfg.seed, Some(42));
    /// assert_eq!(cfg.hands_per_level, 10);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let mut sources = ConfigSources::default();
        cfg.merge_file(toml::from_str(s)?, &mut sources);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Reads the file named by `HOLDEM_CONFIG` (if set), then applies the
    /// `HOLDEM_SEED`, `HOLDEM_HANDS_PER_LEVEL` and `HOLDEM_STARTING_STACK`
    /// overrides.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_with_sources(|key| std::env::var(key).ok()).map(|r| r.config)
    }

    /// Same resolution as [`load_from_env`](Self::load_from_env) against an
    /// arbitrary variable lookup, reporting the source of every value.
    pub fn load_with_sources<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut sources = ConfigSources::default();
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(path) = var(ENV_CONFIG) {
            let s = fs::read_to_string(&path)?;
            cfg.merge_file(toml::from_str(&s)?, &mut sources);
            tracing::debug!(path = %path, "configuration file loaded");
        }

        if let Some(seed) = var(ENV_SEED) {
            cfg.seed = Some(parse_env(ENV_SEED, &seed)?);
            sources.seed = ValueSource::Env;
        }
        if let Some(hands) = var(ENV_HANDS_PER_LEVEL) {
            cfg.hands_per_level = parse_env(ENV_HANDS_PER_LEVEL, &hands)?;
            sources.hands_per_level = ValueSource::Env;
        }
        if let Some(stack) = var(ENV_STARTING_STACK) {
            cfg.starting_stack = parse_env(ENV_STARTING_STACK, &stack)?;
            sources.starting_stack = ValueSource::Env;
        }

        cfg.validate()?;
        Ok(ConfigResolved {
            config: cfg,
            sources,
        })
    }

    fn merge_file(&mut self, f: FileConfig, sources: &mut ConfigSources) {
        if let Some(v) = f.starting_stack {
            self.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.hands_per_level {
            self.hands_per_level = v;
            sources.hands_per_level = ValueSource::File;
        }
        if let Some(v) = f.blind_levels {
            self.blind_levels = v;
            sources.blind_levels = ValueSource::File;
        }
        if let Some(v) = f.seed {
            self.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be > 0".into()));
        }
        if self.hands_per_level == 0 {
            return Err(ConfigError::Invalid("hands_per_level must be >= 1".into()));
        }
        validate_levels(&self.blind_levels)
    }

    pub fn blind_manager(&self) -> Result<BlindManager, ConfigError> {
        BlindManager::new(self.blind_levels.clone(), self.hands_per_level)
    }

    /// One seat per name, in order, each with the starting stack.
    pub fn seat_players<S: AsRef<str>>(&self, names: &[S]) -> Vec<PlayerState> {
        names
            .iter()
            .enumerate()
            .map(|(seat, name)| PlayerState::new(seat, name.as_ref(), self.starting_stack))
            .collect()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key}: cannot parse {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_trims_whitespace() {
        let v: u64 = parse_env(ENV_SEED, " 42 ").unwrap();
        assert_eq!(v, 42);
        assert!(parse_env::<u32>(ENV_STARTING_STACK, "lots").is_err());
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let err = TournamentConfig::from_toml_str("level = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
