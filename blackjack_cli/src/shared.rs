use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// Cards drawn by a deal. A non-zero reshuffle threshold below this can't
/// keep a deal from running out of cards.
const CARDS_PER_DEAL: usize = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rule: ConfigRule,
    pub session: ConfigSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub reshuffle_threshold: usize,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack::Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            reshuffle_threshold: rule.reshuffle_threshold,
        }
    }
}

impl TryFrom<ConfigRule> for blackjack::Rule {
    type Error = ConfigError;

    fn try_from(config_rule: ConfigRule) -> Result<blackjack::Rule, Self::Error> {
        if config_rule.number_of_decks == 0 {
            return Err(ConfigError::Invalid(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if config_rule.reshuffle_threshold != 0
            && config_rule.reshuffle_threshold < CARDS_PER_DEAL
        {
            return Err(ConfigError::Invalid(format!(
                "reshuffle_threshold must be 0 or at least {}",
                CARDS_PER_DEAL
            )));
        }
        let shoe_size = config_rule.number_of_decks as usize * 52;
        if config_rule.reshuffle_threshold > shoe_size {
            return Err(ConfigError::Invalid(format!(
                "reshuffle_threshold cannot exceed the {} cards in the shoe",
                shoe_size
            )));
        }

        Ok(blackjack::Rule {
            number_of_decks: config_rule.number_of_decks,
            reshuffle_threshold: config_rule.reshuffle_threshold,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSession {
    pub rounds: u32,
    /// Fixed seed for the shuffle. A random one is used when absent.
    pub seed: Option<u64>,
}

impl Default for ConfigSession {
    fn default() -> Self {
        ConfigSession {
            rounds: 10,
            seed: None,
        }
    }
}

/// Parses a config from YAML. Missing fields take their default values.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}
