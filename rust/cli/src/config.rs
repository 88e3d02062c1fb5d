use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;

use holdem_ai::AGENT_KINDS;
use holdem_engine::game::GameConfig;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const PLAYERS_ENV: &str = "HOLDEM_PLAYERS";
pub const BUY_IN_ENV: &str = "HOLDEM_BUY_IN";
pub const BUYIN_LIMIT_ENV: &str = "HOLDEM_BUYIN_LIMIT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub buy_in: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub players: usize,
    pub buyin_limit: u32,
    pub seed: Option<u64>,
    /// Agent kind per seat, see [`holdem_ai::AGENT_KINDS`]
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub buy_in: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub players: ValueSource,
    pub buyin_limit: ValueSource,
    pub seed: ValueSource,
    pub agents: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            buy_in: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            players: ValueSource::Default,
            buyin_limit: ValueSource::Default,
            seed: ValueSource::Default,
            agents: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = GameConfig::default();
        Self {
            buy_in: table.buy_in,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            players: table.max_players,
            buyin_limit: table.buyin_limit,
            seed: None,
            agents: default_agents(table.max_players),
        }
    }
}

impl Config {
    /// Table settings for the engine, with the seed already chosen.
    pub fn game_config(&self, seed: u64) -> GameConfig {
        GameConfig {
            buy_in: self.buy_in,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            max_players: self.players,
            buyin_limit: self.buyin_limit,
            seed,
        }
    }
}

/// Alternates score and random agents, starting with score.
pub fn default_agents(players: usize) -> Vec<String> {
    (0..players)
        .map(|seat| if seat % 2 == 0 { "score" } else { "random" }.to_string())
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_sources_from(|key| std::env::var(key).ok())
}

/// Resolves the configuration with `env` standing in for the process
/// environment.
///
/// Precedence, lowest first: built-in defaults, the TOML file named by
/// `HOLDEM_CONFIG`, then the `HOLDEM_*` variables. Empty variables are
/// ignored. When no layer names the agents, the default line-up is sized to
/// the final player count.
pub fn load_with_sources_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let lookup = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = lookup(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.buyin_limit {
            cfg.buyin_limit = v;
            sources.buyin_limit = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.agents {
            cfg.agents = v;
            sources.agents = ValueSource::File;
        }
    }

    if let Some(seed) = lookup(SEED_ENV) {
        cfg.seed = Some(parse_env(SEED_ENV, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(players) = lookup(PLAYERS_ENV) {
        cfg.players = parse_env(PLAYERS_ENV, &players)?;
        sources.players = ValueSource::Env;
    }
    if let Some(buy_in) = lookup(BUY_IN_ENV) {
        cfg.buy_in = parse_env(BUY_IN_ENV, &buy_in)?;
        sources.buy_in = ValueSource::Env;
    }
    if let Some(limit) = lookup(BUYIN_LIMIT_ENV) {
        cfg.buyin_limit = parse_env(BUYIN_LIMIT_ENV, &limit)?;
        sources.buyin_limit = ValueSource::Env;
    }

    if sources.agents == ValueSource::Default {
        cfg.agents = default_agents(cfg.players);
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    buyin_limit: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    agents: Option<Vec<String>>,
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.players < 2 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: players must be >= 2".into(),
        ));
    }
    if cfg.buy_in == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: buy_in must be > 0".into(),
        ));
    }
    if cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must not exceed big_blind".into(),
        ));
    }
    if cfg.agents.len() != cfg.players {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {} agents for {} players",
            cfg.agents.len(),
            cfg.players
        )));
    }
    if let Some(unknown) = cfg.agents.iter().find(|a| !AGENT_KINDS.contains(&a.as_str())) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown agent {:?} (expected one of {})",
            unknown,
            AGENT_KINDS.join(", ")
        )));
    }
    cfg.game_config(0)
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
