/// Tunable game parameters, loadable from RON.
///
/// Every field has a default matching the classic feel, and `#[serde(default)]`
/// lets a config file override only the values it names.
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PLATFORMER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "platformer.ron";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub jump_power: f64,
    pub gravity: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 48.0,
            speed: 5.0,
            jump_power: -15.0,
            gravity: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            speed: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub starting_lives: u32,
    pub coin_points: u32,
    pub stomp_points: u32,
    /// Frame cadence used by the terminal frontend.
    pub tick_rate_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            starting_lives: 3,
            coin_points: 10,
            stomp_points: 100,
            tick_rate_hz: 60,
        }
    }
}

impl GameConfig {
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    /// Load the config named by `PLATFORMER_CONFIG` (or `platformer.ron`).
    /// A missing file means defaults; an unparseable one is logged and
    /// also falls back to defaults.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_ron(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {path}");
                    cfg
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    GameConfig::default()
                }
            },
            Err(_) => GameConfig::default(),
        }
    }
}
