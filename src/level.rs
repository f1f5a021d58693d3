/// Static level geometry and its RON loader.
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Rect;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Where an enemy starts and the interval it patrols.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f64,
    pub y: f64,
    pub min_x: f64,
    pub max_x: f64,
}

/// Read-only level description.  Coins listed here are the *initial* set;
/// the live collection is `GameState::coins`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: f64,
    pub height: f64,
    /// Player start and respawn point.
    pub spawn: (f64, f64),
    pub platforms: Vec<Rect>,
    pub coins: Vec<Rect>,
    pub goal: Rect,
    pub enemies: Vec<EnemySpawn>,
}

impl Level {
    pub fn from_ron(source: &str) -> Result<Self, LoadError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path)?;
        let level = Self::from_ron(&source)?;
        tracing::info!(
            "Loaded level {}: {} platforms, {} coins, {} enemies",
            path.display(),
            level.platforms.len(),
            level.coins.len(),
            level.enemies.len()
        );
        Ok(level)
    }
}

impl Default for Level {
    /// The built-in 800×600 level: ground, four floating platforms, twelve
    /// coins, two patrolling enemies and a flag at the far right.
    fn default() -> Self {
        let platforms = vec![
            Rect::new(0.0, 400.0, 800.0, 80.0), // ground
            Rect::new(200.0, 300.0, 100.0, 20.0),
            Rect::new(400.0, 250.0, 100.0, 20.0),
            Rect::new(600.0, 300.0, 100.0, 20.0),
            Rect::new(300.0, 180.0, 80.0, 20.0),
        ];

        let mut coins = vec![
            Rect::new(230.0, 270.0, 20.0, 20.0),
            Rect::new(260.0, 270.0, 20.0, 20.0),
            Rect::new(430.0, 220.0, 20.0, 20.0),
            Rect::new(460.0, 220.0, 20.0, 20.0),
            Rect::new(630.0, 270.0, 20.0, 20.0),
            Rect::new(660.0, 270.0, 20.0, 20.0),
            Rect::new(330.0, 150.0, 20.0, 20.0),
        ];
        coins.extend((0..5u32).map(|i| Rect::new(100.0 + f64::from(i) * 40.0, 360.0, 20.0, 20.0)));

        Self {
            width: 800.0,
            height: 600.0,
            spawn: (50.0, 200.0),
            platforms,
            coins,
            goal: Rect::new(750.0, 300.0, 30.0, 100.0),
            enemies: vec![
                EnemySpawn { x: 300.0, y: 340.0, min_x: 200.0, max_x: 400.0 },
                EnemySpawn { x: 600.0, y: 340.0, min_x: 500.0, max_x: 700.0 },
            ],
        }
    }
}
