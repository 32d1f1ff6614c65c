//! Rules configuration.
//!
//! Every tunable constant of the rules lives in `RulesConfig`. Defaults match
//! the classic game; a JSON file can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How many dice the attacker rolls for a given troop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceTier {
    /// Two dice with 3+ troops, otherwise one.
    Basic,
    /// `min(3, troops - 1)` dice, at least one.
    #[default]
    Extended,
}

impl DiceTier {
    /// Number of dice the attacker rolls with `troops` troops.
    pub fn attacker_dice(self, troops: u32) -> usize {
        match self {
            DiceTier::Basic => {
                if troops >= 3 {
                    2
                } else {
                    1
                }
            }
            DiceTier::Extended => troops.saturating_sub(1).clamp(1, 3) as usize,
        }
    }

    /// Parses a tier name as used on the command line.
    pub fn from_name(name: &str) -> Option<DiceTier> {
        match name {
            "basic" => Some(DiceTier::Basic),
            "extended" => Some(DiceTier::Extended),
            _ => None,
        }
    }
}

/// Number of dice the defender rolls with `troops` troops.
pub fn defender_dice(troops: u32) -> usize {
    if troops >= 2 {
        2
    } else {
        1
    }
}

/// Errors raised while loading or validating a rules file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("survive range is inverted: {min} > {max}")]
    InvertedSurviveRange { min: u32, max: u32 },

    #[error("{0} must be between 1 and 100")]
    BadPercent(&'static str),

    #[error("conquer_attempts must be at least 1")]
    NoAttempts,
}

/// Tunable rules for combat, reinforcement, missions, and game length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Attacker dice tiering.
    pub dice_tier: DiceTier,
    /// Floor on each faction's per-round reinforcement.
    pub min_reinforcement: u32,
    /// First turn on which reinforcements are handed out.
    pub reinforce_from_turn: u32,
    /// Random draws before a conquer mission falls back to control.
    pub conquer_attempts: u32,
    /// Territories a faction needs to be a conquer target.
    pub conquer_min_territories: usize,
    /// Percent of the map used by the conquer fallback.
    pub conquer_fallback_percent: u32,
    /// Percent of the map a control mission asks for.
    pub control_percent: u32,
    /// Minimum territory count for a control mission.
    pub control_floor: u32,
    /// Inclusive bounds for survive missions.
    pub survive_min: u32,
    pub survive_max: u32,
    /// Last turn that is played.
    pub max_turns: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            dice_tier: DiceTier::Extended,
            min_reinforcement: 2,
            reinforce_from_turn: 2,
            conquer_attempts: 10,
            conquer_min_territories: 2,
            conquer_fallback_percent: 60,
            control_percent: 70,
            control_floor: 3,
            survive_min: 8,
            survive_max: 12,
            max_turns: 15,
        }
    }
}

impl RulesConfig {
    /// Parses and validates a rules config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a rules config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Checks the config for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.survive_min > self.survive_max {
            return Err(ConfigError::InvertedSurviveRange {
                min: self.survive_min,
                max: self.survive_max,
            });
        }
        if !(1..=100).contains(&self.conquer_fallback_percent) {
            return Err(ConfigError::BadPercent("conquer_fallback_percent"));
        }
        if !(1..=100).contains(&self.control_percent) {
            return Err(ConfigError::BadPercent("control_percent"));
        }
        if self.conquer_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}
