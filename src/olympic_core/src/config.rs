use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    BASE_SCORE_MAX, BASE_SCORE_MIN, FORFEIT_RATE, FORFEIT_WIN_SCORE, FORM_GAP_FACTOR, SCORE_CEILING,
    SCORE_FLOOR,
};
use crate::error::{Result, TournamentError};
use crate::seeding::Qualification;

/// Tunable numbers of the match model. Defaults are the tournament rules.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    pub form_gap_factor: f64,
    pub forfeit_rate: f64,
    /// Inclusive
    pub base_score_min: i32,
    /// Exclusive
    pub base_score_max: i32,
    pub score_floor: i32,
    pub score_ceiling: i32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            form_gap_factor: FORM_GAP_FACTOR,
            forfeit_rate: FORFEIT_RATE,
            base_score_min: BASE_SCORE_MIN,
            base_score_max: BASE_SCORE_MAX,
            score_floor: SCORE_FLOOR,
            score_ceiling: SCORE_CEILING,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_score_min >= self.base_score_max {
            return Err(TournamentError::InvalidConfig(format!(
                "base score range {}..{} is empty",
                self.base_score_min, self.base_score_max
            )));
        }
        if self.base_score_min < 0 {
            return Err(TournamentError::InvalidConfig(format!(
                "base score minimum {} is negative",
                self.base_score_min
            )));
        }
        // Played scores must stay clear of the forfeit markers
        if self.score_floor <= FORFEIT_WIN_SCORE {
            return Err(TournamentError::InvalidConfig(format!(
                "score floor {} must be above {FORFEIT_WIN_SCORE}",
                self.score_floor
            )));
        }
        if self.score_floor > self.score_ceiling {
            return Err(TournamentError::InvalidConfig(format!(
                "score floor {} is above ceiling {}",
                self.score_floor, self.score_ceiling
            )));
        }
        if !(0.0..=1.0).contains(&self.forfeit_rate) {
            return Err(TournamentError::InvalidConfig(format!(
                "forfeit rate {} is outside [0, 1]",
                self.forfeit_rate
            )));
        }
        if self.form_gap_factor.is_nan() || self.form_gap_factor < 0.0 {
            return Err(TournamentError::InvalidConfig(format!(
                "form gap factor {} must be non-negative",
                self.form_gap_factor
            )));
        }
        Ok(())
    }
}

/// Settings for a full run, usually read from a TOML file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    pub groups_path: PathBuf,
    pub exhibitions_path: PathBuf,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub qualification: Qualification,
    /// Monte Carlo runs for medal odds; 0 runs a single reported tournament
    pub simulations: usize,
    pub simulator: SimulatorConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            groups_path: PathBuf::from("resources/groups.json"),
            exhibitions_path: PathBuf::from("resources/exibitions.json"),
            seed: None,
            qualification: Qualification::default(),
            simulations: 0,
            simulator: SimulatorConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TournamentConfig = toml::from_str(content)?;
        config.simulator.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rules() {
        let config = SimulatorConfig::default();
        assert_eq!(config.form_gap_factor, 0.1);
        assert_eq!(config.forfeit_rate, 0.005);
        assert_eq!((config.base_score_min, config.base_score_max), (70, 100));
        assert_eq!((config.score_floor, config.score_ceiling), (70, 120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = SimulatorConfig {
            base_score_min: 100,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulatorConfig {
            score_floor: 130,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulatorConfig {
            forfeit_rate: 1.5,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulatorConfig {
            forfeit_rate: 0.0,
            base_score_min: -1,
            base_score_max: 0,
            score_floor: -1,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulatorConfig {
            score_floor: 0,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = TournamentConfig::from_toml(
            r#"
            seed = 42
            qualification = "cross-group"

            [simulator]
            forfeit_rate = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.qualification, Qualification::CrossGroup);
        assert_eq!(config.simulator.forfeit_rate, 0.0);
        assert_eq!(config.simulator.score_ceiling, 120);
        assert_eq!(config.groups_path, PathBuf::from("resources/groups.json"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            TournamentConfig::from_toml("sead = 1"),
            Err(TournamentError::Toml(_))
        ));
    }
}
