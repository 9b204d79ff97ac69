use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_FORM;
use crate::match_result::MatchResult;

/// Index of a team inside its [`TeamRegistry`](crate::registry::TeamRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub usize);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team record as it appears in the groups data file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    #[serde(rename = "Team")]
    pub name: String,

    #[serde(rename = "ISOCode")]
    pub code: String,

    #[serde(rename = "FIBARanking", alias = "Ranking", default)]
    pub ranking: u32,
}

impl TeamSeed {
    pub fn new(name: impl Into<String>, code: impl Into<String>, ranking: u32) -> Self {
        TeamSeed {
            name: name.into(),
            code: code.into(),
            ranking,
        }
    }
}

/// A national team with its form rating and running tournament statistics.
#[derive(Clone, Debug)]
pub struct Team {
    pub id: TeamId,

    pub name: String,

    /// Stable country code (e.g. "USA")
    pub code: String,

    /// FIBA world ranking
    pub ranking: u32,

    /// Strength in [0, 1] derived from exhibition results
    pub form: f64,

    pub wins: u32,
    pub losses: u32,

    /// Group-stage standings points, not basketball points
    pub points: u32,

    pub points_scored: i64,
    pub points_conceded: i64,

    /// Every result applied to this team, in order
    pub history: Vec<MatchResult>,
}

impl Team {
    pub fn new(id: TeamId, seed: TeamSeed) -> Self {
        Team {
            id,
            name: seed.name,
            code: seed.code,
            ranking: seed.ranking,
            form: DEFAULT_FORM,
            wins: 0,
            losses: 0,
            points: 0,
            points_scored: 0,
            points_conceded: 0,
            history: Vec::new(),
        }
    }

    pub fn point_difference(&self) -> i64 {
        self.points_scored - self.points_conceded
    }

    /// Zero the tournament statistics, keeping identity and form.
    pub fn reset_statistics(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.points = 0;
        self.points_scored = 0;
        self.points_conceded = 0;
        self.history.clear();
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_has_default_form() {
        let team = Team::new(TeamId(0), TeamSeed::new("Kanada", "CAN", 7));
        assert_eq!(team.form, DEFAULT_FORM);
        assert_eq!(team.points, 0);
        assert!(team.history.is_empty());
    }

    #[test]
    fn test_point_difference_can_be_negative() {
        let mut team = Team::new(TeamId(0), TeamSeed::new("Grčka", "GRE", 14));
        team.points_scored = 150;
        team.points_conceded = 170;
        assert_eq!(team.point_difference(), -20);
    }

    #[test]
    fn test_seed_deserializes_data_file_shape() {
        let json = r#"{"Team": "Sjedinjene Države", "ISOCode": "USA", "FIBARanking": 1}"#;
        let seed: TeamSeed = serde_json::from_str(json).unwrap();
        assert_eq!(seed, TeamSeed::new("Sjedinjene Države", "USA", 1));
    }
}
