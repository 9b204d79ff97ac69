use crate::constants::{FORFEIT_SCORE, FORFEIT_WIN_SCORE};
use crate::error::{Result, TournamentError};
use crate::team::TeamId;

/// Stage of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Round {
    GroupStage,
    Quarterfinal,
    Semifinal,
    BronzeMatch,
    Final,
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Round::GroupStage => "Group stage",
            Round::Quarterfinal => "Quarterfinals",
            Round::Semifinal => "Semifinals",
            Round::BronzeMatch => "Third place match",
            Round::Final => "Finals",
        };
        f.write_str(name)
    }
}

/// Outcome of one simulated match.
///
/// A score equal to [`FORFEIT_SCORE`] marks the side that forfeited; the other
/// side then carries [`FORFEIT_WIN_SCORE`]. Completed matches never end level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub team1: TeamId,
    pub team2: TeamId,
    pub team1_score: i32,
    pub team2_score: i32,
    forfeited: Option<TeamId>,
}

impl MatchResult {
    /// A match that was played to completion.
    pub fn played(team1: TeamId, team2: TeamId, team1_score: i32, team2_score: i32) -> Result<Self> {
        if team1 == team2 {
            return Err(TournamentError::SameTeam(team1));
        }
        if team1_score == team2_score {
            return Err(TournamentError::DrawnMatch { score: team1_score });
        }
        Ok(MatchResult {
            team1,
            team2,
            team1_score,
            team2_score,
            forfeited: None,
        })
    }

    /// A match one side did not play. `forfeiting` must be `team1` or `team2`.
    pub fn forfeit(team1: TeamId, team2: TeamId, forfeiting: TeamId) -> Result<Self> {
        if team1 == team2 {
            return Err(TournamentError::SameTeam(team1));
        }
        let (team1_score, team2_score) = if forfeiting == team1 {
            (FORFEIT_SCORE, FORFEIT_WIN_SCORE)
        } else if forfeiting == team2 {
            (FORFEIT_WIN_SCORE, FORFEIT_SCORE)
        } else {
            return Err(TournamentError::MissingTeam(forfeiting));
        };
        Ok(MatchResult {
            team1,
            team2,
            team1_score,
            team2_score,
            forfeited: Some(forfeiting),
        })
    }

    pub fn is_forfeit(&self) -> bool {
        self.forfeited.is_some()
    }

    pub fn forfeited_team(&self) -> Option<TeamId> {
        self.forfeited
    }

    /// The side with the higher score; a forfeit win counts as higher.
    pub fn winner(&self) -> TeamId {
        if self.team1_score > self.team2_score {
            self.team1
        } else {
            self.team2
        }
    }

    pub fn loser(&self) -> TeamId {
        if self.team1_score > self.team2_score {
            self.team2
        } else {
            self.team1
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// (own score, opponent score) from `team`'s side, if it played in this match.
    pub fn scores_for(&self, team: TeamId) -> Option<(i32, i32)> {
        if team == self.team1 {
            Some((self.team1_score, self.team2_score))
        } else if team == self.team2 {
            Some((self.team2_score, self.team1_score))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: TeamId = TeamId(0);
    const B: TeamId = TeamId(1);

    #[test]
    fn test_played_winner_and_loser() {
        let result = MatchResult::played(A, B, 81, 95).unwrap();
        assert_eq!(result.winner(), B);
        assert_eq!(result.loser(), A);
        assert!(!result.is_forfeit());
        assert_eq!(result.scores_for(B), Some((95, 81)));
        assert_eq!(result.scores_for(TeamId(7)), None);
    }

    #[test]
    fn test_draw_rejected() {
        assert!(matches!(
            MatchResult::played(A, B, 90, 90),
            Err(TournamentError::DrawnMatch { score: 90 })
        ));
    }

    #[test]
    fn test_same_team_rejected() {
        assert!(matches!(MatchResult::played(A, A, 90, 80), Err(TournamentError::SameTeam(_))));
        assert!(matches!(MatchResult::forfeit(B, B, B), Err(TournamentError::SameTeam(_))));
    }

    #[test]
    fn test_forfeit_sentinels() {
        let result = MatchResult::forfeit(A, B, A).unwrap();
        assert_eq!(result.team1_score, FORFEIT_SCORE);
        assert_eq!(result.team2_score, FORFEIT_WIN_SCORE);
        assert_eq!(result.winner(), B);
        assert_eq!(result.forfeited_team(), Some(A));

        let result = MatchResult::forfeit(A, B, B).unwrap();
        assert_eq!(result.team1_score, FORFEIT_WIN_SCORE);
        assert_eq!(result.team2_score, FORFEIT_SCORE);
        assert_eq!(result.winner(), A);
    }

    #[test]
    fn test_forfeit_by_outsider_rejected() {
        assert!(MatchResult::forfeit(A, B, TeamId(9)).is_err());
    }
}
