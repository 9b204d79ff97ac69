use std::cmp::Ordering;

use tracing::warn;

use crate::constants::{POINTS_FOR_FORFEIT, POINTS_FOR_LOSS, POINTS_FOR_WIN};
use crate::error::Result;
use crate::match_result::MatchResult;
use crate::registry::TeamRegistry;
use crate::team::{Team, TeamId};

/// Apply one result to both teams' records.
///
/// Not idempotent: every result must be applied exactly once.
pub fn apply_result(registry: &mut TeamRegistry, result: &MatchResult) -> Result<()> {
    // Resolve both sides before touching either record
    registry.get(result.team1)?;
    registry.get(result.team2)?;

    let winner = result.winner();
    let loser = result.loser();

    if result.is_forfeit() {
        // Forfeits carry no win/loss and no score statistics
        registry.get_mut(winner)?.points += POINTS_FOR_WIN;
        registry.get_mut(loser)?.points += POINTS_FOR_FORFEIT;
    } else {
        {
            let team = registry.get_mut(winner)?;
            team.wins += 1;
            team.points += POINTS_FOR_WIN;
        }
        {
            let team = registry.get_mut(loser)?;
            team.losses += 1;
            team.points += POINTS_FOR_LOSS;
        }
        for id in [result.team1, result.team2] {
            let team = registry.get_mut(id)?;
            if let Some((own, opponent)) = result.scores_for(id) {
                team.points_scored += i64::from(own);
                team.points_conceded += i64::from(opponent);
            }
        }
    }

    registry.get_mut(result.team1)?.history.push(*result);
    registry.get_mut(result.team2)?.history.push(*result);
    Ok(())
}

/// Ranking order: points, then point difference, then points scored, all descending.
///
/// Teams equal on all three keys compare as `Equal`; no further tiebreaker is applied.
pub fn compare_teams(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.point_difference().cmp(&a.point_difference()))
        .then_with(|| b.points_scored.cmp(&a.points_scored))
}

/// Sort `teams` by the ranking rule. Remaining ties keep their input order.
pub fn rank_teams(registry: &TeamRegistry, teams: &[TeamId]) -> Result<Vec<TeamId>> {
    let mut records = teams
        .iter()
        .map(|&id| registry.get(id))
        .collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| compare_teams(a, b));
    Ok(records.into_iter().map(|team| team.id).collect())
}

/// One line of a group table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingRow {
    /// 1-based
    pub rank: usize,
    pub team: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub scored: i64,
    pub conceded: i64,
    pub difference: i64,
}

/// Final table of one group.
#[derive(Clone, Debug)]
pub struct GroupStandings {
    pub group: String,
    pub rows: Vec<StandingRow>,

    /// Runs of adjacent teams the ranking rule could not separate, in table order
    pub unresolved_ties: Vec<Vec<TeamId>>,
}

impl GroupStandings {
    pub fn ranked(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.rows.iter().map(|row| row.team)
    }

    pub fn has_unresolved_ties(&self) -> bool {
        !self.unresolved_ties.is_empty()
    }
}

/// Build the ranked table for one group.
pub fn group_standings(registry: &TeamRegistry, group: &str, teams: &[TeamId]) -> Result<GroupStandings> {
    let ranked = rank_teams(registry, teams)?;

    let mut rows = Vec::with_capacity(ranked.len());
    for (i, &id) in ranked.iter().enumerate() {
        let team = registry.get(id)?;
        rows.push(StandingRow {
            rank: i + 1,
            team: id,
            wins: team.wins,
            losses: team.losses,
            points: team.points,
            scored: team.points_scored,
            conceded: team.points_conceded,
            difference: team.point_difference(),
        });
    }

    let unresolved_ties = find_ties(registry, &ranked)?;
    for tie in &unresolved_ties {
        warn!(group, teams = ?tie, "ranking tie left unresolved");
    }

    Ok(GroupStandings {
        group: group.to_string(),
        rows,
        unresolved_ties,
    })
}

fn find_ties(registry: &TeamRegistry, ranked: &[TeamId]) -> Result<Vec<Vec<TeamId>>> {
    let mut ties = Vec::new();
    let mut run: Vec<TeamId> = Vec::new();

    for &id in ranked {
        let team = registry.get(id)?;
        let same = match run.last() {
            Some(&prev) => compare_teams(registry.get(prev)?, team) == Ordering::Equal,
            None => false,
        };
        if !same {
            if run.len() > 1 {
                ties.push(std::mem::take(&mut run));
            }
            run.clear();
        }
        run.push(id);
    }
    if run.len() > 1 {
        ties.push(run);
    }

    Ok(ties)
}
