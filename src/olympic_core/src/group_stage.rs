use tracing::info;

use crate::error::Result;
use crate::match_result::{MatchResult, Round};
use crate::registry::TeamRegistry;
use crate::report::ResultSink;
use crate::simulator::MatchSimulator;
use crate::standings::{apply_result, group_standings, GroupStandings};
use crate::team::TeamId;

/// A named group; team order fixes the round-robin schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub teams: Vec<TeamId>,
}

impl Group {
    pub fn new(name: impl Into<String>, teams: Vec<TeamId>) -> Self {
        Group {
            name: name.into(),
            teams,
        }
    }
}

/// Every unordered pair exactly once, ordered by (i, j) with i < j.
pub fn round_robin_pairs(teams: &[TeamId]) -> Vec<(TeamId, TeamId)> {
    let mut pairs = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, &team1) in teams.iter().enumerate() {
        for &team2 in &teams[i + 1..] {
            pairs.push((team1, team2));
        }
    }
    pairs
}

/// Play every group's round robin in order, applying each result to the standings.
///
/// Returns all results in the order they were simulated.
pub fn simulate_group_stage<S, K>(
    registry: &mut TeamRegistry,
    groups: &[Group],
    simulator: &mut S,
    sink: &mut K,
) -> Result<Vec<MatchResult>>
where
    S: MatchSimulator + ?Sized,
    K: ResultSink + ?Sized,
{
    let mut results = Vec::new();

    for group in groups {
        sink.group_started(&group.name)?;

        for (id1, id2) in round_robin_pairs(&group.teams) {
            let result = simulator.simulate(registry.get(id1)?, registry.get(id2)?)?;
            sink.match_played(Round::GroupStage, &result, registry)?;
            apply_result(registry, &result)?;
            results.push(result);
        }

        info!(group = %group.name, total_matches = results.len(), "group finished");
    }

    Ok(results)
}

/// Ranked table of every group, in group order.
pub fn final_standings(registry: &TeamRegistry, groups: &[Group]) -> Result<Vec<GroupStandings>> {
    groups
        .iter()
        .map(|group| group_standings(registry, &group.name, &group.teams))
        .collect()
}
