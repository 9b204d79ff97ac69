use rand::Rng;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

use crate::constants::{POT_SIZE, QUALIFIED_TEAMS};
use crate::error::{Result, TournamentError};
use crate::registry::TeamRegistry;
use crate::standings::{rank_teams, GroupStandings};
use crate::team::TeamId;

/// How the eight bracket entrants are picked from the group tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Qualification {
    /// Concatenate group tables in group order; must yield exactly eight teams.
    #[default]
    GroupOrder,
    /// All group winners ranked against each other, then all runners-up, and so
    /// on; the best eight go through.
    CrossGroup,
}

impl FromStr for Qualification {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "group-order" => Ok(Qualification::GroupOrder),
            "cross-group" => Ok(Qualification::CrossGroup),
            other => Err(TournamentError::InvalidConfig(format!(
                "unknown qualification rule {other:?} (expected group-order or cross-group)"
            ))),
        }
    }
}

/// Seeding order of the bracket entrants, best first.
pub fn qualify(
    registry: &TeamRegistry,
    standings: &[GroupStandings],
    rule: Qualification,
) -> Result<Vec<TeamId>> {
    let ranked = match rule {
        Qualification::GroupOrder => {
            let ranked: Vec<TeamId> = standings.iter().flat_map(|s| s.ranked()).collect();
            if ranked.len() != QUALIFIED_TEAMS {
                return Err(TournamentError::QualifiedCount {
                    expected: QUALIFIED_TEAMS,
                    found: ranked.len(),
                });
            }
            ranked
        }
        Qualification::CrossGroup => {
            let depth = standings.iter().map(|s| s.rows.len()).max().unwrap_or(0);
            let mut ranked = Vec::new();
            for position in 0..depth {
                let tier: Vec<TeamId> = standings
                    .iter()
                    .filter_map(|s| s.rows.get(position).map(|row| row.team))
                    .collect();
                ranked.extend(rank_teams(registry, &tier)?);
            }
            if ranked.len() < QUALIFIED_TEAMS {
                return Err(TournamentError::QualifiedCount {
                    expected: QUALIFIED_TEAMS,
                    found: ranked.len(),
                });
            }
            ranked.truncate(QUALIFIED_TEAMS);
            ranked
        }
    };

    debug!(?rule, teams = ?ranked, "qualified");
    Ok(ranked)
}

/// One scheduled match between two distinct registered teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pairing {
    team1: TeamId,
    team2: TeamId,
}

impl Pairing {
    pub fn new(registry: &TeamRegistry, team1: TeamId, team2: TeamId) -> Result<Self> {
        for id in [team1, team2] {
            if !registry.contains(id) {
                return Err(TournamentError::MissingTeam(id));
            }
        }
        if team1 == team2 {
            return Err(TournamentError::SameTeam(team1));
        }
        Ok(Pairing { team1, team2 })
    }

    pub fn team1(&self) -> TeamId {
        self.team1
    }

    pub fn team2(&self) -> TeamId {
        self.team2
    }

    pub fn contains(&self, team: TeamId) -> bool {
        self.team1 == team || self.team2 == team
    }
}

/// The four seeding hats, two teams each, by position in the seeding order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pots {
    /// Ranks 1-2
    pub d: Vec<TeamId>,
    /// Ranks 3-4
    pub e: Vec<TeamId>,
    /// Ranks 5-6
    pub f: Vec<TeamId>,
    /// Ranks 7-8
    pub g: Vec<TeamId>,
}

impl Pots {
    pub fn from_ranking(ranked: &[TeamId]) -> Result<Self> {
        if ranked.len() != QUALIFIED_TEAMS {
            return Err(TournamentError::QualifiedCount {
                expected: QUALIFIED_TEAMS,
                found: ranked.len(),
            });
        }
        let mut hats = ranked.chunks(POT_SIZE).map(<[TeamId]>::to_vec);
        let mut next = || hats.next().unwrap_or_default();
        Ok(Pots {
            d: next(),
            e: next(),
            f: next(),
            g: next(),
        })
    }
}

/// Draw the four quarterfinals: pot D against pot G, then pot E against pot F.
///
/// Each seeded team, in pot order, draws its opponent uniformly from what is
/// left of the opposing pot. One draw is taken per pairing, including the
/// forced pick from a single remaining team.
pub fn draw_quarterfinals<R: Rng + ?Sized>(
    registry: &TeamRegistry,
    ranked: &[TeamId],
    rng: &mut R,
) -> Result<Vec<Pairing>> {
    let Pots { d, e, mut f, mut g } = Pots::from_ranking(ranked)?;

    let mut pairings = Vec::with_capacity(QUALIFIED_TEAMS / 2);
    for (seeded, pot) in [(d, &mut g), (e, &mut f)] {
        for team in seeded {
            let opponent = draw_from(pot, rng);
            pairings.push(Pairing::new(registry, team, opponent)?);
        }
    }

    debug!(?pairings, "quarterfinals drawn");
    Ok(pairings)
}

fn draw_from<R: Rng + ?Sized>(pot: &mut Vec<TeamId>, rng: &mut R) -> TeamId {
    let index = rng.gen_range(0..pot.len());
    pot.remove(index)
}
