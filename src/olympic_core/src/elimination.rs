use std::collections::HashSet;

use tracing::info;

use crate::constants::QUARTERFINALS;
use crate::error::{Result, TournamentError};
use crate::match_result::{MatchResult, Round};
use crate::registry::TeamRegistry;
use crate::report::ResultSink;
use crate::seeding::Pairing;
use crate::simulator::MatchSimulator;
use crate::team::TeamId;

/// Gold, silver and bronze, three distinct teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MedalTable {
    pub gold: TeamId,
    pub silver: TeamId,
    pub bronze: TeamId,
}

impl MedalTable {
    pub fn new(registry: &TeamRegistry, gold: TeamId, silver: TeamId, bronze: TeamId) -> Result<Self> {
        let duplicate = |team: TeamId| match registry.get(team) {
            Ok(team) => TournamentError::DuplicateMedal(team.code.clone()),
            Err(err) => err,
        };
        if silver == gold {
            return Err(duplicate(silver));
        }
        if bronze == gold || bronze == silver {
            return Err(duplicate(bronze));
        }
        Ok(MedalTable { gold, silver, bronze })
    }

    pub fn medal_of(&self, team: TeamId) -> Option<Medal> {
        if team == self.gold {
            Some(Medal::Gold)
        } else if team == self.silver {
            Some(Medal::Silver)
        } else if team == self.bronze {
            Some(Medal::Bronze)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

/// A result together with the round it was played in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayedMatch {
    pub round: Round,
    pub result: MatchResult,
}

#[derive(Clone, Debug)]
pub struct EliminationOutcome {
    /// Every elimination match in play order
    pub matches: Vec<PlayedMatch>,
    pub medals: MedalTable,
}

impl EliminationOutcome {
    pub fn results_in(&self, round: Round) -> impl Iterator<Item = &MatchResult> + '_ {
        self.matches
            .iter()
            .filter(move |m| m.round == round)
            .map(|m| &m.result)
    }
}

/// Run the bracket from four quarterfinals to the medal table.
///
/// Quarterfinal winners meet in slot order (1 v 2, 3 v 4). The final is
/// played before the bronze match. Elimination results do not touch group
/// statistics.
pub fn simulate_elimination<S, K>(
    registry: &TeamRegistry,
    quarterfinals: &[Pairing],
    simulator: &mut S,
    sink: &mut K,
) -> Result<EliminationOutcome>
where
    S: MatchSimulator + ?Sized,
    K: ResultSink + ?Sized,
{
    if quarterfinals.len() != QUARTERFINALS {
        return Err(TournamentError::QuarterfinalCount(quarterfinals.len()));
    }
    let mut entrants = HashSet::with_capacity(2 * QUARTERFINALS);
    for team in quarterfinals.iter().flat_map(|p| [p.team1(), p.team2()]) {
        if !entrants.insert(team) {
            return Err(TournamentError::DuplicatePairing(registry.get(team)?.code.clone()));
        }
    }

    let mut bracket = Bracket {
        registry,
        simulator,
        sink,
        matches: Vec::with_capacity(QUARTERFINALS + 4),
    };

    bracket.sink.pairings(Round::Quarterfinal, quarterfinals, registry)?;
    let mut winners = Vec::with_capacity(QUARTERFINALS);
    for pairing in quarterfinals {
        winners.push(bracket.play(Round::Quarterfinal, pairing)?.winner());
    }

    let semifinals = [
        Pairing::new(registry, winners[0], winners[1])?,
        Pairing::new(registry, winners[2], winners[3])?,
    ];
    bracket.sink.pairings(Round::Semifinal, &semifinals, registry)?;
    let semi1 = bracket.play(Round::Semifinal, &semifinals[0])?;
    let semi2 = bracket.play(Round::Semifinal, &semifinals[1])?;

    let final_pairing = Pairing::new(registry, semi1.winner(), semi2.winner())?;
    let bronze_pairing = Pairing::new(registry, semi1.loser(), semi2.loser())?;

    let final_result = bracket.play(Round::Final, &final_pairing)?;
    let bronze_result = bracket.play(Round::BronzeMatch, &bronze_pairing)?;

    let medals = MedalTable::new(
        registry,
        final_result.winner(),
        final_result.loser(),
        bronze_result.winner(),
    )?;

    info!(
        gold = %registry.get(medals.gold)?.code,
        silver = %registry.get(medals.silver)?.code,
        bronze = %registry.get(medals.bronze)?.code,
        "medals decided"
    );
    bracket.sink.medals(&medals, registry)?;

    Ok(EliminationOutcome {
        matches: bracket.matches,
        medals,
    })
}

struct Bracket<'a, S: ?Sized, K: ?Sized> {
    registry: &'a TeamRegistry,
    simulator: &'a mut S,
    sink: &'a mut K,
    matches: Vec<PlayedMatch>,
}

impl<S: MatchSimulator + ?Sized, K: ResultSink + ?Sized> Bracket<'_, S, K> {
    fn play(&mut self, round: Round, pairing: &Pairing) -> Result<MatchResult> {
        let team1 = self.registry.get(pairing.team1())?;
        let team2 = self.registry.get(pairing.team2())?;

        let result = self.simulator.simulate(team1, team2)?;
        if !(result.involves(team1.id) && result.involves(team2.id)) {
            return Err(TournamentError::MissingTeam(if result.involves(team1.id) {
                team2.id
            } else {
                team1.id
            }));
        }

        self.sink.match_played(round, &result, self.registry)?;
        self.matches.push(PlayedMatch { round, result });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullSink;
    use crate::team::{Team, TeamSeed};

    /// Team 1 always wins 100-80.
    struct FavoriteFirst;

    impl MatchSimulator for FavoriteFirst {
        fn simulate(&mut self, team1: &Team, team2: &Team) -> Result<MatchResult> {
            MatchResult::played(team1.id, team2.id, 100, 80)
        }
    }

    /// Ignores the pairing and always reports the same match.
    struct Rogue(TeamId, TeamId);

    impl MatchSimulator for Rogue {
        fn simulate(&mut self, _: &Team, _: &Team) -> Result<MatchResult> {
            MatchResult::played(self.0, self.1, 100, 80)
        }
    }

    fn bracket_of_eight() -> (TeamRegistry, Vec<TeamId>, Vec<Pairing>) {
        let mut registry = TeamRegistry::new();
        let ids: Vec<TeamId> = (0..8)
            .map(|i| registry.insert(TeamSeed::new(format!("Team{i}"), format!("T{i}"), 1)).unwrap())
            .collect();
        let quarterfinals = (0..4)
            .map(|i| Pairing::new(&registry, ids[i], ids[7 - i]).unwrap())
            .collect();
        (registry, ids, quarterfinals)
    }

    #[test]
    fn test_scripted_bracket_medals() {
        let (registry, ids, quarterfinals) = bracket_of_eight();
        let outcome =
            simulate_elimination(&registry, &quarterfinals, &mut FavoriteFirst, &mut NullSink).unwrap();

        // QF winners 0,1,2,3; SF 0v1 and 2v3; final 0v2; bronze 1v3
        assert_eq!(
            outcome.medals,
            MedalTable {
                gold: ids[0],
                silver: ids[2],
                bronze: ids[1],
            }
        );
        assert_eq!(outcome.matches.len(), 8);

        let rounds: Vec<Round> = outcome.matches.iter().map(|m| m.round).collect();
        assert_eq!(
            rounds,
            vec![
                Round::Quarterfinal,
                Round::Quarterfinal,
                Round::Quarterfinal,
                Round::Quarterfinal,
                Round::Semifinal,
                Round::Semifinal,
                Round::Final,
                Round::BronzeMatch,
            ]
        );
        assert_eq!(outcome.results_in(Round::Semifinal).count(), 2);
        assert_eq!(outcome.medals.medal_of(ids[2]), Some(Medal::Silver));
        assert_eq!(outcome.medals.medal_of(ids[7]), None);
    }

    #[test]
    fn test_each_team_plays_once_per_round() {
        let (registry, _, quarterfinals) = bracket_of_eight();
        let outcome =
            simulate_elimination(&registry, &quarterfinals, &mut FavoriteFirst, &mut NullSink).unwrap();

        for round in [Round::Quarterfinal, Round::Semifinal] {
            let mut seen = std::collections::HashSet::new();
            for result in outcome.results_in(round) {
                assert!(seen.insert(result.team1));
                assert!(seen.insert(result.team2));
            }
        }
    }

    #[test]
    fn test_requires_four_quarterfinals() {
        let (registry, _, quarterfinals) = bracket_of_eight();
        let err = simulate_elimination(&registry, &quarterfinals[..3], &mut FavoriteFirst, &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, TournamentError::QuarterfinalCount(3)));
    }

    #[test]
    fn test_team_in_two_quarterfinals_rejected() {
        let (registry, ids, _) = bracket_of_eight();
        let quarterfinals: Vec<Pairing> = [(0, 1), (2, 0), (3, 4), (5, 6)]
            .into_iter()
            .map(|(a, b)| Pairing::new(&registry, ids[a], ids[b]).unwrap())
            .collect();

        let err = simulate_elimination(&registry, &quarterfinals, &mut FavoriteFirst, &mut NullSink).unwrap_err();
        assert!(matches!(err, TournamentError::DuplicatePairing(code) if code == "T0"));
    }

    #[test]
    fn test_duplicate_medal_rejected() {
        let (registry, ids, _) = bracket_of_eight();
        let err = MedalTable::new(&registry, ids[0], ids[1], ids[0]).unwrap_err();
        assert!(matches!(err, TournamentError::DuplicateMedal(code) if code == "T0"));
        assert!(MedalTable::new(&registry, ids[0], ids[0], ids[2]).is_err());
    }

    #[test]
    fn test_result_for_wrong_teams_rejected() {
        let (registry, ids, quarterfinals) = bracket_of_eight();
        let mut rogue = Rogue(ids[0], ids[1]);
        assert!(simulate_elimination(&registry, &quarterfinals, &mut rogue, &mut NullSink).is_err());
    }
}
