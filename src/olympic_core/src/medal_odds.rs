use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::HashMap;
use tracing::info;

use crate::elimination::{Medal, MedalTable};
use crate::error::{Result, TournamentError};
use crate::report::NullSink;
use crate::team::TeamId;
use crate::tournament::Tournament;

/// How often a team finished on each podium step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MedalCounts {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl MedalCounts {
    pub fn podium(&self) -> usize {
        self.gold + self.silver + self.bronze
    }

    fn add(&mut self, medal: Medal) {
        match medal {
            Medal::Gold => self.gold += 1,
            Medal::Silver => self.silver += 1,
            Medal::Bronze => self.bronze += 1,
        }
    }
}

/// Medal tallies over many independent tournament runs.
#[derive(Clone, Debug)]
pub struct MedalOdds {
    pub simulations: usize,
    counts: HashMap<TeamId, MedalCounts>,
}

impl MedalOdds {
    pub fn from_tables(tables: &[MedalTable]) -> Self {
        let mut counts: HashMap<TeamId, MedalCounts> = HashMap::new();
        for table in tables {
            for (team, medal) in [
                (table.gold, Medal::Gold),
                (table.silver, Medal::Silver),
                (table.bronze, Medal::Bronze),
            ] {
                counts.entry(team).or_default().add(medal);
            }
        }
        MedalOdds {
            simulations: tables.len(),
            counts,
        }
    }

    pub fn counts(&self, team: TeamId) -> MedalCounts {
        self.counts.get(&team).copied().unwrap_or_default()
    }

    pub fn probability(&self, team: TeamId, medal: Medal) -> f64 {
        let counts = self.counts(team);
        let hits = match medal {
            Medal::Gold => counts.gold,
            Medal::Silver => counts.silver,
            Medal::Bronze => counts.bronze,
        };
        self.frequency(hits)
    }

    pub fn podium_probability(&self, team: TeamId) -> f64 {
        self.frequency(self.counts(team).podium())
    }

    /// Normal-approximation confidence interval for the podium probability.
    pub fn podium_interval(&self, team: TeamId, confidence: f64) -> Result<(f64, f64)> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(TournamentError::InvalidConfig(format!(
                "confidence {confidence} must be in (0, 1)"
            )));
        }
        if self.simulations == 0 {
            return Ok((0.0, 1.0));
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| TournamentError::InvalidConfig(e.to_string()))?;
        let z = normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);

        let p = self.podium_probability(team);
        let half_width = z * (p * (1.0 - p) / self.simulations as f64).sqrt();
        Ok(((p - half_width).max(0.0), (p + half_width).min(1.0)))
    }

    /// Teams that won any medal, best first: golds, then podiums, then id.
    pub fn ranked(&self) -> Vec<(TeamId, MedalCounts)> {
        let mut ranked: Vec<_> = self.counts.iter().map(|(&id, &counts)| (id, counts)).collect();
        ranked.sort_by(|(id_a, a), (id_b, b)| {
            b.gold
                .cmp(&a.gold)
                .then_with(|| b.podium().cmp(&a.podium()))
                .then_with(|| id_a.cmp(id_b))
        });
        ranked
    }

    fn frequency(&self, hits: usize) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            hits as f64 / self.simulations as f64
        }
    }
}

/// Play `n_simulations` independent tournaments and tally the medals.
///
/// A master generator draws one seed per run, so results depend only on `seed`
/// and not on how rayon schedules the runs. Every run starts from cleared
/// statistics.
pub fn run_simulations(tournament: &Tournament, n_simulations: usize, seed: Option<u64>) -> Result<MedalOdds> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeds: Vec<u64> = (0..n_simulations).map(|_| rng.gen::<u64>()).collect();

    let mut fresh = tournament.clone();
    fresh.reset();

    let tables = seeds
        .par_iter()
        .map(|&sim_seed| {
            let mut run = fresh.clone();
            let mut sim_rng = ChaCha8Rng::seed_from_u64(sim_seed);
            run.run(&mut sim_rng, &mut NullSink).map(|outcome| outcome.medals())
        })
        .collect::<Result<Vec<_>>>()?;

    info!(simulations = n_simulations, "medal odds computed");
    Ok(MedalOdds::from_tables(&tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::data::GroupSeeds;
    use crate::team::TeamSeed;

    fn make_test_tournament() -> Tournament {
        let mut groups = GroupSeeds::new();
        groups.insert(
            "A".to_string(),
            ["CAN", "AUS", "GRE", "ESP"].iter().map(|c| TeamSeed::new(*c, *c, 1)).collect(),
        );
        groups.insert(
            "B".to_string(),
            ["GER", "FRA", "BRA", "JPN"].iter().map(|c| TeamSeed::new(*c, *c, 1)).collect(),
        );
        Tournament::new(groups, SimulatorConfig::default()).unwrap()
    }

    #[test]
    fn test_from_tables() {
        let (a, b, c, d) = (TeamId(0), TeamId(1), TeamId(2), TeamId(3));
        let tables = [
            MedalTable { gold: a, silver: b, bronze: c },
            MedalTable { gold: b, silver: a, bronze: d },
        ];
        let odds = MedalOdds::from_tables(&tables);

        assert_eq!(odds.simulations, 2);
        assert_eq!(odds.counts(a), MedalCounts { gold: 1, silver: 1, bronze: 0 });
        assert_eq!(odds.counts(TeamId(9)), MedalCounts::default());
        assert!((odds.probability(c, Medal::Bronze) - 0.5).abs() < 1e-12);
        assert!((odds.podium_probability(a) - 1.0).abs() < 1e-12);
        assert_eq!(odds.ranked()[0].0, a);
    }

    #[test]
    fn test_run_simulations_reproducible_and_consistent() {
        let tournament = make_test_tournament();
        let odds = run_simulations(&tournament, 64, Some(42)).unwrap();
        let again = run_simulations(&tournament, 64, Some(42)).unwrap();

        assert_eq!(odds.simulations, 64);
        let total: usize = tournament.registry().iter().map(|t| odds.counts(t.id).podium()).sum();
        assert_eq!(total, 3 * 64);

        for team in tournament.registry().iter() {
            assert_eq!(odds.counts(team.id), again.counts(team.id));
        }
    }

    #[test]
    fn test_dominant_team_takes_gold() {
        let mut tournament = make_test_tournament();
        for team in tournament.registry_mut().iter_mut() {
            team.form = if team.code == "FRA" { 0.95 } else { 0.05 };
        }
        let fra = tournament.registry().id_of("FRA").unwrap();

        let odds = run_simulations(&tournament, 50, Some(7)).unwrap();
        assert!(odds.probability(fra, Medal::Gold) > 0.9);
    }

    #[test]
    fn test_podium_interval() {
        let tournament = make_test_tournament();
        let odds = run_simulations(&tournament, 100, Some(3)).unwrap();
        let team = tournament.registry().id_of("CAN").unwrap();

        let p = odds.podium_probability(team);
        let (low, high) = odds.podium_interval(team, 0.95).unwrap();
        assert!(low <= p && p <= high);
        assert!((0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high));

        let (narrow_low, narrow_high) = odds.podium_interval(team, 0.5).unwrap();
        assert!(narrow_high - narrow_low <= high - low);

        assert!(odds.podium_interval(team, 1.0).is_err());
    }
}
