use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::SimulatorConfig;
use crate::data::{DataSource, ExhibitionMap, GroupSeeds};
use crate::elimination::{simulate_elimination, EliminationOutcome, MedalTable};
use crate::error::Result;
use crate::form::initialize_team_form;
use crate::group_stage::{final_standings, simulate_group_stage, Group};
use crate::match_result::MatchResult;
use crate::registry::TeamRegistry;
use crate::report::ResultSink;
use crate::seeding::{draw_quarterfinals, qualify, Pairing, Qualification};
use crate::simulator::FormSimulator;
use crate::standings::GroupStandings;
use crate::team::TeamId;

/// Teams, groups and rules for one tournament.
#[derive(Clone, Debug)]
pub struct Tournament {
    registry: TeamRegistry,

    /// In group-name order
    groups: Vec<Group>,

    config: SimulatorConfig,

    qualification: Qualification,
}

/// Everything a single run produced.
#[derive(Clone, Debug)]
pub struct TournamentOutcome {
    pub group_matches: Vec<MatchResult>,
    pub standings: Vec<GroupStandings>,
    /// Seeding order of the bracket entrants
    pub qualified: Vec<TeamId>,
    pub quarterfinals: Vec<Pairing>,
    pub elimination: EliminationOutcome,
}

impl TournamentOutcome {
    pub fn medals(&self) -> MedalTable {
        self.elimination.medals
    }
}

impl Tournament {
    /// Register every seeded team, group by group in name order.
    pub fn new(groups: GroupSeeds, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = TeamRegistry::new();
        let mut built = Vec::with_capacity(groups.len());
        for (name, seeds) in groups {
            let ids = seeds
                .into_iter()
                .map(|seed| registry.insert(seed))
                .collect::<Result<Vec<_>>>()?;
            built.push(Group::new(name, ids));
        }

        info!(groups = built.len(), teams = registry.len(), "tournament created");
        Ok(Tournament {
            registry,
            groups: built,
            config,
            qualification: Qualification::default(),
        })
    }

    /// Load groups and exhibitions from `source` and derive every team's form.
    pub fn from_source<D: DataSource + ?Sized>(source: &D, config: SimulatorConfig) -> Result<Self> {
        let mut tournament = Tournament::new(source.groups()?, config)?;
        tournament.initialize_form(&source.exhibitions()?)?;
        Ok(tournament)
    }

    pub fn with_qualification(mut self, qualification: Qualification) -> Self {
        self.qualification = qualification;
        self
    }

    pub fn initialize_form(&mut self, exhibitions: &ExhibitionMap) -> Result<()> {
        initialize_team_form(&mut self.registry, exhibitions)
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TeamRegistry {
        &mut self.registry
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn qualification(&self) -> Qualification {
        self.qualification
    }

    /// Clear group-stage statistics so the tournament can be played again.
    pub fn reset(&mut self) {
        self.registry.reset_statistics();
    }

    /// Play the whole tournament: group stage, qualification, draw, bracket.
    ///
    /// Statistics accumulate on top of whatever the registry already holds;
    /// call [`reset`](Self::reset) first to replay.
    pub fn run<R, K>(&mut self, rng: &mut R, sink: &mut K) -> Result<TournamentOutcome>
    where
        R: Rng + ?Sized,
        K: ResultSink + ?Sized,
    {
        let mut simulator = FormSimulator::new(&self.config, rng);
        let group_matches = simulate_group_stage(&mut self.registry, &self.groups, &mut simulator, sink)?;

        let standings = final_standings(&self.registry, &self.groups)?;
        for table in &standings {
            sink.group_standings(table, &self.registry)?;
        }

        let qualified = qualify(&self.registry, &standings, self.qualification)?;
        let quarterfinals = draw_quarterfinals(&self.registry, &qualified, rng)?;

        let mut simulator = FormSimulator::new(&self.config, rng);
        let elimination = simulate_elimination(&self.registry, &quarterfinals, &mut simulator, sink)?;

        Ok(TournamentOutcome {
            group_matches,
            standings,
            qualified,
            quarterfinals,
            elimination,
        })
    }

    /// Run with a ChaCha8 generator seeded from `seed`, or from entropy.
    pub fn run_seeded<K: ResultSink + ?Sized>(
        &mut self,
        seed: Option<u64>,
        sink: &mut K,
    ) -> Result<TournamentOutcome> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run(&mut rng, sink)
    }
}
