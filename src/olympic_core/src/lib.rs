//! Olympic Core - Olympic basketball tournament simulation.
//!
//! Derives each team's form from exhibition results, plays the group stage
//! round robin, seeds the eight qualifiers into pots, draws the quarterfinals
//! and runs the bracket down to a medal table. All randomness comes from a
//! caller-supplied generator so seeded runs are reproducible.
//!
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod data;
pub mod elimination;
pub mod error;
pub mod exhibition;
pub mod form;
pub mod group_stage;
pub mod match_result;
pub mod medal_odds;
pub mod registry;
pub mod report;
pub mod seeding;
pub mod simulator;
pub mod standings;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use config::{SimulatorConfig, TournamentConfig};
pub use constants::{DEFAULT_FORM, FORFEIT_SCORE, QUALIFIED_TEAMS};
pub use data::{DataSource, ExhibitionMap, GroupSeeds, InMemory, JsonFiles};
pub use elimination::{simulate_elimination, EliminationOutcome, Medal, MedalTable, PlayedMatch};
pub use error::{Result, TournamentError};
pub use exhibition::Exhibition;
pub use form::{calculate_form, initialize_team_form};
pub use group_stage::{final_standings, round_robin_pairs, simulate_group_stage, Group};
pub use match_result::{MatchResult, Round};
pub use medal_odds::{run_simulations, MedalCounts, MedalOdds};
pub use registry::TeamRegistry;
pub use report::{NullSink, ResultSink, TextReport, TraceSink};
pub use seeding::{draw_quarterfinals, qualify, Pairing, Pots, Qualification};
pub use simulator::{simulate_match, FormSimulator, MatchSimulator};
pub use standings::{apply_result, group_standings, rank_teams, GroupStandings, StandingRow};
pub use team::{Team, TeamId, TeamSeed};
pub use tournament::{Tournament, TournamentOutcome};
pub use win_prob::{calculate_expected_scores, calculate_win_prob};
