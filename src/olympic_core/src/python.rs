//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::SimulatorConfig;
use crate::constants::{DEFAULT_FORM, QUALIFIED_TEAMS};
use crate::data::JsonFiles;
use crate::elimination::Medal;
use crate::error::TournamentError;
use crate::medal_odds::run_simulations;
use crate::report::NullSink;
use crate::seeding::Qualification;
use crate::tournament::Tournament;
use crate::win_prob::calculate_win_prob;

impl From<TournamentError> for PyErr {
    fn from(err: TournamentError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn load(groups_path: &str, exhibitions_path: &str, qualification: &str) -> PyResult<Tournament> {
    let rule: Qualification = qualification.parse()?;
    let source = JsonFiles::new(groups_path, exhibitions_path);
    Ok(Tournament::from_source(&source, SimulatorConfig::default())?.with_qualification(rule))
}

/// Simulate one tournament and return the medal table as country codes.
#[pyfunction]
#[pyo3(signature = (groups_path, exhibitions_path, seed = None, qualification = "group-order"))]
fn simulate_tournament(
    groups_path: &str,
    exhibitions_path: &str,
    seed: Option<u64>,
    qualification: &str,
) -> PyResult<HashMap<String, String>> {
    let mut tournament = load(groups_path, exhibitions_path, qualification)?;
    let medals = tournament.run_seeded(seed, &mut NullSink)?.medals();

    let registry = tournament.registry();
    let mut table = HashMap::new();
    table.insert("gold".to_string(), registry.get(medals.gold)?.code.clone());
    table.insert("silver".to_string(), registry.get(medals.silver)?.code.clone());
    table.insert("bronze".to_string(), registry.get(medals.bronze)?.code.clone());
    Ok(table)
}

/// Monte Carlo medal probabilities: code -> (gold, silver, bronze).
#[pyfunction]
#[pyo3(signature = (groups_path, exhibitions_path, n_simulations, seed = None, qualification = "group-order"))]
fn medal_odds(
    groups_path: &str,
    exhibitions_path: &str,
    n_simulations: usize,
    seed: Option<u64>,
    qualification: &str,
) -> PyResult<HashMap<String, (f64, f64, f64)>> {
    let tournament = load(groups_path, exhibitions_path, qualification)?;
    let odds = run_simulations(&tournament, n_simulations, seed)?;

    Ok(tournament
        .registry()
        .iter()
        .map(|team| {
            (
                team.code.clone(),
                (
                    odds.probability(team.id, Medal::Gold),
                    odds.probability(team.id, Medal::Silver),
                    odds.probability(team.id, Medal::Bronze),
                ),
            )
        })
        .collect())
}

/// Exact probability that a team with `form1` beats one with `form2`.
#[pyfunction]
fn win_probability(form1: f64, form2: f64) -> f64 {
    calculate_win_prob(form1, form2, &SimulatorConfig::default())
}

/// Python module definition
#[pymodule]
fn olympic_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_tournament, m)?)?;
    m.add_function(wrap_pyfunction!(medal_odds, m)?)?;
    m.add_function(wrap_pyfunction!(win_probability, m)?)?;

    m.add("DEFAULT_FORM", DEFAULT_FORM)?;
    m.add("QUALIFIED_TEAMS", QUALIFIED_TEAMS)?;

    Ok(())
}
