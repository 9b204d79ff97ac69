use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::exhibition::Exhibition;
use crate::registry::TeamRegistry;

/// Form from a run of exhibitions: win rate times share of all points scored.
///
/// Returns `None` for an empty history so the caller keeps the default form.
pub fn calculate_form(exhibitions: &[Exhibition]) -> Result<Option<f64>> {
    if exhibitions.is_empty() {
        return Ok(None);
    }

    let mut games_won = 0u32;
    let mut team_points = 0u64;
    let mut total_points = 0u64;

    for exhibition in exhibitions {
        let (team_score, opponent_score) = exhibition.scores()?;
        if team_score > opponent_score {
            games_won += 1;
        }
        team_points += u64::from(team_score);
        total_points += u64::from(team_score) + u64::from(opponent_score);
    }

    let win_frequency = f64::from(games_won) / exhibitions.len() as f64;
    let point_frequency = if total_points == 0 {
        0.0
    } else {
        team_points as f64 / total_points as f64
    };

    Ok(Some(win_frequency * point_frequency))
}

/// Set every registered team's form from its exhibition history.
///
/// Teams with no entry (or an empty entry) keep their current form. A malformed
/// result string aborts the whole pass.
pub fn initialize_team_form(
    registry: &mut TeamRegistry,
    exhibitions: &HashMap<String, Vec<Exhibition>>,
) -> Result<()> {
    for team in registry.iter_mut() {
        let history = exhibitions.get(&team.code).map(Vec::as_slice).unwrap_or_default();
        match calculate_form(history)? {
            Some(form) => {
                debug!(team = %team.code, games = history.len(), form, "form from exhibitions");
                team.form = form;
            }
            None => warn!(team = %team.code, form = team.form, "no exhibitions, keeping default form"),
        }
    }
    Ok(())
}
