use crate::config::SimulatorConfig;
use crate::simulator::{adjusted_odds, forfeit_probability, odds_share, scaled_score};

/// Exact probability that team 1 beats team 2 in one simulated match.
///
/// Enumerates every equally likely pair of base scores, resolves level scores
/// by odds share, and folds in the forfeit checks in the order the simulator
/// draws them (team 1 first).
///
/// # Arguments
/// * `form1` - Form of the first-listed team
/// * `form2` - Form of the second-listed team
/// * `config` - Match model parameters
///
/// # Returns
/// Probability of team1 winning (0.0-1.0)
pub fn calculate_win_prob(form1: f64, form2: f64, config: &SimulatorConfig) -> f64 {
    let (odds1, odds2) = adjusted_odds(form1, form2, config);

    // A draw below a negative probability never happens; one above 1 always does
    let forfeit1 = forfeit_probability(odds1, config).clamp(0.0, 1.0);
    let forfeit2 = forfeit_probability(odds2, config).clamp(0.0, 1.0);

    let played = played_win_prob(odds1, odds2, config);

    (1.0 - forfeit1) * (forfeit2 + (1.0 - forfeit2) * played)
}

/// Probability that team 1 wins given that neither side forfeits.
pub fn played_win_prob(odds1: f64, odds2: f64, config: &SimulatorConfig) -> f64 {
    let bases = config.base_score_min..config.base_score_max;
    let outcomes = bases.len() as f64 * bases.len() as f64;
    if outcomes == 0.0 {
        return 0.5;
    }

    let tie_share = odds_share(odds1, odds2);
    let mut wins = 0.0;

    for base1 in bases.clone() {
        let score1 = scaled_score(base1, odds1, config);
        for base2 in bases.clone() {
            let score2 = scaled_score(base2, odds2, config);
            if score1 > score2 {
                wins += 1.0;
            } else if score1 == score2 {
                wins += tie_share;
            }
        }
    }

    wins / outcomes
}

/// Expected (team1, team2) score of a played match, ignoring tie-break points.
pub fn calculate_expected_scores(form1: f64, form2: f64, config: &SimulatorConfig) -> (f64, f64) {
    let (odds1, odds2) = adjusted_odds(form1, form2, config);
    let bases = config.base_score_min..config.base_score_max;
    let count = bases.len() as f64;
    if count == 0.0 {
        return (0.0, 0.0);
    }

    let mean = |odds: f64| {
        bases
            .clone()
            .map(|base| f64::from(scaled_score(base, odds, config)))
            .sum::<f64>()
            / count
    };

    (mean(odds1), mean(odds2))
}
