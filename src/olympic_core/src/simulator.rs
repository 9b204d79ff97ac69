use rand::Rng;
use tracing::debug;

use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::match_result::MatchResult;
use crate::team::Team;

/// Produces one result for a pairing. The orchestrators only see this seam,
/// so tests can substitute a scripted simulator.
pub trait MatchSimulator {
    fn simulate(&mut self, team1: &Team, team2: &Team) -> Result<MatchResult>;
}

/// Odds of both sides after moving a share of the form gap to the stronger side.
///
/// The adjustments cancel, so the two odds always sum to `form1 + form2`.
pub fn adjusted_odds(form1: f64, form2: f64, config: &SimulatorConfig) -> (f64, f64) {
    let gap = (form1 - form2) * config.form_gap_factor;
    (form1 + gap, form2 - gap)
}

pub fn forfeit_probability(odds: f64, config: &SimulatorConfig) -> f64 {
    (1.0 - odds) * config.forfeit_rate
}

/// Chance that a level score is broken in team 1's favour.
pub fn odds_share(odds1: f64, odds2: f64) -> f64 {
    let total = odds1 + odds2;
    if total > 0.0 {
        odds1 / total
    } else {
        0.5
    }
}

/// Scale a base score by `1 + odds`, truncate, and clamp into the score band.
pub fn scaled_score(base: i32, odds: f64, config: &SimulatorConfig) -> i32 {
    let scaled = (f64::from(base) * (1.0 + odds)) as i32;
    scaled.clamp(config.score_floor, config.score_ceiling)
}

/// Simulate one match from the two teams' form.
///
/// Random draws happen in a fixed order: team 1 forfeit check, team 2 forfeit
/// check, team 1 base score, team 2 base score, then one tie-break draw only if
/// the scores came out level. A team 1 forfeit ends the match before any other
/// draw.
pub fn simulate_match<R: Rng + ?Sized>(
    team1: &Team,
    team2: &Team,
    config: &SimulatorConfig,
    rng: &mut R,
) -> Result<MatchResult> {
    let (odds1, odds2) = adjusted_odds(team1.form, team2.form, config);

    if rng.gen::<f64>() < forfeit_probability(odds1, config) {
        debug!(forfeiting = %team1.code, opponent = %team2.code, "forfeit");
        return MatchResult::forfeit(team1.id, team2.id, team1.id);
    }
    if rng.gen::<f64>() < forfeit_probability(odds2, config) {
        debug!(forfeiting = %team2.code, opponent = %team1.code, "forfeit");
        return MatchResult::forfeit(team1.id, team2.id, team2.id);
    }

    let base_range = config.base_score_min..config.base_score_max;
    let mut score1 = scaled_score(rng.gen_range(base_range.clone()), odds1, config);
    let mut score2 = scaled_score(rng.gen_range(base_range), odds2, config);

    if score1 == score2 {
        if rng.gen::<f64>() < odds_share(odds1, odds2) {
            score1 += 1;
        } else {
            score2 += 1;
        }
    }

    debug!(team1 = %team1.code, team2 = %team2.code, score1, score2, "match played");
    MatchResult::played(team1.id, team2.id, score1, score2)
}

/// The form-driven simulator, drawing from a caller-supplied random source.
pub struct FormSimulator<'a, R: Rng + ?Sized> {
    config: &'a SimulatorConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> FormSimulator<'a, R> {
    pub fn new(config: &'a SimulatorConfig, rng: &'a mut R) -> Self {
        FormSimulator { config, rng }
    }
}

impl<R: Rng + ?Sized> MatchSimulator for FormSimulator<'_, R> {
    fn simulate(&mut self, team1: &Team, team2: &Team) -> Result<MatchResult> {
        simulate_match(team1, team2, self.config, &mut *self.rng)
    }
}
