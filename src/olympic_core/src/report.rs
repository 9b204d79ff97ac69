use std::io::Write;

use tracing::info;

use crate::elimination::MedalTable;
use crate::error::Result;
use crate::match_result::{MatchResult, Round};
use crate::registry::TeamRegistry;
use crate::seeding::Pairing;
use crate::standings::GroupStandings;

/// Receives everything a run produces, in the order it happens.
///
/// Every method defaults to doing nothing.
pub trait ResultSink {
    fn group_started(&mut self, _group: &str) -> Result<()> {
        Ok(())
    }

    fn match_played(&mut self, _round: Round, _result: &MatchResult, _teams: &TeamRegistry) -> Result<()> {
        Ok(())
    }

    fn pairings(&mut self, _round: Round, _pairings: &[Pairing], _teams: &TeamRegistry) -> Result<()> {
        Ok(())
    }

    fn group_standings(&mut self, _standings: &GroupStandings, _teams: &TeamRegistry) -> Result<()> {
        Ok(())
    }

    fn medals(&mut self, _medals: &MedalTable, _teams: &TeamRegistry) -> Result<()> {
        Ok(())
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {}

/// Emits every event as a `tracing` record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceSink;

impl ResultSink for TraceSink {
    fn match_played(&mut self, round: Round, result: &MatchResult, teams: &TeamRegistry) -> Result<()> {
        let team1 = &teams.get(result.team1)?.code;
        let team2 = &teams.get(result.team2)?.code;
        match result.forfeited_team() {
            Some(id) => info!(%round, %team1, %team2, forfeited = %teams.get(id)?.code, "forfeit"),
            None => info!(
                %round,
                %team1,
                %team2,
                score1 = result.team1_score,
                score2 = result.team2_score,
                "result"
            ),
        }
        Ok(())
    }

    fn group_standings(&mut self, standings: &GroupStandings, teams: &TeamRegistry) -> Result<()> {
        for row in &standings.rows {
            info!(
                group = %standings.group,
                rank = row.rank,
                team = %teams.get(row.team)?.code,
                points = row.points,
                difference = row.difference,
                "standing"
            );
        }
        Ok(())
    }

    fn medals(&mut self, medals: &MedalTable, teams: &TeamRegistry) -> Result<()> {
        info!(
            gold = %teams.get(medals.gold)?.name,
            silver = %teams.get(medals.silver)?.name,
            bronze = %teams.get(medals.bronze)?.name,
            "medal table"
        );
        Ok(())
    }
}

/// Plain-text tournament report.
pub struct TextReport<W: Write> {
    out: W,
    round: Option<Round>,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        TextReport { out, round: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a round heading the first time an elimination round shows up.
    fn enter_round(&mut self, round: Round) -> Result<()> {
        if round != Round::GroupStage && self.round != Some(round) {
            writeln!(self.out, "\n{round}:")?;
        }
        self.round = Some(round);
        Ok(())
    }
}

impl<W: Write> ResultSink for TextReport<W> {
    fn group_started(&mut self, group: &str) -> Result<()> {
        self.round = Some(Round::GroupStage);
        writeln!(self.out, "\nGroup {group}:")?;
        Ok(())
    }

    fn match_played(&mut self, round: Round, result: &MatchResult, teams: &TeamRegistry) -> Result<()> {
        self.enter_round(round)?;
        let team1 = &teams.get(result.team1)?.name;
        let team2 = &teams.get(result.team2)?.name;
        match result.forfeited_team() {
            Some(id) => writeln!(self.out, "{team1} vs {team2}: {} forfeited", teams.get(id)?.name)?,
            None => writeln!(
                self.out,
                "{team1} - {team2} ({}:{})",
                result.team1_score, result.team2_score
            )?,
        }
        Ok(())
    }

    fn pairings(&mut self, round: Round, pairings: &[Pairing], teams: &TeamRegistry) -> Result<()> {
        self.enter_round(round)?;
        for pairing in pairings {
            writeln!(
                self.out,
                "Pair: {} vs {}",
                teams.get(pairing.team1())?.name,
                teams.get(pairing.team2())?.name
            )?;
        }
        Ok(())
    }

    fn group_standings(&mut self, standings: &GroupStandings, teams: &TeamRegistry) -> Result<()> {
        writeln!(
            self.out,
            "\nGroup {} (Name - wins/losses/group-points/points scored/points conceded/point difference):",
            standings.group
        )?;
        for row in &standings.rows {
            writeln!(
                self.out,
                "{}. {} {} / {} / {} / {} / {} / {}",
                row.rank,
                teams.get(row.team)?.name,
                row.wins,
                row.losses,
                row.points,
                row.scored,
                row.conceded,
                row.difference
            )?;
        }
        for tie in &standings.unresolved_ties {
            let names = tie
                .iter()
                .map(|&id| teams.get(id).map(|team| team.name.as_str()))
                .collect::<Result<Vec<_>>>()?;
            writeln!(self.out, "Unresolved tie: {}", names.join(", "))?;
        }
        Ok(())
    }

    fn medals(&mut self, medals: &MedalTable, teams: &TeamRegistry) -> Result<()> {
        writeln!(self.out, "\nMedals:")?;
        writeln!(self.out, "Gold: {}", teams.get(medals.gold)?.name)?;
        writeln!(self.out, "Silver: {}", teams.get(medals.silver)?.name)?;
        writeln!(self.out, "Bronze: {}", teams.get(medals.bronze)?.name)?;
        Ok(())
    }
}
