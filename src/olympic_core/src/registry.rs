use std::collections::HashMap;

use crate::error::{Result, TournamentError};
use crate::team::{Team, TeamId, TeamSeed};

/// Owns the single mutable [`Team`] record per country code.
///
/// Every other component refers to teams by [`TeamId`] and borrows the record
/// from here when it needs to read or update it.
#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    by_code: HashMap<String, TeamId>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        TeamRegistry::default()
    }

    /// Register a team. A country code may only be registered once.
    pub fn insert(&mut self, seed: TeamSeed) -> Result<TeamId> {
        if self.by_code.contains_key(&seed.code) {
            return Err(TournamentError::DuplicateTeam(seed.code));
        }
        let id = TeamId(self.teams.len());
        self.by_code.insert(seed.code.clone(), id);
        self.teams.push(Team::new(id, seed));
        Ok(id)
    }

    pub fn get(&self, id: TeamId) -> Result<&Team> {
        self.teams.get(id.0).ok_or(TournamentError::MissingTeam(id))
    }

    pub fn get_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams.get_mut(id.0).ok_or(TournamentError::MissingTeam(id))
    }

    pub fn id_of(&self, code: &str) -> Result<TeamId> {
        self.by_code
            .get(code)
            .copied()
            .ok_or_else(|| TournamentError::UnknownTeam(code.to_string()))
    }

    pub fn by_code(&self, code: &str) -> Result<&Team> {
        self.get(self.id_of(code)?)
    }

    pub fn contains(&self, id: TeamId) -> bool {
        id.0 < self.teams.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn reset_statistics(&mut self) {
        for team in &mut self.teams {
            team.reset_statistics();
        }
    }
}
