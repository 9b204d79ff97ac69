use thiserror::Error;

use crate::team::TeamId;

pub type Result<T> = std::result::Result<T, TournamentError>;

/// Every fatal condition of a tournament run.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Exhibition result is not of the form `<int>-<int>`
    #[error("malformed exhibition result: {result:?}")]
    MalformedResult { result: String },

    #[error("unknown team code: {0}")]
    UnknownTeam(String),

    #[error("team id {0} is not registered")]
    MissingTeam(TeamId),

    #[error("team {0} is seeded more than once")]
    DuplicateTeam(String),

    #[error("team id {0} cannot play itself")]
    SameTeam(TeamId),

    #[error("completed match cannot end level at {score}")]
    DrawnMatch { score: i32 },

    #[error("expected {expected} teams for the quarterfinal draw, found {found}")]
    QualifiedCount { expected: usize, found: usize },

    #[error("expected 4 quarterfinal pairings, found {0}")]
    QuarterfinalCount(usize),

    #[error("team {0} appears in more than one pairing of a round")]
    DuplicatePairing(String),

    #[error("team {0} cannot win two medals")]
    DuplicateMedal(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
