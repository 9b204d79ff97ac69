/// Form assigned to every team before exhibitions are processed
pub const DEFAULT_FORM: f64 = 0.5;

/// Share of the form gap added to the stronger side's odds (and taken from the weaker)
pub const FORM_GAP_FACTOR: f64 = 0.1;

/// Forfeit probability per unit of missing odds: P(forfeit) = (1 - odds) * FORFEIT_RATE
pub const FORFEIT_RATE: f64 = 0.005;

/// Inclusive lower bound of the base score draw
pub const BASE_SCORE_MIN: i32 = 70;

/// Exclusive upper bound of the base score draw
pub const BASE_SCORE_MAX: i32 = 100;

/// Scaled scores are clamped into [SCORE_FLOOR, SCORE_CEILING]
pub const SCORE_FLOOR: i32 = 70;
pub const SCORE_CEILING: i32 = 120;

/// Score recorded for the side that forfeited
pub const FORFEIT_SCORE: i32 = -1;

/// Score recorded for the side awarded a forfeit win
pub const FORFEIT_WIN_SCORE: i32 = 0;

/// Tournament points for a played win
pub const POINTS_FOR_WIN: u32 = 2;

/// Tournament points for a played loss
pub const POINTS_FOR_LOSS: u32 = 1;

/// Tournament points for the side that forfeited
pub const POINTS_FOR_FORFEIT: u32 = 0;

/// Number of teams entering the quarterfinal draw
pub const QUALIFIED_TEAMS: usize = 8;

/// Teams per seeding pot (hat)
pub const POT_SIZE: usize = 2;

/// Number of quarterfinal pairings
pub const QUARTERFINALS: usize = 4;
