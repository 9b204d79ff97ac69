use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};

/// One friendly match played before the tournament, from the team's perspective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibition {
    #[serde(rename = "Date")]
    pub date: String,

    /// Country code of the opponent
    #[serde(rename = "Opponent")]
    pub opponent: String,

    /// "<own score>-<opponent score>"
    #[serde(rename = "Result")]
    pub result: String,
}

impl Exhibition {
    pub fn new(date: impl Into<String>, opponent: impl Into<String>, result: impl Into<String>) -> Self {
        Exhibition {
            date: date.into(),
            opponent: opponent.into(),
            result: result.into(),
        }
    }

    /// Parse the result string into (team score, opponent score).
    pub fn scores(&self) -> Result<(u32, u32)> {
        let malformed = || TournamentError::MalformedResult {
            result: self.result.clone(),
        };

        let (own, opponent) = self.result.split_once('-').ok_or_else(malformed)?;
        let own = own.trim().parse::<u32>().map_err(|_| malformed())?;
        let opponent = opponent.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok((own, opponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_parsed() {
        let ex = Exhibition::new("06/07/24", "GER", "92-80");
        assert_eq!(ex.scores().unwrap(), (92, 80));
    }

    #[test]
    fn test_missing_hyphen_is_fatal() {
        let ex = Exhibition::new("06/07/24", "GER", "92:80");
        assert!(matches!(ex.scores(), Err(TournamentError::MalformedResult { .. })));
    }

    #[test]
    fn test_non_numeric_is_fatal() {
        for result in ["ninety-80", "92-", "-80", "92-80-71", ""] {
            let ex = Exhibition::new("06/07/24", "GER", result);
            assert!(ex.scores().is_err(), "{result:?} should not parse");
        }
    }

    #[test]
    fn test_deserializes_data_file_shape() {
        let json = r#"{"Date": "06/07/24", "Opponent": "GER", "Result": "92-80"}"#;
        let ex: Exhibition = serde_json::from_str(json).unwrap();
        assert_eq!(ex.opponent, "GER");
        assert_eq!(ex.scores().unwrap(), (92, 80));
    }
}
