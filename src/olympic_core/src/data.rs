use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::exhibition::Exhibition;
use crate::team::TeamSeed;

/// Group tables keyed by group name, iterated in name order.
pub type GroupSeeds = BTreeMap<String, Vec<TeamSeed>>;

/// Exhibition history keyed by country code.
pub type ExhibitionMap = HashMap<String, Vec<Exhibition>>;

/// Where group and exhibition data come from.
pub trait DataSource {
    fn groups(&self) -> Result<GroupSeeds>;
    fn exhibitions(&self) -> Result<ExhibitionMap>;
}

/// The two JSON data files.
///
/// Groups: `{"A": [{"Team": "Kanada", "ISOCode": "CAN", "FIBARanking": 7}, ..], ..}`
/// Exhibitions: `{"CAN": [{"Date": "06/07/24", "Opponent": "GER", "Result": "92-80"}, ..], ..}`
#[derive(Clone, Debug)]
pub struct JsonFiles {
    pub groups: PathBuf,
    pub exhibitions: PathBuf,
}

impl JsonFiles {
    pub fn new(groups: impl Into<PathBuf>, exhibitions: impl Into<PathBuf>) -> Self {
        JsonFiles {
            groups: groups.into(),
            exhibitions: exhibitions.into(),
        }
    }
}

impl DataSource for JsonFiles {
    fn groups(&self) -> Result<GroupSeeds> {
        let groups: GroupSeeds = read_json(&self.groups)?;
        debug!(path = %self.groups.display(), groups = groups.len(), "loaded groups");
        Ok(groups)
    }

    fn exhibitions(&self) -> Result<ExhibitionMap> {
        let exhibitions: ExhibitionMap = read_json(&self.exhibitions)?;
        debug!(path = %self.exhibitions.display(), teams = exhibitions.len(), "loaded exhibitions");
        Ok(exhibitions)
    }
}

/// Data already in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    pub groups: GroupSeeds,
    pub exhibitions: ExhibitionMap,
}

impl DataSource for InMemory {
    fn groups(&self) -> Result<GroupSeeds> {
        Ok(self.groups.clone())
    }

    fn exhibitions(&self) -> Result<ExhibitionMap> {
        Ok(self.exhibitions.clone())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TournamentError;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("olympic_core_{}_{name}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_json_files() {
        let groups = write_temp(
            "groups.json",
            r#"{
                "B": [{"Team": "Njemačka", "ISOCode": "GER", "FIBARanking": 3}],
                "A": [{"Team": "Kanada", "ISOCode": "CAN", "FIBARanking": 7},
                      {"Team": "Australija", "ISOCode": "AUS", "FIBARanking": 5}]
            }"#,
        );
        let exhibitions = write_temp(
            "exhibitions.json",
            r#"{"CAN": [{"Date": "06/07/24", "Opponent": "GER", "Result": "92-80"}]}"#,
        );

        let source = JsonFiles::new(&groups, &exhibitions);
        let loaded = source.groups().unwrap();
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(loaded["A"][1], TeamSeed::new("Australija", "AUS", 5));

        let loaded = source.exhibitions().unwrap();
        assert_eq!(loaded["CAN"][0].result, "92-80");

        std::fs::remove_file(groups).ok();
        std::fs::remove_file(exhibitions).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFiles::new("/nonexistent/groups.json", "/nonexistent/ex.json");
        assert!(matches!(source.groups(), Err(TournamentError::Io(_))));
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let path = write_temp("broken.json", "{ not json");
        let source = JsonFiles::new(&path, &path);
        assert!(matches!(source.exhibitions(), Err(TournamentError::Json(_))));
        std::fs::remove_file(path).ok();
    }
}
