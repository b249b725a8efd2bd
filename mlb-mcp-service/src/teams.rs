//! Static team reference table.
//!
//! Maps team names, abbreviations and common short names to MLB team ids.
//! The table ships inside the binary and can be replaced by a JSON file
//! named in configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ServiceError, ServiceResult};

const BUILTIN_TEAMS: &str = include_str!("../data/teams.json");

/// One row of the team table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TeamEntry {
    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.abbreviation.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }
}

/// A name that resolved to a team id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMatch {
    pub name: String,
    pub id: u32,
}

/// Read-only lookup from team names to ids
#[derive(Debug, Clone)]
pub struct TeamTable {
    entries: Vec<TeamEntry>,
    /// Lower-cased name, abbreviation or alias to index into `entries`
    by_key: HashMap<String, usize>,
}

impl TeamTable {
    /// Table compiled into the binary
    pub fn builtin() -> ServiceResult<Self> {
        Self::from_json(BUILTIN_TEAMS)
    }

    /// Load from a JSON file, or the built-in table when no path is given
    pub fn load(path: Option<&Path>) -> ServiceResult<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Self::from_json(&json)
            }
            None => Self::builtin(),
        }
    }

    pub fn from_json(json: &str) -> ServiceResult<Self> {
        let entries: Vec<TeamEntry> =
            serde_json::from_str(json).map_err(|e| ServiceError::TeamTable {
                message: format!("Invalid team table: {}", e),
            })?;
        Self::new(entries)
    }

    /// Build and validate: ids are unique and every key names one team
    pub fn new(entries: Vec<TeamEntry>) -> ServiceResult<Self> {
        let mut ids = HashMap::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if let Some(previous) = ids.insert(entry.id, index) {
                return Err(ServiceError::TeamTable {
                    message: format!(
                        "Duplicate team id {} ({} and {})",
                        entry.id, entries[previous].name, entry.name
                    ),
                });
            }

            for key in entry.keys() {
                let key = key.trim().to_lowercase();
                if key.is_empty() {
                    return Err(ServiceError::TeamTable {
                        message: format!("Empty name for team id {}", entry.id),
                    });
                }
                match by_key.get(&key) {
                    Some(&other) if other != index => {
                        return Err(ServiceError::TeamTable {
                            message: format!(
                                "Name '{}' maps to both {} and {}",
                                key, entries[other].id, entry.id
                            ),
                        });
                    }
                    _ => {
                        by_key.insert(key, index);
                    }
                }
            }
        }

        Ok(Self { entries, by_key })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: u32) -> Option<&TeamEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Exact (case-insensitive) match on name, abbreviation or alias
    pub fn id_for(&self, name: &str) -> Option<u32> {
        self.by_key
            .get(&name.trim().to_lowercase())
            .map(|&index| self.entries[index].id)
    }

    /// Exact match if there is one, otherwise every team with a key
    /// containing `query`
    pub fn search(&self, query: &str) -> Vec<TeamMatch> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        if let Some(entry) = self.id_for(&needle).and_then(|id| self.get(id)) {
            return vec![TeamMatch {
                name: entry.name.clone(),
                id: entry.id,
            }];
        }

        self.entries
            .iter()
            .filter(|entry| entry.keys().any(|k| k.to_lowercase().contains(&needle)))
            .map(|entry| TeamMatch {
                name: entry.name.clone(),
                id: entry.id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_builtin_table_is_consistent() {
        let table = TeamTable::builtin().unwrap();
        assert_eq!(table.len(), 30);

        let ids: HashSet<u32> = table.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), table.len());

        for entry in &table.entries {
            for key in entry.keys() {
                assert_eq!(table.id_for(key), Some(entry.id), "key {key}");
            }
        }
    }

    #[test]
    fn test_lookup_by_name_abbreviation_alias() {
        let table = TeamTable::builtin().unwrap();
        assert_eq!(table.id_for("Los Angeles Dodgers"), Some(119));
        assert_eq!(table.id_for("lad"), Some(119));
        assert_eq!(table.id_for("  Dodgers "), Some(119));
        assert_eq!(table.id_for("Oakland Athletics"), Some(133));
        assert_eq!(table.id_for("Nowhere Nine"), None);
        assert_eq!(table.get(143).map(|e| e.abbreviation.as_str()), Some("PHI"));
    }

    #[test]
    fn test_search_partial() {
        let table = TeamTable::builtin().unwrap();

        let exact = table.search("Mets");
        assert_eq!(exact, vec![TeamMatch { name: "New York Mets".to_string(), id: 121 }]);

        let new_york: Vec<u32> = table.search("new york").iter().map(|m| m.id).collect();
        assert_eq!(new_york.len(), 2);
        assert!(new_york.contains(&121));
        assert!(new_york.contains(&147));

        assert!(table.search("").is_empty());
        assert!(table.search("cricket").is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "abbreviation": "AA"},
            {"id": 1, "name": "B", "abbreviation": "BB"}
        ]"#;
        let err = TeamTable::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate team id 1"));
    }

    #[test]
    fn test_ambiguous_name_rejected() {
        let json = r#"[
            {"id": 1, "name": "Sox", "abbreviation": "AA"},
            {"id": 2, "name": "B", "abbreviation": "BB", "aliases": ["sox"]}
        ]"#;
        assert!(TeamTable::from_json(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 999, "name": "Test Club", "abbreviation": "TST", "aliases": ["Testers"]}}]"#
        )
        .unwrap();

        let table = TeamTable::load(Some(file.path())).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.id_for("testers"), Some(999));

        let missing = TeamTable::load(Some(Path::new("/nonexistent/teams.json")));
        assert!(matches!(missing, Err(ServiceError::Io(_))));
    }
}
