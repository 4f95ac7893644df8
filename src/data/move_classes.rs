use crate::data::{unwrap_table, yaml_to_json};
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Battle Palace move category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveCategory {
    Atk,
    Def,
    Spt,
    #[default]
    Na,
}

impl MoveCategory {
    /// Normalizes a raw table label.
    ///
    /// Spreadsheet exports carry blanks, `nan`, `#N/A` and `---` for
    /// unclassified moves, and some labels carry extra text around the
    /// category ("ATK (physical)").
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || matches!(label, "nan" | "#N/A" | "---") {
            return MoveCategory::Na;
        }
        let upper = label.to_ascii_uppercase();
        if upper.contains("ATK") {
            MoveCategory::Atk
        } else if upper.contains("DEF") {
            MoveCategory::Def
        } else if upper.contains("SPT") {
            MoveCategory::Spt
        } else {
            MoveCategory::Na
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Atk => "ATK",
            MoveCategory::Def => "DEF",
            MoveCategory::Spt => "SPT",
            MoveCategory::Na => "NA",
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder the presentation layer uses for an empty slot.
pub const EMPTY_SLOT: &str = "---";

/// Move name to Palace category.
#[derive(Clone, Debug, Default)]
pub struct MoveClassTable {
    moves: HashMap<String, MoveCategory>,
}

impl MoveClassTable {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, category: MoveCategory) {
        self.moves.insert(name.into(), category);
    }

    pub fn get(&self, name: &str) -> Option<MoveCategory> {
        self.moves.get(name).copied()
    }

    /// Category of one move slot. Empty slots, the `---` placeholder and
    /// names missing from the table are `NA`.
    pub fn classify(&self, name: &str) -> MoveCategory {
        if name.is_empty() || name == EMPTY_SLOT {
            return MoveCategory::Na;
        }
        self.get(name).unwrap_or(MoveCategory::Na)
    }

    /// Move names in alphabetical order, for autocomplete lists.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.moves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn as_map(&self) -> &HashMap<String, MoveCategory> {
        &self.moves
    }

    fn from_value(value: Value) -> Result<Self, DataError> {
        let map: HashMap<String, Option<String>> =
            serde_json::from_value(unwrap_table(value, "moves"))?;
        let mut table = Self::new();
        for (name, label) in map {
            table.insert(name, MoveCategory::from_label(label.as_deref().unwrap_or("")));
        }
        Ok(table)
    }

    pub fn load_from_json_str(json: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(yaml_to_json(yaml_value))
    }

    /// Reads a two-column `move,class` sheet with a header row.
    pub fn load_from_csv_str(text: &str) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut table = Self::new();
        for result in rdr.records() {
            let record = result?;
            let name = record.get(0).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }
            table.insert(name, MoveCategory::from_label(record.get(1).unwrap_or("")));
        }
        Ok(table)
    }

    pub fn load_default() -> Result<Self, DataError> {
        const DEFAULT_MOVE_CLASSES_JSON: &str = include_str!("../../data/move_classes.json");
        Self::load_from_json_str(DEFAULT_MOVE_CLASSES_JSON)
    }
}
