pub mod move_classes;
pub mod natures;
pub mod species;

use crate::error::DataError;
use move_classes::MoveClassTable;
use natures::NatureTable;
use serde_json::Value;
use species::SpeciesDatabase;
use std::path::Path;

/// The three read-only lookup tables every computation reads from.
///
/// Built once at startup and shared by reference afterwards; nothing in the
/// crate writes to a table after construction.
#[derive(Clone, Debug, Default)]
pub struct PalaceTables {
    pub natures: NatureTable,
    pub moves: MoveClassTable,
    pub species: SpeciesDatabase,
}

impl PalaceTables {
    pub fn new(natures: NatureTable, moves: MoveClassTable, species: SpeciesDatabase) -> Self {
        Self {
            natures,
            moves,
            species,
        }
    }

    pub fn load_default() -> Result<Self, DataError> {
        Ok(Self {
            natures: NatureTable::load_default()?,
            moves: MoveClassTable::load_default()?,
            species: SpeciesDatabase::load_default()?,
        })
    }

    /// Loads `natures.json`, `move_classes.json` and `species.json` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DataError> {
        let natures = std::fs::read_to_string(dir.join("natures.json"))?;
        let moves = std::fs::read_to_string(dir.join("move_classes.json"))?;
        let species = std::fs::read_to_string(dir.join("species.json"))?;
        Ok(Self {
            natures: NatureTable::load_from_json_str(&natures)?,
            moves: MoveClassTable::load_from_json_str(&moves)?,
            species: SpeciesDatabase::load_from_json_str(&species)?,
        })
    }
}

/// Accepts both `{ "<key>": { ... } }` and a bare map.
pub(crate) fn unwrap_table(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut obj) => match obj.remove(key) {
            Some(inner) => inner,
            None => Value::Object(obj),
        },
        other => other,
    }
}

/// Convert serde_yaml::Value to serde_json::Value
pub(crate) fn yaml_to_json(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let obj: serde_json::Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        _ => return None,
                    };
                    Some((key, yaml_to_json(v)))
                })
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_table_takes_inner_map() {
        let value = json!({ "natures": { "Hardy": {} } });
        assert_eq!(unwrap_table(value, "natures"), json!({ "Hardy": {} }));
    }

    #[test]
    fn unwrap_table_keeps_bare_map() {
        let value = json!({ "Hardy": {} });
        assert_eq!(unwrap_table(value.clone(), "natures"), value);
    }

    #[test]
    fn yaml_numbers_become_json_numbers() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("a: 1\nb: 0.25\nc: [x]").unwrap();
        assert_eq!(yaml_to_json(yaml), json!({ "a": 1, "b": 0.25, "c": ["x"] }));
    }

    #[test]
    fn default_tables_load() {
        let tables = PalaceTables::load_default().expect("default tables");
        assert_eq!(tables.natures.as_map().len(), 25);
        assert!(tables.species.get("Snorlax").is_some());
        assert!(!tables.moves.as_map().is_empty());
    }

    #[test]
    fn data_dir_matches_embedded_tables() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let from_dir = PalaceTables::load_from_dir(&dir).expect("data dir");
        let embedded = PalaceTables::load_default().expect("default tables");
        assert_eq!(from_dir.natures.as_map(), embedded.natures.as_map());
        assert_eq!(from_dir.moves.as_map(), embedded.moves.as_map());
        assert_eq!(from_dir.species.as_map(), embedded.species.as_map());
    }

    #[test]
    fn missing_data_dir_is_an_io_error() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-data-dir");
        assert!(matches!(
            PalaceTables::load_from_dir(&dir),
            Err(DataError::Io(_))
        ));
    }
}
