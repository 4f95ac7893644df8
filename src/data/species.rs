use crate::data::{unwrap_table, yaml_to_json};
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    #[serde(rename = "spa")]
    SpA,
    #[serde(rename = "spd")]
    SpD,
    Spe,
}

impl Stat {
    /// Parses the abbreviations used in export text (`HP`, `Atk`, `Def`,
    /// `SpA`, `SpD`, `Spe`), ignoring case.
    pub fn from_abbreviation(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "hp" => Some(Stat::Hp),
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::SpA),
            "spd" => Some(Stat::SpD),
            "spe" => Some(Stat::Spe),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpA => self.spa,
            Stat::SpD => self.spd,
            Stat::Spe => self.spe,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(rename = "baseStats")]
    pub base_stats: BaseStats,
}

/// Base-stat table keyed by species display name ("Snorlax").
#[derive(Clone, Debug, Default)]
pub struct SpeciesDatabase {
    species: HashMap<String, SpeciesData>,
}

impl SpeciesDatabase {
    pub fn new() -> Self {
        Self {
            species: HashMap::new(),
        }
    }

    pub fn insert(&mut self, data: SpeciesData) {
        self.species.insert(data.name.clone(), data);
    }

    pub fn get(&self, name: &str) -> Option<&SpeciesData> {
        self.species.get(name)
    }

    pub fn as_map(&self) -> &HashMap<String, SpeciesData> {
        &self.species
    }

    fn from_value(value: Value) -> Result<Self, DataError> {
        let map: HashMap<String, SpeciesData> =
            serde_json::from_value(unwrap_table(value, "species"))?;
        let mut db = Self::new();
        for (_, data) in map {
            db.insert(data);
        }
        Ok(db)
    }

    pub fn load_from_json_str(json: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(yaml_to_json(yaml_value))
    }

    pub fn load_default() -> Result<Self, DataError> {
        const DEFAULT_SPECIES_JSON: &str = include_str!("../../data/species.json");
        Self::load_from_json_str(DEFAULT_SPECIES_JSON)
    }
}
