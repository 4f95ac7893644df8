use crate::data::species::Stat;
use crate::data::{unwrap_table, yaml_to_json};
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Battle Palace category weights for one nature.
///
/// `atk`/`def`/`spt` apply while HP is above half, the `*50` triple once HP
/// is at or below half. Each triple sums to the same constant (1.0 in the
/// shipped table).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NatureWeightProfile {
    pub atk: f64,
    pub def: f64,
    pub spt: f64,
    pub atk50: f64,
    pub def50: f64,
    pub spt50: f64,
}

impl NatureWeightProfile {
    fn is_valid(&self) -> bool {
        [self.atk, self.def, self.spt, self.atk50, self.def50, self.spt50]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NatureTable {
    natures: HashMap<String, NatureWeightProfile>,
}

impl NatureTable {
    pub fn new() -> Self {
        Self {
            natures: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, profile: NatureWeightProfile) {
        self.natures.insert(name.into(), profile);
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&NatureWeightProfile> {
        self.natures.get(name)
    }

    /// Finds the table key equal to `name` ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some((key, _)) = self.natures.get_key_value(name) {
            return Some(key.as_str());
        }
        self.natures
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Nature names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.natures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn as_map(&self) -> &HashMap<String, NatureWeightProfile> {
        &self.natures
    }

    fn from_value(value: Value) -> Result<Self, DataError> {
        let map: HashMap<String, NatureWeightProfile> =
            serde_json::from_value(unwrap_table(value, "natures"))?;
        let mut table = Self::new();
        for (name, profile) in map {
            if !profile.is_valid() {
                warn!(nature = %name, "rejecting nature row with invalid weights");
                return Err(DataError::InvalidWeights { nature: name });
            }
            table.insert(name, profile);
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

    pub fn load_default() -> Result<Self, DataError> {
        const DEFAULT_NATURES_JSON: &str = include_str!("../../data/natures.json");
        Self::load_from_json_str(DEFAULT_NATURES_JSON)
    }
}

/// Raised and lowered stat for each of the 25 natures. Neutral natures
/// (Hardy, Docile, Serious, Bashful, Quirky) are absent.
const NATURE_STAT_EFFECTS: &[(&str, Stat, Stat)] = &[
    ("Lonely", Stat::Atk, Stat::Def),
    ("Brave", Stat::Atk, Stat::Spe),
    ("Adamant", Stat::Atk, Stat::SpA),
    ("Naughty", Stat::Atk, Stat::SpD),
    ("Bold", Stat::Def, Stat::Atk),
    ("Relaxed", Stat::Def, Stat::Spe),
    ("Impish", Stat::Def, Stat::SpA),
    ("Lax", Stat::Def, Stat::SpD),
    ("Timid", Stat::Spe, Stat::Atk),
    ("Hasty", Stat::Spe, Stat::Def),
    ("Jolly", Stat::Spe, Stat::SpA),
    ("Naive", Stat::Spe, Stat::SpD),
    ("Modest", Stat::SpA, Stat::Atk),
    ("Mild", Stat::SpA, Stat::Def),
    ("Quiet", Stat::SpA, Stat::Spe),
    ("Rash", Stat::SpA, Stat::SpD),
    ("Calm", Stat::SpD, Stat::Atk),
    ("Gentle", Stat::SpD, Stat::Def),
    ("Sassy", Stat::SpD, Stat::Spe),
    ("Careful", Stat::SpD, Stat::SpA),
];

/// Stat multiplier a nature applies: 1.1 raised, 0.9 lowered, 1.0 otherwise.
/// Unknown names and HP are always neutral.
pub fn stat_modifier(nature: &str, stat: Stat) -> f64 {
    match NATURE_STAT_EFFECTS.iter().find(|(name, _, _)| *name == nature) {
        Some((_, up, _)) if *up == stat => 1.1,
        Some((_, _, down)) if *down == stat => 0.9,
        _ => 1.0,
    }
}
