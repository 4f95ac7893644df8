use crate::ai::palace::{PalaceEngine, ProbabilityResult};
use crate::core::alarms::{alarm_labels, is_alarming};
use crate::core::set_parser::parse_set;
use crate::core::stats::StatCalculator;
use crate::data::move_classes::MoveCategory;
use crate::data::species::Stat;
use crate::data::PalaceTables;
use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

static TABLES: Lazy<PalaceTables> =
    Lazy::new(|| PalaceTables::load_default().unwrap_or_default());

/// Flat shape the page scripts read: `*50` fields are the at-or-below-half
/// tier, `cats` uses `null` for unclassified slots.
#[derive(Clone, Debug, Serialize)]
struct ProbabilityWire {
    ai_atk: f64,
    ai_def: f64,
    ai_spt: f64,
    ai_atk50: f64,
    ai_def50: f64,
    ai_spt50: f64,
    r_atk: f64,
    r_def: f64,
    r_nomove: f64,
    r_atk50: f64,
    r_def50: f64,
    r_nomove50: f64,
    cats: Vec<Option<String>>,
    atk_count: usize,
    def_count: usize,
    spt_count: usize,
}

impl From<ProbabilityResult> for ProbabilityWire {
    fn from(result: ProbabilityResult) -> Self {
        let high = result.above_half;
        let low = result.at_or_below_half;
        Self {
            ai_atk: high.ai_atk,
            ai_def: high.ai_def,
            ai_spt: high.ai_spt,
            ai_atk50: low.ai_atk,
            ai_def50: low.ai_def,
            ai_spt50: low.ai_spt,
            r_atk: high.r_atk,
            r_def: high.r_def,
            r_nomove: high.r_nomove,
            r_atk50: low.r_atk,
            r_def50: low.r_def,
            r_nomove50: low.r_nomove,
            cats: result
                .categories
                .iter()
                .map(|c| match c {
                    MoveCategory::Na => None,
                    other => Some(other.as_str().to_string()),
                })
                .collect(),
            atk_count: result.atk_count,
            def_count: result.def_count,
            spt_count: result.spt_count,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct ParsedSetWire {
    species: String,
    item: String,
    nature: String,
    moves: Vec<String>,
    #[serde(rename = "spdEV")]
    spd_ev: i32,
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn string_list(value: JsValue) -> Result<Vec<String>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_err)
}

#[wasm_bindgen(js_name = computeProbabilities)]
pub fn compute_probabilities_wasm(nature: String, moves: JsValue) -> Result<JsValue, JsValue> {
    let moves = string_list(moves)?;
    let engine = PalaceEngine::from_tables(&TABLES);
    match engine.compute_probabilities(nature.as_str(), &moves) {
        Ok(result) => serde_wasm_bindgen::to_value(&ProbabilityWire::from(result)).map_err(js_err),
        Err(_) => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = computeSpeed)]
pub fn compute_speed_wasm(species: String, nature: String, spd_ev: i32, level: i32) -> Option<i32> {
    StatCalculator::new(&TABLES.species)
        .compute_speed(species.as_str(), nature.as_str(), spd_ev, level)
        .ok()
}

#[wasm_bindgen(js_name = computeStat)]
pub fn compute_stat_wasm(
    species: String,
    nature: String,
    stat: String,
    ev: i32,
    level: i32,
) -> Result<Option<i32>, JsValue> {
    let stat = Stat::from_abbreviation(stat.as_str())
        .ok_or_else(|| js_err(format!("Unknown stat: {}", stat)))?;
    Ok(StatCalculator::new(&TABLES.species)
        .compute_stat(species.as_str(), nature.as_str(), stat, ev, level)
        .ok())
}

#[wasm_bindgen(js_name = parseSet)]
pub fn parse_set_wasm(text: String) -> Result<JsValue, JsValue> {
    let Ok(set) = parse_set(text.as_str()) else {
        return Ok(JsValue::NULL);
    };
    let wire = ParsedSetWire {
        species: set.species,
        item: set.item,
        nature: set.nature,
        moves: set.moves.to_vec(),
        spd_ev: set.speed_ev,
    };
    serde_wasm_bindgen::to_value(&wire).map_err(js_err)
}

#[wasm_bindgen(js_name = resolveNature)]
pub fn resolve_nature_wasm(name: String) -> Option<String> {
    TABLES.natures.resolve(name.as_str()).map(str::to_string)
}

#[wasm_bindgen(js_name = isAlarming)]
pub fn is_alarming_wasm(moves: JsValue, item: String) -> Result<bool, JsValue> {
    let moves = string_list(moves)?;
    Ok(is_alarming(&moves, item.as_str()))
}

#[wasm_bindgen(js_name = alarmLabels)]
pub fn alarm_labels_wasm(moves: JsValue, item: String) -> Result<JsValue, JsValue> {
    let moves = string_list(moves)?;
    let labels: Vec<&str> = alarm_labels(&moves, item.as_str())
        .iter()
        .map(|label| label.as_str())
        .collect();
    serde_wasm_bindgen::to_value(&labels).map_err(js_err)
}
