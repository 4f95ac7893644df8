use crate::data::natures::stat_modifier;
use crate::data::species::{SpeciesDatabase, Stat};
use crate::error::PalaceError;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Individual value assumed for every stat.
pub const MAX_IV: i32 = 31;
pub const MAX_EV: i32 = 252;

/// Clamps an effort value into `0..=252`.
pub fn clamp_effort_value(ev: i32) -> i32 {
    ev.clamp(0, MAX_EV)
}

/// Reads an EV typed by a user: leading integer, clamped. Text that does
/// not start with an integer counts as 0.
pub fn parse_effort_value(text: &str) -> i32 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    match text[..end].parse::<i64>() {
        Ok(value) => value.clamp(0, i64::from(MAX_EV)) as i32,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => MAX_EV,
        Err(_) => 0,
    }
}

/// Stat formula in `i64`; results outside `i32` saturate.
pub fn calc_stat(base: i32, is_hp: bool, level: i32, iv: i32, ev: i32) -> i32 {
    let (base, level, iv, ev) = (i64::from(base), i64::from(level), i64::from(iv), i64::from(ev));
    let scaled = (base * 2 + iv + ev / 4).saturating_mul(level) / 100;
    let value = if is_hp {
        scaled.saturating_add(level + 10)
    } else {
        scaled.saturating_add(5)
    };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Derives stats from the base-stat table.
#[derive(Clone, Copy, Debug)]
pub struct StatCalculator<'a> {
    species: &'a SpeciesDatabase,
}

impl<'a> StatCalculator<'a> {
    pub fn new(species: &'a SpeciesDatabase) -> Self {
        Self { species }
    }

    /// Value of `stat` at `level` with 31 IVs. Unknown natures are neutral;
    /// HP ignores nature entirely.
    pub fn compute_stat(
        &self,
        species: &str,
        nature: &str,
        stat: Stat,
        effort_value: i32,
        level: i32,
    ) -> Result<i32, PalaceError> {
        let data = self
            .species
            .get(species)
            .ok_or_else(|| PalaceError::UnknownSpecies(species.to_string()))?;
        let base = data.base_stats.get(stat);
        let ev = clamp_effort_value(effort_value);
        if stat == Stat::Hp {
            return Ok(calc_stat(base, true, level, MAX_IV, ev));
        }
        let neutral = calc_stat(base, false, level, MAX_IV, ev);
        Ok((f64::from(neutral) * stat_modifier(nature, stat)).floor() as i32)
    }

    pub fn compute_speed(
        &self,
        species: &str,
        nature: &str,
        effort_value: i32,
        level: i32,
    ) -> Result<i32, PalaceError> {
        self.compute_stat(species, nature, Stat::Spe, effort_value, level)
    }

    /// Speed at the two levels Palace facilities use.
    pub fn speed_at_standard_levels(
        &self,
        species: &str,
        nature: &str,
        effort_value: i32,
    ) -> Result<SpeedSummary, PalaceError> {
        Ok(SpeedSummary {
            level50: self.compute_speed(species, nature, effort_value, 50)?,
            level100: self.compute_speed(species, nature, effort_value, 100)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedSummary {
    pub level50: i32,
    pub level100: i32,
}
