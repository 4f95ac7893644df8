//! Battle Palace move-selection odds.
//!
//! In the Palace the player gives no orders: each turn the AI picks a move
//! category (attack, defense, support) with weights set by the nature, then
//! a move of that category. When the chosen category has no move, its weight
//! falls through to a random move of a surviving category or to no move at
//! all. This module reproduces those odds for both HP tiers.

use crate::data::move_classes::{MoveCategory, MoveClassTable};
use crate::data::natures::{NatureTable, NatureWeightProfile};
use crate::data::PalaceTables;
use crate::error::PalaceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

pub const MOVE_SLOTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HpTier {
    AboveHalf,
    AtOrBelowHalf,
}

impl HpTier {
    pub fn from_hp(hp: i32, max_hp: i32) -> Self {
        if i64::from(hp) * 2 > i64::from(max_hp) {
            HpTier::AboveHalf
        } else {
            HpTier::AtOrBelowHalf
        }
    }
}

/// Category weights of one nature at one HP tier.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TierWeights {
    atk: f64,
    def: f64,
    spt: f64,
}

impl TierWeights {
    fn of(profile: &NatureWeightProfile, tier: HpTier) -> Self {
        match tier {
            HpTier::AboveHalf => Self {
                atk: profile.atk,
                def: profile.def,
                spt: profile.spt,
            },
            HpTier::AtOrBelowHalf => Self {
                atk: profile.atk50,
                def: profile.def50,
                spt: profile.spt50,
            },
        }
    }
}

/// The six outcome probabilities for one HP tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TierProbabilities {
    pub ai_atk: f64,
    pub ai_def: f64,
    pub ai_spt: f64,
    pub r_atk: f64,
    pub r_def: f64,
    pub r_nomove: f64,
}

impl TierProbabilities {
    pub fn total(&self) -> f64 {
        self.ai_atk + self.ai_def + self.ai_spt + self.r_atk + self.r_def + self.r_nomove
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub atk: usize,
    pub def: usize,
    pub spt: usize,
}

impl CategoryCounts {
    fn tally(categories: &[MoveCategory]) -> Self {
        let mut counts = Self::default();
        for category in categories {
            match category {
                MoveCategory::Atk => counts.atk += 1,
                MoveCategory::Def => counts.def += 1,
                MoveCategory::Spt => counts.spt += 1,
                MoveCategory::Na => {}
            }
        }
        counts
    }

    /// Bitmask of present categories: ATK = 1, DEF = 2, SPT = 4.
    fn present_mask(&self) -> usize {
        usize::from(self.atk > 0) | usize::from(self.def > 0) << 1 | usize::from(self.spt > 0) << 2
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    pub above_half: TierProbabilities,
    pub at_or_below_half: TierProbabilities,
    /// Category of each slot, in the caller's slot order.
    pub categories: [MoveCategory; MOVE_SLOTS],
    pub atk_count: usize,
    pub def_count: usize,
    pub spt_count: usize,
}

impl ProbabilityResult {
    pub fn tier(&self, tier: HpTier) -> &TierProbabilities {
        match tier {
            HpTier::AboveHalf => &self.above_half,
            HpTier::AtOrBelowHalf => &self.at_or_below_half,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            atk: self.atk_count,
            def: self.def_count,
            spt: self.spt_count,
        }
    }
}

/// Where the weight of absent categories goes, keyed by which categories
/// are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Redistribution {
    /// No category present; every outcome is zero.
    Nothing,
    OnlyAtk,
    OnlyDef,
    /// ATK and DEF present: the SPT weight goes to whichever has more moves.
    AtkDefByCount,
    /// Support-only sets never fall back to a random move.
    OnlySpt,
    /// ATK and SPT present: ATK takes the DEF weight without a count check.
    AtkOverSpt,
    /// DEF and SPT present: DEF takes the ATK weight without a count check.
    DefOverSpt,
    All,
}

const REDISTRIBUTION: [Redistribution; 8] = [
    Redistribution::Nothing,       // 0b000
    Redistribution::OnlyAtk,       // 0b001
    Redistribution::OnlyDef,       // 0b010
    Redistribution::AtkDefByCount, // 0b011
    Redistribution::OnlySpt,       // 0b100
    Redistribution::AtkOverSpt,    // 0b101
    Redistribution::DefOverSpt,    // 0b110
    Redistribution::All,           // 0b111
];

impl Redistribution {
    fn for_counts(counts: &CategoryCounts) -> Self {
        REDISTRIBUTION[counts.present_mask()]
    }

    /// Returns `(r_atk, r_def, r_nomove)`.
    fn fallback(self, w: TierWeights, counts: &CategoryCounts) -> (f64, f64, f64) {
        match self {
            Redistribution::Nothing | Redistribution::All => (0.0, 0.0, 0.0),
            Redistribution::AtkDefByCount => match counts.atk.cmp(&counts.def) {
                Ordering::Greater => (w.spt * 0.5, 0.0, w.spt * 0.5),
                Ordering::Less => (0.0, w.spt * 0.5, w.spt * 0.5),
                Ordering::Equal => (w.spt * 0.25, w.spt * 0.25, w.spt * 0.5),
            },
            Redistribution::AtkOverSpt => (w.def * 0.5, 0.0, w.def * 0.5),
            Redistribution::DefOverSpt => (0.0, w.atk * 0.5, w.atk * 0.5),
            Redistribution::OnlyAtk => {
                let half = w.def * 0.5 + w.spt * 0.5;
                (half, 0.0, half)
            }
            Redistribution::OnlyDef => {
                let half = w.atk * 0.5 + w.spt * 0.5;
                (0.0, half, half)
            }
            Redistribution::OnlySpt => (0.0, 0.0, w.atk + w.def),
        }
    }
}

fn tier_probabilities(
    rule: Redistribution,
    weights: TierWeights,
    counts: &CategoryCounts,
) -> TierProbabilities {
    let gate = |count: usize, weight: f64| if count > 0 { weight } else { 0.0 };
    let (r_atk, r_def, r_nomove) = rule.fallback(weights, counts);
    TierProbabilities {
        ai_atk: gate(counts.atk, weights.atk),
        ai_def: gate(counts.def, weights.def),
        ai_spt: gate(counts.spt, weights.spt),
        r_atk,
        r_def,
        r_nomove,
    }
}

/// Computes Palace odds against a nature table and a move-class table.
#[derive(Clone, Copy, Debug)]
pub struct PalaceEngine<'a> {
    natures: &'a NatureTable,
    moves: &'a MoveClassTable,
}

impl<'a> PalaceEngine<'a> {
    pub fn new(natures: &'a NatureTable, moves: &'a MoveClassTable) -> Self {
        Self { natures, moves }
    }

    pub fn from_tables(tables: &'a PalaceTables) -> Self {
        Self::new(&tables.natures, &tables.moves)
    }

    /// Classifies up to four move slots. Missing slots are `NA`; anything
    /// past the fourth slot is ignored.
    pub fn classify_moves<S: AsRef<str>>(&self, moves: &[S]) -> [MoveCategory; MOVE_SLOTS] {
        let mut categories = [MoveCategory::Na; MOVE_SLOTS];
        for (slot, name) in categories.iter_mut().zip(moves) {
            *slot = self.moves.classify(name.as_ref());
        }
        categories
    }

    /// Odds for `nature` (exact, case-sensitive key) and a four-slot move set.
    pub fn compute_probabilities<S: AsRef<str>>(
        &self,
        nature: &str,
        moves: &[S],
    ) -> Result<ProbabilityResult, PalaceError> {
        let profile = self
            .natures
            .get(nature)
            .ok_or_else(|| PalaceError::UnknownNature(nature.to_string()))?;

        let categories = self.classify_moves(moves);
        let counts = CategoryCounts::tally(&categories);
        let rule = Redistribution::for_counts(&counts);
        debug!(nature, ?categories, ?rule, "palace odds");

        Ok(ProbabilityResult {
            above_half: tier_probabilities(rule, TierWeights::of(profile, HpTier::AboveHalf), &counts),
            at_or_below_half: tier_probabilities(
                rule,
                TierWeights::of(profile, HpTier::AtOrBelowHalf),
                &counts,
            ),
            categories,
            atk_count: counts.atk,
            def_count: counts.def,
            spt_count: counts.spt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_indexes_rule_table() {
        let counts = |atk, def, spt| CategoryCounts { atk, def, spt };
        assert_eq!(Redistribution::for_counts(&counts(0, 0, 0)), Redistribution::Nothing);
        assert_eq!(Redistribution::for_counts(&counts(2, 2, 0)), Redistribution::AtkDefByCount);
        assert_eq!(Redistribution::for_counts(&counts(3, 0, 1)), Redistribution::AtkOverSpt);
        assert_eq!(Redistribution::for_counts(&counts(0, 1, 3)), Redistribution::DefOverSpt);
        assert_eq!(Redistribution::for_counts(&counts(0, 0, 4)), Redistribution::OnlySpt);
        assert_eq!(Redistribution::for_counts(&counts(1, 1, 1)), Redistribution::All);
    }

    #[test]
    fn atk_over_spt_ignores_counts() {
        let w = TierWeights {
            atk: 0.2,
            def: 0.4,
            spt: 0.4,
        };
        let few_atk = CategoryCounts { atk: 1, def: 0, spt: 3 };
        let many_atk = CategoryCounts { atk: 3, def: 0, spt: 1 };
        assert_eq!(
            Redistribution::AtkOverSpt.fallback(w, &few_atk),
            Redistribution::AtkOverSpt.fallback(w, &many_atk)
        );
    }

    #[test]
    fn hp_tier_boundary_is_inclusive_at_half() {
        assert_eq!(HpTier::from_hp(51, 100), HpTier::AboveHalf);
        assert_eq!(HpTier::from_hp(50, 100), HpTier::AtOrBelowHalf);
        assert_eq!(HpTier::from_hp(100, 201), HpTier::AtOrBelowHalf);
        assert_eq!(HpTier::from_hp(0, 100), HpTier::AtOrBelowHalf);
        assert_eq!(HpTier::from_hp(i32::MAX, i32::MAX), HpTier::AboveHalf);
        assert_eq!(HpTier::from_hp(i32::MAX / 2, i32::MAX), HpTier::AtOrBelowHalf);
    }
}
