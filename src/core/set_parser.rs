//! Reader for the community set export format:
//!
//! ```text
//! Snorlax @ Leftovers
//! Ability: Immunity
//! Level: 50
//! EVs: 36 HP / 220 Def / 252 Spe
//! Brave Nature
//! - Body Slam
//! - Amnesia
//! - Curse
//! - Rest
//! ```
//!
//! The first line names the species and optional item. Every later line is
//! offered to a short list of classifiers; the first one that recognizes the
//! line wins and lines nobody recognizes are skipped.

use crate::ai::palace::MOVE_SLOTS;
use crate::data::species::Stat;
use crate::error::PalaceError;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSet {
    pub species: String,
    pub item: String,
    /// As written, not checked against the nature table.
    pub nature: String,
    /// Always four slots; missing moves are empty strings.
    pub moves: [String; MOVE_SLOTS],
    pub speed_ev: i32,
}

#[derive(Debug, PartialEq, Eq)]
enum SetLine<'a> {
    Nature(&'a str),
    /// `None` when the EV line has no speed entry.
    Evs(Option<i32>),
    Move(String),
}

type LineClassifier = for<'a> fn(&'a str) -> Option<SetLine<'a>>;

const LINE_CLASSIFIERS: &[LineClassifier] = &[nature_line, evs_line, move_line];

/// `<Word> Nature`, keyword in any case.
fn nature_line(line: &str) -> Option<SetLine<'_>> {
    let (word, keyword) = line.split_once(char::is_whitespace)?;
    let is_word = !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (is_word && keyword.trim_start().eq_ignore_ascii_case("nature")).then_some(SetLine::Nature(word))
}

/// `EVs: 252 HP / 4 Def / 252 Spe`. The last speed entry wins.
fn evs_line(line: &str) -> Option<SetLine<'_>> {
    let prefix = line.get(..4)?;
    if !prefix.eq_ignore_ascii_case("evs:") {
        return None;
    }
    let speed = line[4..]
        .split('/')
        .filter_map(|part| {
            let (amount, stat) = part.trim().split_once(char::is_whitespace)?;
            let stat = stat.trim_start();
            if stat.contains(char::is_whitespace)
                || amount.is_empty()
                || !amount.chars().all(|c| c.is_ascii_digit())
            {
                return None;
            }
            // Digits only, so a parse failure is an overflow.
            (Stat::from_abbreviation(stat) == Some(Stat::Spe)).then(|| {
                amount
                    .parse::<i64>()
                    .map_or(i32::MAX, |v| v.min(i64::from(i32::MAX)) as i32)
            })
        })
        .last();
    Some(SetLine::Evs(speed))
}

/// `- Move Name` or `* Move Name`.
fn move_line(line: &str) -> Option<SetLine<'_>> {
    let rest = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))?;
    let name = rest.trim().split('/').next().unwrap_or("");
    Some(SetLine::Move(strip_annotation(name).trim().to_string()))
}

/// Drops the first parenthesized annotation, e.g. `Hidden Power (Ice)`.
fn strip_annotation(name: &str) -> String {
    let Some(open) = name.find('(') else {
        return name.to_string();
    };
    let Some(close) = name[open..].find(')').map(|i| open + i) else {
        return name.to_string();
    };
    let start = name[..open].trim_end().len();
    format!("{}{}", &name[..start], &name[close + 1..])
}

/// Removes every `(M)` / `(F)` marker and the whitespace before it.
fn strip_gender(species: &str) -> String {
    let mut out = species.to_string();
    for marker in ["(M)", "(F)"] {
        while let Some(pos) = out.find(marker) {
            let start = out[..pos].trim_end().len();
            out.replace_range(start..pos + marker.len(), "");
        }
    }
    out.trim().to_string()
}

fn header_line(line: &str) -> (String, String) {
    let mut parts = line.split('@');
    let species = strip_gender(parts.next().unwrap_or(""));
    let item = parts.next().map(|item| item.trim().to_string()).unwrap_or_default();
    (species, item)
}

/// Parses one exported set. Fails only when the text has no non-blank line.
pub fn parse_set(text: &str) -> Result<ParsedSet, PalaceError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let header = lines.next().ok_or(PalaceError::EmptyInput)?;

    let (species, item) = header_line(header);
    let mut set = ParsedSet {
        species,
        item,
        ..ParsedSet::default()
    };
    let mut move_count = 0;

    for line in lines {
        let Some(parsed) = LINE_CLASSIFIERS.iter().find_map(|classify| classify(line)) else {
            trace!(line, "skipping line");
            continue;
        };
        trace!(line, ?parsed, "set line");
        match parsed {
            SetLine::Nature(nature) => set.nature = nature.to_string(),
            SetLine::Evs(Some(speed_ev)) => set.speed_ev = speed_ev,
            SetLine::Evs(None) => {}
            SetLine::Move(name) => {
                if move_count < MOVE_SLOTS {
                    set.moves[move_count] = name;
                    move_count += 1;
                }
            }
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nature_line_needs_single_word() {
        assert_eq!(nature_line("Brave Nature"), Some(SetLine::Nature("Brave")));
        assert_eq!(nature_line("jolly nature"), Some(SetLine::Nature("jolly")));
        assert_eq!(nature_line("Brave  NATURE"), Some(SetLine::Nature("Brave")));
        assert_eq!(nature_line("Very Brave Nature"), None);
        assert_eq!(nature_line("Brave Natures"), None);
        assert_eq!(nature_line("Nature"), None);
    }

    #[test]
    fn evs_line_reads_speed_only() {
        assert_eq!(evs_line("EVs: 36 HP / 220 Def / 252 Spe"), Some(SetLine::Evs(Some(252))));
        assert_eq!(evs_line("evs: 4 spe"), Some(SetLine::Evs(Some(4))));
        assert_eq!(evs_line("EVs: 252 Atk / 252 HP"), Some(SetLine::Evs(None)));
        assert_eq!(evs_line("EVs: lots Spe"), Some(SetLine::Evs(None)));
        assert_eq!(evs_line("IVs: 0 Spe"), None);
    }

    #[test]
    fn overflowing_speed_evs_saturate() {
        assert_eq!(
            evs_line("EVs: 99999999999 Spe"),
            Some(SetLine::Evs(Some(i32::MAX)))
        );
        assert_eq!(
            evs_line("EVs: 99999999999999999999999 Spe"),
            Some(SetLine::Evs(Some(i32::MAX)))
        );
        let set = parse_set("Snorlax\nEVs: 99999999999 Spe").unwrap();
        assert_eq!(set.speed_ev, i32::MAX);
        assert_eq!(crate::core::stats::clamp_effort_value(set.speed_ev), 252);
    }

    #[test]
    fn move_line_strips_annotations() {
        assert_eq!(move_line("- Body Slam"), Some(SetLine::Move("Body Slam".into())));
        assert_eq!(move_line("* Rest"), Some(SetLine::Move("Rest".into())));
        assert_eq!(
            move_line("- Hidden Power (Ice)"),
            Some(SetLine::Move("Hidden Power".into()))
        );
        assert_eq!(
            move_line("- Thunderbolt / Ice Beam"),
            Some(SetLine::Move("Thunderbolt".into()))
        );
        assert_eq!(move_line("Ability: Immunity"), None);
    }

    #[test]
    fn strip_annotation_removes_first_group_only() {
        assert_eq!(strip_annotation("A (x) B (y)"), "A B (y)");
        assert_eq!(strip_annotation("Unclosed (x"), "Unclosed (x");
    }

    #[test]
    fn strip_gender_removes_markers() {
        assert_eq!(strip_gender("Latios (M) "), "Latios");
        assert_eq!(strip_gender("Gardevoir(F)"), "Gardevoir");
        assert_eq!(strip_gender("Mr. Mime"), "Mr. Mime");
    }
}
