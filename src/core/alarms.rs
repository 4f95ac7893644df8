use serde::{Deserialize, Serialize};
use std::fmt;

/// Moves that make Palace AI behavior swingy or self-defeating.
pub const ALARM_MOVES: &[&str] = &[
    "Sheer Cold",
    "Horn Drill",
    "Fissure",
    "Guillotine",
    "Reversal",
    "Swords Dance",
    "Dragon Dance",
    "Double Team",
    "Counter",
    "Mirror Coat",
    "Psych Up",
];

pub const ALARM_ITEMS: &[&str] = &["BrightPowder", "Lax Incense", "Quick Claw"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmLabel {
    #[serde(rename = "alarm move")]
    Move,
    #[serde(rename = "alarm item")]
    Item,
}

impl AlarmLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmLabel::Move => "alarm move",
            AlarmLabel::Item => "alarm item",
        }
    }
}

impl fmt::Display for AlarmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn has_alarm_move<S: AsRef<str>>(moves: &[S]) -> bool {
    moves.iter().any(|m| ALARM_MOVES.contains(&m.as_ref()))
}

fn is_alarm_item(item: &str) -> bool {
    ALARM_ITEMS.contains(&item)
}

/// Labels for a set, move label first. Exact, case-sensitive matching.
pub fn alarm_labels<S: AsRef<str>>(moves: &[S], item: &str) -> Vec<AlarmLabel> {
    let mut labels = Vec::new();
    if has_alarm_move(moves) {
        labels.push(AlarmLabel::Move);
    }
    if is_alarm_item(item) {
        labels.push(AlarmLabel::Item);
    }
    labels
}

pub fn is_alarming<S: AsRef<str>>(moves: &[S], item: &str) -> bool {
    has_alarm_move(moves) || is_alarm_item(item)
}
