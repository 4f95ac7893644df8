use palace_engine::{parse_set, PalaceError, ParsedSet};

const SNORLAX: &str = "Snorlax @ Leftovers
Ability: Immunity
Level: 50
EVs: 36 HP / 220 Def / 252 Spe
Brave Nature
- Body Slam
- Amnesia
- Curse
- Rest";

fn export(set: &ParsedSet) -> String {
    let mut text = set.species.clone();
    if !set.item.is_empty() {
        text.push_str(&format!(" @ {}", set.item));
    }
    text.push_str(&format!("\nEVs: {} Spe\n{} Nature\n", set.speed_ev, set.nature));
    for name in set.moves.iter().filter(|m| !m.is_empty()) {
        text.push_str(&format!("- {}\n", name));
    }
    text
}

#[test]
fn parses_canonical_export() {
    let set = parse_set(SNORLAX).expect("parse");
    assert_eq!(
        set,
        ParsedSet {
            species: "Snorlax".to_string(),
            item: "Leftovers".to_string(),
            nature: "Brave".to_string(),
            moves: [
                "Body Slam".to_string(),
                "Amnesia".to_string(),
                "Curse".to_string(),
                "Rest".to_string(),
            ],
            speed_ev: 252,
        }
    );
}

#[test]
fn reparsing_an_export_is_stable() {
    let first = parse_set(SNORLAX).unwrap();
    let second = parse_set(&export(&first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_input_is_an_error() {
    assert_eq!(parse_set(""), Err(PalaceError::EmptyInput));
    assert_eq!(parse_set("  \n\t\n   "), Err(PalaceError::EmptyInput));
}

#[test]
fn species_only_defaults_everything_else() {
    let set = parse_set("\n  Latios (M)  \n").unwrap();
    assert_eq!(set.species, "Latios");
    assert_eq!(set.item, "");
    assert_eq!(set.nature, "");
    assert_eq!(set.speed_ev, 0);
    assert!(set.moves.iter().all(String::is_empty));
}

#[test]
fn gender_marker_is_stripped_before_item() {
    let set = parse_set("Gardevoir (F) @ Lum Berry").unwrap();
    assert_eq!(set.species, "Gardevoir");
    assert_eq!(set.item, "Lum Berry");
}

#[test]
fn lines_may_come_in_any_order() {
    let text = "Metagross @ Choice Band\r\n- Meteor Mash\r\nadamant nature\r\n* Earthquake\r\nEVs: 4 HP / 252 Atk / 252 SPE\r\n- Explosion";
    let set = parse_set(text).unwrap();
    assert_eq!(set.nature, "adamant");
    assert_eq!(set.speed_ev, 252);
    assert_eq!(set.moves, ["Meteor Mash", "Earthquake", "Explosion", ""].map(String::from));
}

#[test]
fn fifth_move_is_ignored() {
    let text = "Smeargle\n- Spore\n- Spikes\n- Baton Pass\n- Belly Drum\n- Extreme Speed";
    let set = parse_set(text).unwrap();
    assert_eq!(set.moves, ["Spore", "Spikes", "Baton Pass", "Belly Drum"].map(String::from));
}

#[test]
fn move_annotations_are_dropped() {
    let text = "Latias @ Soul Dew\n- Hidden Power (Fire)\n- Psychic / Dragon Claw\n- Recover";
    let set = parse_set(text).unwrap();
    assert_eq!(set.moves, ["Hidden Power", "Psychic", "Recover", ""].map(String::from));
}

#[test]
fn missing_speed_ev_stays_zero() {
    let set = parse_set("Blissey\nEVs: 252 HP / 252 Def\nBold Nature").unwrap();
    assert_eq!(set.speed_ev, 0);
    assert_eq!(set.nature, "Bold");
}
