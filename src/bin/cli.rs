//! Palace CLI
//!
//! Reads a set in export format and prints its Battle Palace odds, speed
//! and alarm labels.
//!
//! Usage:
//!   cargo run --bin palace-cli -- --file set.txt
//!   cat set.txt | cargo run --bin palace-cli -- --low-hp
//!   cargo run --bin palace-cli            (interactive)

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use inquire::{Select, Text};
use palace_engine::{
    alarm_labels, parse_set, HpTier, PalaceEngine, PalaceTables, ParsedSet, StatCalculator,
    TierProbabilities,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Config {
    data_dir: Option<PathBuf>,
    file: Option<PathBuf>,
    level: Option<i32>,
    tier: Option<HpTier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: env::var("PALACE_DATA_DIR").ok().map(PathBuf::from),
            file: None,
            level: env::var("PALACE_LEVEL").ok().and_then(|v| v.parse().ok()),
            tier: None,
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                if i + 1 < args.len() {
                    config.data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--file" => {
                if i + 1 < args.len() {
                    config.file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--level" => {
                if i + 1 < args.len() {
                    config.level = args[i + 1].parse().ok().or(config.level);
                    i += 1;
                }
            }
            "--low-hp" => {
                config.tier = Some(HpTier::AtOrBelowHalf);
            }
            "--high-hp" => {
                config.tier = Some(HpTier::AboveHalf);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!(
        r#"Palace CLI - Battle Palace odds for an exported set

USAGE:
    palace-cli [OPTIONS]

OPTIONS:
    --file <PATH>       Read the set from a file (default: stdin, or prompt)
    --data-dir <DIR>    Directory with natures.json, move_classes.json, species.json
    --level <N>         Also print speed at this level (Lv. 50 and 100 always shown)
    --high-hp           Only show odds above half HP
    --low-hp            Only show odds at or below half HP
    -h, --help          Print help

ENVIRONMENT:
    PALACE_DATA_DIR     Same as --data-dir
    PALACE_LEVEL        Same as --level
    RUST_LOG            Log filter (default: warn)"#
    );
}

fn load_tables(config: &Config) -> Result<PalaceTables, Box<dyn Error>> {
    match &config.data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "loading tables");
            Ok(PalaceTables::load_from_dir(dir)?)
        }
        None => Ok(PalaceTables::load_default()?),
    }
}

fn read_input(config: &Config) -> Result<Option<String>, Box<dyn Error>> {
    if let Some(path) = &config.file {
        return Ok(Some(fs::read_to_string(path)?));
    }
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(Some(text))
}

fn prompt_set(tables: &PalaceTables) -> Result<ParsedSet, Box<dyn Error>> {
    let species = Text::new("Species:").prompt()?;
    let item = Text::new("Item:")
        .with_help_message("Leave empty for no item")
        .prompt()?
        .trim()
        .to_string();
    let nature = Select::new("Nature:", tables.natures.names()).prompt()?.to_string();
    let mut set = ParsedSet {
        species,
        item,
        nature,
        ..ParsedSet::default()
    };
    for (slot, name) in set.moves.iter_mut().enumerate() {
        *name = Text::new(&format!("Move {}:", slot + 1))
            .with_autocomplete(MoveNames(
                tables.moves.names().into_iter().map(str::to_string).collect(),
            ))
            .prompt()?
            .trim()
            .to_string();
    }
    let ev = Text::new("Speed EVs:").with_default("0").prompt()?;
    set.speed_ev = palace_engine::parse_effort_value(&ev);
    Ok(set)
}

#[derive(Clone)]
struct MoveNames(Vec<String>);

impl inquire::Autocomplete for MoveNames {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        let needle = input.to_lowercase();
        Ok(self
            .0
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(10)
            .cloned()
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted: Option<String>,
    ) -> Result<inquire::autocompletion::Replacement, inquire::CustomUserError> {
        Ok(highlighted)
    }
}

fn pct(v: f64) -> String {
    format!("{:5.1}%", v * 100.0)
}

fn print_tier(label: &str, probs: &TierProbabilities) {
    println!("{label}");
    println!("  AI      ATK {}  DEF {}  SPT {}", pct(probs.ai_atk), pct(probs.ai_def), pct(probs.ai_spt));
    println!("  Random  ATK {}  DEF {}  NOMOVE {}", pct(probs.r_atk), pct(probs.r_def), pct(probs.r_nomove));
}

fn speed_lines(stats: &StatCalculator, set: &ParsedSet, extra_level: Option<i32>) -> Vec<String> {
    let summary = match stats.speed_at_standard_levels(&set.species, &set.nature, set.speed_ev) {
        Ok(summary) => summary,
        Err(err) => return vec![format!("Speed: n/a ({err})")],
    };
    let mut lines = vec![
        format!("Speed (Lv. 50): {}", summary.level50),
        format!("Speed (Lv. 100): {}", summary.level100),
    ];
    if let Some(level) = extra_level.filter(|&level| !matches!(level, 50 | 100)) {
        if let Ok(speed) = stats.compute_speed(&set.species, &set.nature, set.speed_ev, level) {
            lines.push(format!("Speed (Lv. {level}): {speed}"));
        }
    }
    lines
}

fn warnings_line(set: &ParsedSet) -> Option<String> {
    let labels = alarm_labels(&set.moves, &set.item);
    if labels.is_empty() {
        return None;
    }
    let labels: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
    Some(format!("Warnings: {}", labels.join(", ")))
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = parse_args();
    debug!(?config, "starting");
    let tables = load_tables(&config)?;

    let mut set = match read_input(&config)? {
        Some(text) => parse_set(&text)?,
        None => prompt_set(&tables)?,
    };
    if let Some(canonical) = tables.natures.resolve(&set.nature) {
        set.nature = canonical.to_string();
    }

    let engine = PalaceEngine::from_tables(&tables);
    let result = engine.compute_probabilities(&set.nature, &set.moves)?;

    let title = if set.item.is_empty() {
        set.species.clone()
    } else {
        format!("{} @ {}", set.species, set.item)
    };
    println!("{} ({})", title, set.nature);
    for (name, category) in set.moves.iter().zip(result.categories.iter()) {
        let name = if name.is_empty() { "---" } else { name.as_str() };
        println!("  - {:<20} {}", name, category);
    }
    println!();

    match config.tier {
        Some(tier) => {
            let label = match tier {
                HpTier::AboveHalf => "HP > 50%",
                HpTier::AtOrBelowHalf => "HP <= 50%",
            };
            print_tier(label, result.tier(tier));
        }
        None => {
            print_tier("HP > 50%", &result.above_half);
            print_tier("HP <= 50%", &result.at_or_below_half);
        }
    }
    println!();

    let stats = StatCalculator::new(&tables.species);
    for line in speed_lines(&stats, &set, config.level) {
        println!("{line}");
    }

    if let Some(line) = warnings_line(&set) {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palace_engine::{BaseStats, SpeciesData, SpeciesDatabase};

    fn snorlax() -> SpeciesDatabase {
        let mut db = SpeciesDatabase::new();
        db.insert(SpeciesData {
            name: "Snorlax".to_string(),
            base_stats: BaseStats {
                hp: 160,
                atk: 110,
                def: 65,
                spa: 65,
                spd: 110,
                spe: 30,
            },
        });
        db
    }

    fn set(species: &str, item: &str) -> ParsedSet {
        ParsedSet {
            species: species.to_string(),
            item: item.to_string(),
            nature: "Hardy".to_string(),
            speed_ev: 252,
            ..ParsedSet::default()
        }
    }

    #[test]
    fn speed_is_shown_at_both_standard_levels() {
        let db = snorlax();
        let stats = StatCalculator::new(&db);
        assert_eq!(
            speed_lines(&stats, &set("Snorlax", ""), None),
            vec!["Speed (Lv. 50): 82", "Speed (Lv. 100): 159"]
        );
    }

    #[test]
    fn configured_level_adds_a_line() {
        let db = snorlax();
        let stats = StatCalculator::new(&db);
        let lines = speed_lines(&stats, &set("Snorlax", ""), Some(30));
        assert_eq!(lines.len(), 3);
        // (60 + 31 + 63) * 30 / 100 + 5
        assert_eq!(lines[2], "Speed (Lv. 30): 51");
        assert_eq!(speed_lines(&stats, &set("Snorlax", ""), Some(100)).len(), 2);
    }

    #[test]
    fn unknown_species_has_no_speed() {
        let db = snorlax();
        let stats = StatCalculator::new(&db);
        assert_eq!(
            speed_lines(&stats, &set("Missingno", ""), Some(30)),
            vec!["Speed: n/a (Unknown species: Missingno)"]
        );
    }

    #[test]
    fn item_warning_is_reported() {
        assert_eq!(
            warnings_line(&set("Snorlax", "Quick Claw")).as_deref(),
            Some("Warnings: alarm item")
        );
        assert_eq!(warnings_line(&set("Snorlax", "Leftovers")), None);
    }
}
