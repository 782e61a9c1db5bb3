//! Build script: reads data/units.json, data/interventions.json,
//! data/bosses.json and data/rosters.json and generates Rust source that
//! statically constructs the default catalog.
//! The assets crate embeds its data without runtime JSON parsing, so it stays
//! no_std compatible.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
struct JsonUnit {
    id: String,
    name: String,
    attack: i32,
    health: i32,
    polarity: u8,
    cost: i32,
    keyword: Option<String>,
    tier: u8,
}

#[derive(Deserialize)]
struct JsonCard {
    kind: String,
    name: String,
    target: String,
    description: String,
}

#[derive(Deserialize)]
struct JsonBoss {
    round: u32,
    name: String,
    warning: String,
    roster: Vec<String>,
    effect: JsonEffect,
    opening: String,
}

#[derive(Deserialize)]
struct JsonEffect {
    #[serde(rename = "type")]
    effect_type: String,
    amount: i32,
}

#[derive(Deserialize)]
struct JsonRosters {
    starters: Vec<String>,
    enemy_bases: Vec<Vec<String>>,
}

// ── Code generation helpers ──────────────────────────────────────────────────

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

fn gen_unit(unit: &JsonUnit) -> String {
    let JsonUnit {
        id,
        name,
        attack,
        health,
        polarity,
        cost,
        tier,
        ..
    } = unit;
    assert!(*polarity <= 100, "{id}: polarity must be within 0..=100");
    let keyword = match unit.keyword.as_deref() {
        None => "None".to_string(),
        Some(kw @ ("Taunt" | "Haste" | "Retaliate" | "Leech")) => format!("Some(Keyword::{kw})"),
        Some(other) => panic!("{id}: unknown keyword {other}"),
    };
    format!(
        r#"        UnitTemplate {{
            template_id: String::from({id:?}),
            name: String::from({name:?}),
            attack: {attack},
            health: {health},
            polarity: {polarity},
            cost: {cost},
            keyword: {keyword},
            tier: {tier},
        }}"#
    )
}

fn gen_card(card: &JsonCard) -> String {
    let JsonCard {
        kind,
        name,
        target,
        description,
    } = card;
    format!(
        r#"        InterventionCard {{
            kind: CardKind::{kind},
            name: String::from({name:?}),
            target: CardTarget::{target},
            description: String::from({description:?}),
        }}"#
    )
}

fn gen_boss(boss: &JsonBoss, known: &[String]) -> String {
    let JsonBoss {
        round,
        name,
        warning,
        opening,
        ..
    } = boss;
    for id in &boss.roster {
        assert!(known.contains(id), "{name}: unknown roster unit {id}");
    }
    let roster: Vec<String> = boss
        .roster
        .iter()
        .map(|id| format!("String::from({id:?})"))
        .collect();
    let amount = boss.effect.amount;
    let effect = match boss.effect.effect_type.as_str() {
        "DrainAll" => format!("BossEffect::DrainAll {{ amount: {amount} }}"),
        "SurgeStrongest" => format!("BossEffect::SurgeStrongest {{ amount: {amount} }}"),
        other => panic!("{name}: unknown boss effect {other}"),
    };
    format!(
        r#"        BossDefinition {{
            round: {round},
            name: String::from({name:?}),
            warning: String::from({warning:?}),
            roster: vec![{}],
            effect: {effect},
            opening: String::from({opening:?}),
        }}"#,
        roster.join(", ")
    )
}

fn gen_id_list(ids: &[String], known: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| {
            assert!(known.contains(id), "unknown unit id {id}");
            format!("{id:?}")
        })
        .collect();
    format!("&[{}]", quoted.join(", "))
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let data = Path::new(&manifest_dir).join("data");

    let units: Vec<JsonUnit> = read_json(&data.join("units.json"));
    let cards: Vec<JsonCard> = read_json(&data.join("interventions.json"));
    let bosses: Vec<JsonBoss> = read_json(&data.join("bosses.json"));
    let rosters: JsonRosters = read_json(&data.join("rosters.json"));

    let known: Vec<String> = units.iter().map(|u| u.id.clone()).collect();

    let unit_entries: Vec<String> = units.iter().map(gen_unit).collect();
    let card_entries: Vec<String> = cards.iter().map(gen_card).collect();
    let boss_entries: Vec<String> = bosses.iter().map(|b| gen_boss(b, &known)).collect();
    let base_entries: Vec<String> = rosters
        .enemy_bases
        .iter()
        .map(|base| format!("    {}", gen_id_list(base, &known)))
        .collect();
    let starters = gen_id_list(&rosters.starters, &known);

    // ── Write output ─────────────────────────────────────────────────────────
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("assets_generated.rs");

    let generated = format!(
        r#"// Auto-generated from data/*.json, DO NOT EDIT
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use conductor_battle::{{BossDefinition, BossEffect}};
use conductor_battle::types::*;

/// Returns every unit template in the pool.
pub fn get_unit_pool() -> Vec<UnitTemplate> {{
    vec![
{}
    ]
}}

/// Returns the intervention card catalog.
pub fn get_intervention_cards() -> Vec<InterventionCard> {{
    vec![
{}
    ]
}}

/// Returns the boss table.
pub fn get_bosses() -> Vec<BossDefinition> {{
    vec![
{}
    ]
}}

/// Base enemy rosters by round, before scaling.
pub const ENEMY_BASES: &[&[&str]] = &[
{}
];

/// Template ids of the starting board.
pub const STARTERS: &[&str] = {};
"#,
        unit_entries.join(",\n"),
        card_entries.join(",\n"),
        boss_entries.join(",\n"),
        base_entries.join(",\n"),
        starters,
    );

    fs::write(&dest, generated).expect("Failed to write generated assets file");
}
