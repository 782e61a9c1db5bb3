mod bosses;
mod keywords;
mod reconcile;
mod rules;

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::bosses::{BossDefinition, BossEffect};
use crate::engine::{Catalog, CombatEngine};
use crate::rules::PolarityBonus;
use crate::state::Campaign;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Polarity that gives FLUX and no stat bonus.
const QUIET: u8 = 35;
/// Polarity that gives CHAOS and no stat bonus.
const WILD: u8 = 66;
/// Polarity that gives ORDER and no stat bonus.
const STRICT: u8 = 34;

fn create_template(name: &str, atk: i32, hp: i32, polarity: u8) -> UnitTemplate {
    UnitTemplate::new(&name.to_lowercase(), name, atk, hp, polarity)
}

fn create_board_unit(id: u32, name: &str, atk: i32, hp: i32) -> BoardUnit {
    BoardUnit::from_template(UnitId(id), create_template(name, atk, hp, QUIET))
}

fn create_keyword_unit(id: u32, name: &str, atk: i32, hp: i32, keyword: Keyword) -> BoardUnit {
    BoardUnit::from_template(
        UnitId(id),
        create_template(name, atk, hp, QUIET).with_keyword(keyword),
    )
}

fn create_combat_unit(team: Team, id: u32, name: &str, atk: i32, hp: i32) -> CombatUnit {
    CombatUnit::enter(&create_board_unit(id, name, atk, hp), team, PolarityBonus::NONE)
}

fn create_keyword_combat_unit(
    team: Team,
    id: u32,
    name: &str,
    atk: i32,
    hp: i32,
    keyword: Keyword,
) -> CombatUnit {
    CombatUnit::enter(
        &create_keyword_unit(id, name, atk, hp, keyword),
        team,
        PolarityBonus::NONE,
    )
}

fn create_cards() -> Vec<InterventionCard> {
    vec![
        InterventionCard::new(CardKind::Redirect, "Redirect", CardTarget::Enemy, "Retarget"),
        InterventionCard::new(CardKind::Bulwark, "Bulwark", CardTarget::Friendly, "+3 HP"),
        InterventionCard::new(CardKind::Surge, "Surge", CardTarget::Friendly, "+2 ATK"),
        InterventionCard::new(CardKind::Drain, "Drain", CardTarget::Untargeted, "3 damage"),
        InterventionCard::new(CardKind::Unravel, "Unravel", CardTarget::Friendly, "-3 entropy"),
    ]
}

fn create_bosses() -> Vec<BossDefinition> {
    vec![
        BossDefinition {
            round: 5,
            name: "Iron Test".to_string(),
            warning: "Drain incoming.".to_string(),
            roster: vec!["stoneguard".to_string()],
            effect: BossEffect::DrainAll { amount: 3 },
            opening: "Iron Test opens with Drain.".to_string(),
        },
        BossDefinition {
            round: 9,
            name: "Void Test".to_string(),
            warning: "Surge incoming.".to_string(),
            roster: vec!["voidmaw".to_string()],
            effect: BossEffect::SurgeStrongest { amount: 2 },
            opening: "Void Test surges.".to_string(),
        },
    ]
}

fn create_test_catalog() -> Catalog {
    Catalog::new(create_cards(), create_bosses())
}

fn create_campaign(player: Vec<BoardUnit>, enemy: Vec<BoardUnit>) -> Campaign {
    let mut campaign = Campaign::new();
    campaign.board = player;
    campaign.enemy_board = enemy;
    campaign.next_unit_id = 1000;
    campaign
}

fn create_engine(player: Vec<BoardUnit>, enemy: Vec<BoardUnit>) -> CombatEngine {
    CombatEngine::new(create_campaign(player, enemy), create_test_catalog(), 42)
}

fn create_armed_engine(
    player: Vec<BoardUnit>,
    enemy: Vec<BoardUnit>,
    card: CardKind,
) -> CombatEngine {
    let mut engine = create_engine(player, enemy);
    engine.campaign.armed_card = Some(card);
    engine
}

/// Starts combat and runs to the first (player) window.
fn open_first_window(engine: &mut CombatEngine) {
    engine.start_combat().expect("combat should start");
    engine.advance(1200);
    assert!(engine.combat().window_open, "first window should be open");
}

fn player(id: u32) -> UnitRef {
    UnitRef::new(Team::Player, UnitId(id))
}

fn enemy(id: u32) -> UnitRef {
    UnitRef::new(Team::Enemy, UnitId(id))
}
