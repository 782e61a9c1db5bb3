use super::*;
use crate::battle::{pick_target, turn_order};
use crate::keywords::*;

#[test]
fn test_capability_rows() {
    let plain = Capabilities::of(None);
    assert_eq!(plain.counter_bonus, 0);
    assert!(!plain.draws_attacks && !plain.strikes_first);
    assert_eq!(plain.kill_heal, 0);

    assert!(Capabilities::of(Some(Keyword::Taunt)).draws_attacks);
    assert!(Capabilities::of(Some(Keyword::Haste)).strikes_first);
    assert_eq!(Capabilities::of(Some(Keyword::Retaliate)).counter_bonus, 1);
    assert_eq!(Capabilities::of(Some(Keyword::Leech)).kill_heal, 1);
}

#[test]
fn test_retaliate_counter_damage() {
    let plain = create_combat_unit(Team::Enemy, 1, "Plain", 2, 3);
    let spiky = create_keyword_combat_unit(Team::Enemy, 2, "Spiky", 2, 3, Keyword::Retaliate);
    assert_eq!(counter_damage(&plain), 2);
    assert_eq!(counter_damage(&spiky), 3);
}

#[test]
fn test_haste_moves_ahead_keeping_board_order() {
    let units = vec![
        create_combat_unit(Team::Player, 1, "A", 1, 1),
        create_keyword_combat_unit(Team::Player, 2, "FastB", 1, 1, Keyword::Haste),
        create_combat_unit(Team::Player, 3, "C", 1, 1),
        create_keyword_combat_unit(Team::Player, 4, "FastD", 1, 1, Keyword::Haste),
    ];
    let ids: Vec<u32> = turn_order(&units).iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);
}

#[test]
fn test_turn_order_skips_dead() {
    let mut units = vec![
        create_keyword_combat_unit(Team::Enemy, 1, "Fast", 1, 1, Keyword::Haste),
        create_combat_unit(Team::Enemy, 2, "Slow", 1, 1),
    ];
    units[0].take_damage(1);
    let ids: Vec<u32> = turn_order(&units).iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_taunt_draws_the_attack() {
    let mut units = vec![
        create_combat_unit(Team::Enemy, 1, "Front", 1, 1),
        create_keyword_combat_unit(Team::Enemy, 2, "Wall", 1, 6, Keyword::Taunt),
    ];
    assert_eq!(pick_target(&units), Some(enemy(2)));

    // A dead taunt no longer protects anything.
    units[1].take_damage(6);
    assert_eq!(pick_target(&units), Some(enemy(1)));

    units[0].take_damage(1);
    assert_eq!(pick_target(&units), None);
}
