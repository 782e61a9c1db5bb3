use super::*;
use crate::bosses::{apply_boss_effect, boss_for_round, upcoming_warning};
use crate::state::Boards;

#[test]
fn test_no_effect_outside_boss_rounds() {
    let mut boards = Boards {
        player: vec![create_combat_unit(Team::Player, 1, "A", 2, 5)],
        enemy: vec![create_combat_unit(Team::Enemy, 101, "B", 2, 5)],
    };
    let before = boards.clone();
    assert_eq!(apply_boss_effect(&create_bosses(), 4, &mut boards), None);
    assert_eq!(boards, before);
}

#[test]
fn test_drain_all_never_kills() {
    let mut dead = create_combat_unit(Team::Player, 3, "Collapsed", 1, 5);
    dead.take_damage(5);
    let mut boards = Boards {
        player: vec![
            create_combat_unit(Team::Player, 1, "Small", 1, 2),
            create_combat_unit(Team::Player, 2, "Large", 1, 9),
            dead,
        ],
        enemy: vec![create_combat_unit(Team::Enemy, 101, "Boss", 2, 5)],
    };

    let line = apply_boss_effect(&create_bosses(), 5, &mut boards);
    assert_eq!(line.as_deref(), Some("Iron Test opens with Drain."));
    assert_eq!(boards.player[0].health, 1);
    assert_eq!(boards.player[1].health, 6);
    assert!(!boards.player[2].is_alive(), "collapsed units stay down");
    assert_eq!(boards.enemy[0].health, 5);
}

#[test]
fn test_surge_strongest_prefers_first_on_ties() {
    let mut boards = Boards {
        player: vec![create_combat_unit(Team::Player, 1, "A", 2, 5)],
        enemy: vec![
            create_combat_unit(Team::Enemy, 101, "Weak", 1, 5),
            create_combat_unit(Team::Enemy, 102, "StrongA", 4, 5),
            create_combat_unit(Team::Enemy, 103, "StrongB", 4, 5),
        ],
    };

    apply_boss_effect(&create_bosses(), 9, &mut boards);
    let attacks: Vec<i32> = boards.enemy.iter().map(|u| u.attack).collect();
    assert_eq!(attacks, vec![1, 6, 4]);
    assert_eq!(boards.player[0].attack, 2);
}

#[test]
fn test_warning_is_one_round_ahead() {
    let bosses = create_bosses();
    assert_eq!(upcoming_warning(&bosses, 4), Some("Drain incoming."));
    assert_eq!(upcoming_warning(&bosses, 5), None);
    assert_eq!(upcoming_warning(&bosses, 8), Some("Surge incoming."));
    assert_eq!(boss_for_round(&bosses, 9).map(|b| b.name.as_str()), Some("Void Test"));
}
