use super::*;
use crate::reconcile::{reconcile, score};
use crate::state::{Boards, Campaign};

fn combat_copy(unit: &BoardUnit) -> CombatUnit {
    CombatUnit::enter(unit, Team::Player, PolarityBonus::NONE)
}

fn campaign_with(board: Vec<BoardUnit>) -> Campaign {
    let mut campaign = create_campaign(board, vec![]);
    campaign.snapshot = campaign.board.clone();
    campaign
}

#[test]
fn test_score_by_survivors() {
    let alive = create_combat_unit(Team::Player, 1, "A", 1, 1);
    let mut dead = create_combat_unit(Team::Enemy, 2, "B", 1, 1);
    dead.take_damage(1);

    let win = Boards {
        player: vec![alive.clone()],
        enemy: vec![dead.clone()],
    };
    assert_eq!(score(&win), CombatResult::Win);

    let empty = Boards::default();
    assert_eq!(score(&empty), CombatResult::Draw);

    let both = Boards {
        player: vec![alive.clone()],
        enemy: vec![create_combat_unit(Team::Enemy, 3, "C", 1, 1)],
    };
    assert_eq!(score(&both), CombatResult::Draw);
}

#[test]
fn test_win_grants_xp_and_queues_level_ups() {
    let mut veteran = create_board_unit(1, "Veteran", 2, 5);
    veteran.xp = 1;
    let rookie = create_board_unit(2, "Rookie", 2, 5);
    let fallen = create_board_unit(3, "Fallen", 2, 5);
    let mut campaign = campaign_with(vec![veteran, rookie, fallen]);
    campaign.level_queue.push(UnitId(99));

    let mut boards = Boards::default();
    for unit in &campaign.board {
        boards.player.push(combat_copy(unit));
    }
    boards.player[1].health = 2;
    boards.player[2].take_damage(5);

    let outcome = reconcile(&mut campaign, &boards, CombatResult::Win, false);

    assert_eq!(campaign.board.len(), 2, "dead units are removed");
    assert_eq!(campaign.board[0].xp, 0);
    assert_eq!(campaign.board[1].xp, 1);
    assert_eq!(campaign.board[1].current_health, 2);
    assert_eq!(campaign.level_queue, vec![UnitId(1)], "stale queue cleared first");
    assert_eq!(outcome.level_ups, 1);
    assert_eq!(outcome.hp_lost, 0);
}

#[test]
fn test_copy_back_is_clamped_to_persistent_max() {
    let unit = create_board_unit(1, "Walled", 2, 5);
    let mut campaign = campaign_with(vec![unit]);
    let mut boards = Boards::default();
    boards.player.push(combat_copy(&campaign.board[0]));
    // Bulwark raised the combat copy past the persistent max.
    boards.player[0].health = 8;
    boards.player[0].max_health = 8;

    reconcile(&mut campaign, &boards, CombatResult::Win, true);
    assert_eq!(campaign.board[0].current_health, 5);
    assert_eq!(campaign.board[0].max_health, 5);
}

#[test]
fn test_loss_costs_hp_and_adds_entropy() {
    let mut campaign = campaign_with(vec![
        create_board_unit(1, "Survivor", 2, 5),
        create_board_unit(2, "Fallen", 2, 5),
    ]);
    campaign.hp = 3;

    let mut boards = Boards::default();
    for unit in &campaign.board {
        boards.player.push(combat_copy(unit));
    }
    boards.player[1].take_damage(5);
    boards.enemy.push(create_combat_unit(Team::Enemy, 101, "Brute", 4, 4));
    boards.enemy.push(create_combat_unit(Team::Enemy, 102, "Thug", 1, 4));
    let mut gone = create_combat_unit(Team::Enemy, 103, "Gone", 9, 1);
    gone.take_damage(1);
    boards.enemy.push(gone);

    let outcome = reconcile(&mut campaign, &boards, CombatResult::Loss, false);

    assert_eq!(campaign.hp, 0, "hp floors at zero");
    assert_eq!(outcome.hp_lost, 3);
    assert_eq!(campaign.board.len(), 1);
    assert_eq!(campaign.board[0].entropy, 2);
}

#[test]
fn test_draw_restores_snapshot_with_entropy() {
    let mut worn = create_board_unit(1, "Worn", 2, 5);
    worn.current_health = 4;
    worn.entropy = 2;
    let mut campaign = campaign_with(vec![worn, create_board_unit(2, "Fresh", 1, 3)]);
    let before = campaign.snapshot.clone();

    // Both sides wiped out in combat.
    let mut boards = Boards::default();
    for unit in &campaign.board {
        let mut cu = combat_copy(unit);
        cu.take_damage(10);
        boards.player.push(cu);
    }
    campaign.board.clear();

    reconcile(&mut campaign, &boards, CombatResult::Draw, false);

    assert_eq!(campaign.board.len(), before.len());
    for (restored, original) in campaign.board.iter().zip(before.iter()) {
        assert_eq!(restored.id, original.id);
        assert_eq!(restored.current_health, original.current_health);
        assert_eq!(restored.entropy, original.entropy + 1);
    }
}

#[test]
fn test_armed_card_kept_unless_played() {
    let mut campaign = campaign_with(vec![create_board_unit(1, "A", 1, 1)]);
    campaign.armed_card = Some(CardKind::Bulwark);
    let boards = Boards {
        player: vec![combat_copy(&campaign.board[0])],
        enemy: vec![],
    };

    let outcome = reconcile(&mut campaign, &boards, CombatResult::Win, false);
    assert!(!outcome.card_discarded);
    assert_eq!(campaign.armed_card, Some(CardKind::Bulwark));

    let outcome = reconcile(&mut campaign, &boards, CombatResult::Win, true);
    assert!(outcome.card_discarded);
    assert_eq!(campaign.armed_card, None);
}
