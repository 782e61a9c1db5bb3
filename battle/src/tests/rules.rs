use super::*;
use crate::rules::*;

fn board_with_polarities(polarities: &[u8]) -> Vec<BoardUnit> {
    polarities
        .iter()
        .enumerate()
        .map(|(i, &p)| BoardUnit::from_template(UnitId(i as u32 + 1), create_template("P", 1, 1, p)))
        .collect()
}

#[test]
fn test_rule_thresholds() {
    assert_eq!(Rule::for_board(&board_with_polarities(&[34])), Rule::Order);
    assert_eq!(Rule::for_board(&board_with_polarities(&[35])), Rule::Flux);
    assert_eq!(Rule::for_board(&board_with_polarities(&[65])), Rule::Flux);
    assert_eq!(Rule::for_board(&board_with_polarities(&[66])), Rule::Chaos);
    assert_eq!(Rule::for_board(&board_with_polarities(&[0, 100])), Rule::Flux);
}

#[test]
fn test_rule_uses_exact_average() {
    // 65.5 and 60.5 would truncate to 65 and 60.
    assert_eq!(Rule::for_board(&board_with_polarities(&[65, 66])), Rule::Chaos);
    assert_eq!(
        PolarityBonus::for_board(&board_with_polarities(&[60, 61])),
        PolarityBonus::NONE
    );
}

#[test]
fn test_empty_board_is_flux_without_bonus() {
    assert_eq!(Rule::for_board(&[]), Rule::Flux);
    assert_eq!(PolarityBonus::for_board(&[]), PolarityBonus::NONE);
}

#[test]
fn test_balanced_board_gets_attack_bonus() {
    // SCENARIO: average polarity 50 is FLUX and sits in the balanced band.
    let board = board_with_polarities(&[50]);
    assert_eq!(Rule::for_board(&board), Rule::Flux);
    assert_eq!(
        PolarityBonus::for_board(&board),
        PolarityBonus {
            attack: 2,
            health: 0
        }
    );

    assert_eq!(PolarityBonus::for_board(&board_with_polarities(&[40])).attack, 2);
    assert_eq!(PolarityBonus::for_board(&board_with_polarities(&[60])).attack, 2);
}

#[test]
fn test_extreme_board_gets_health_bonus() {
    for p in [0u8, 29, 71, 100] {
        assert_eq!(
            PolarityBonus::for_board(&board_with_polarities(&[p])),
            PolarityBonus {
                attack: 0,
                health: 2
            },
            "polarity {}",
            p
        );
    }
}

#[test]
fn test_gap_bands_get_no_bonus() {
    for p in [30u8, 35, 39, 61, 66, 70] {
        assert_eq!(
            PolarityBonus::for_board(&board_with_polarities(&[p])),
            PolarityBonus::NONE,
            "polarity {}",
            p
        );
    }
}

#[test]
fn test_rule_and_bonus_thresholds_are_independent() {
    // 32 is ORDER for rules yet earns nothing from the bonus table.
    let board = board_with_polarities(&[32]);
    assert_eq!(Rule::for_board(&board), Rule::Order);
    assert_eq!(PolarityBonus::for_board(&board), PolarityBonus::NONE);
}

#[test]
fn test_rule_flags() {
    assert!(Rule::Chaos.chains_kills());
    assert!(!Rule::Order.chains_kills());
    assert!(!Rule::Flux.chains_kills());
    assert!(Rule::Flux.waives_first_redirect_heat());
    assert!(!Rule::Chaos.waives_first_redirect_heat());
}

#[test]
fn test_entry_applies_bonus() {
    let unit = create_board_unit(1, "Rifter", 2, 3);
    let cu = CombatUnit::enter(
        &unit,
        Team::Player,
        PolarityBonus {
            attack: 2,
            health: 2,
        },
    );
    assert_eq!(cu.attack, 4);
    assert_eq!(cu.health, 5);
    assert_eq!(cu.max_health, 5);
    assert!(cu.is_alive());
}

#[test]
fn test_strained_unit_loses_attack() {
    let mut unit = create_board_unit(1, "Tired", 2, 3);
    unit.entropy = STRAIN_ENTROPY;
    let cu = CombatUnit::enter(&unit, Team::Player, PolarityBonus::NONE);
    assert_eq!(cu.attack, 1);
    assert!(cu.is_alive());

    unit.entropy = 4;
    unit.card.attack = 0;
    let cu = CombatUnit::enter(&unit, Team::Player, PolarityBonus::NONE);
    assert_eq!(cu.attack, 0, "strain penalty floors at zero");
}

#[test]
fn test_collapsed_unit_enters_dead() {
    let mut unit = create_board_unit(1, "Frayed", 4, 6);
    unit.entropy = COLLAPSE_ENTROPY;
    let cu = CombatUnit::enter(
        &unit,
        Team::Player,
        PolarityBonus {
            attack: 0,
            health: 2,
        },
    );
    assert_eq!(cu.health, 0);
    assert!(cu.dead);
    assert!(!cu.is_alive());
}
