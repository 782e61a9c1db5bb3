use alloc::string::{String, ToString};
use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::keywords::Capabilities;
use crate::rules::{PolarityBonus, COLLAPSE_ENTROPY, STRAIN_ATTACK_PENALTY, STRAIN_ENTROPY};

/// Unique identifier for a unit instance
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of the combat a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Player => "PLAYER",
            Team::Enemy => "ENEMY",
        }
    }
}

/// Combat keywords. Behaviour lives in [`crate::keywords`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum Keyword {
    /// Must be targeted before any other living unit.
    Taunt,
    /// Acts before non-haste units in the turn order.
    Haste,
    /// Deals +1 counter-damage to attackers.
    Retaliate,
    /// Heals 1 on a kill.
    Leech,
}

/// Immutable unit definition supplied by the data catalog
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct UnitTemplate {
    pub template_id: String,
    pub name: String,
    pub attack: i32,
    pub health: i32,
    /// 0 leans Order, 100 leans Chaos.
    pub polarity: u8,
    pub cost: i32,
    pub keyword: Option<Keyword>,
    pub tier: u8,
}

impl UnitTemplate {
    pub fn new(template_id: &str, name: &str, attack: i32, health: i32, polarity: u8) -> Self {
        Self {
            template_id: template_id.to_string(),
            name: name.to_string(),
            attack,
            health,
            polarity: polarity.min(100),
            cost: 0,
            keyword: None,
            tier: 1,
        }
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keyword = Some(keyword);
        self
    }

    pub fn with_cost(mut self, cost: i32, tier: u8) -> Self {
        self.cost = cost;
        self.tier = tier;
        self
    }
}

/// Permanent stat choice offered when a unit levels up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum LevelChoice {
    Attack,
    Health,
}

/// A unit instance on the campaign board
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct BoardUnit {
    pub id: UnitId,
    /// Template stats; attack and health grow with level-ups.
    pub card: UnitTemplate,
    pub current_health: i32,
    pub max_health: i32,
    pub entropy: u32,
    pub xp: u8,
    pub level: u32,
    pub dead: bool,
}

impl BoardUnit {
    pub fn from_template(id: UnitId, card: UnitTemplate) -> Self {
        let health = card.health;
        Self {
            id,
            card,
            current_health: health,
            max_health: health,
            entropy: 0,
            xp: 0,
            level: 1,
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.current_health > 0
    }

    pub fn level_up(&mut self, choice: LevelChoice) {
        self.level += 1;
        match choice {
            LevelChoice::Attack => self.card.attack += 1,
            LevelChoice::Health => {
                self.card.health += 1;
                self.max_health = self.card.health;
                self.current_health = (self.current_health + 1).min(self.max_health);
            }
        }
    }
}

/// A combat-scoped copy of a unit. Never outlives its encounter.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct CombatUnit {
    pub id: UnitId,
    pub team: Team,
    pub template_id: String,
    pub name: String,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub polarity: u8,
    pub keyword: Option<Keyword>,
    pub dead: bool,
}

impl CombatUnit {
    /// Builds the combat copy of a board unit with its side's polarity bonus.
    /// Entropy at the collapse threshold enters dead; strained units lose attack.
    pub fn enter(unit: &BoardUnit, team: Team, bonus: PolarityBonus) -> Self {
        let mut cu = Self {
            id: unit.id,
            team,
            template_id: unit.card.template_id.clone(),
            name: unit.card.name.clone(),
            attack: unit.card.attack + bonus.attack,
            health: unit.current_health + bonus.health,
            max_health: unit.max_health + bonus.health,
            polarity: unit.card.polarity,
            keyword: unit.card.keyword,
            dead: false,
        };

        if unit.entropy >= COLLAPSE_ENTROPY {
            cu.health = 0;
            cu.dead = true;
        } else {
            let penalty = if unit.entropy >= STRAIN_ENTROPY {
                STRAIN_ATTACK_PENALTY
            } else {
                0
            };
            cu.attack = (cu.attack - penalty).max(0);
        }
        cu
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.health > 0
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        Capabilities::of(self.keyword)
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keyword == Some(keyword)
    }

    /// Applies damage outside an exchange and settles the death flag at once.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.dead = true;
        }
    }
}

/// Reference to a combat unit on a specific side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct UnitRef {
    pub team: Team,
    pub id: UnitId,
}

impl UnitRef {
    pub fn new(team: Team, id: UnitId) -> Self {
        Self { team, id }
    }
}

/// Intervention cards. A closed set; effects are dispatched on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum CardKind {
    Redirect,
    Bulwark,
    Surge,
    Drain,
    Unravel,
}

/// What an intervention card must be aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum CardTarget {
    Enemy,
    Friendly,
    Untargeted,
}

impl CardTarget {
    pub fn accepts(self, team: Team) -> bool {
        match self {
            CardTarget::Enemy => team == Team::Enemy,
            CardTarget::Friendly => team == Team::Player,
            CardTarget::Untargeted => false,
        }
    }
}

/// Catalog entry for an intervention card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct InterventionCard {
    pub kind: CardKind,
    pub name: String,
    pub target: CardTarget,
    pub description: String,
}

impl InterventionCard {
    pub fn new(kind: CardKind, name: &str, target: CardTarget, description: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            target,
            description: description.to_string(),
        }
    }
}

/// Reward banked by holding instead of intervening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum HoldChoice {
    Gold,
    Insight,
}

/// Terminal result of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum CombatResult {
    Win,
    Loss,
    Draw,
}

impl CombatResult {
    /// Scores a finished board. Both sides standing (stalemate guard) is a draw.
    pub fn from_survivors(player_alive: bool, enemy_alive: bool) -> Self {
        match (player_alive, enemy_alive) {
            (true, false) => CombatResult::Win,
            (false, true) => CombatResult::Loss,
            _ => CombatResult::Draw,
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            CombatResult::Win => "Victory, your board holds.",
            CombatResult::Loss => "Defeat. Entropy spreads.",
            CombatResult::Draw => "Draw, both sides fall.",
        }
    }
}
