//! Game configuration.
//!
//! Every tunable number in the rules lives here: board layout, shop
//! prices, steal rules, rocket part costs and scores, the donation table,
//! lightbulb track rewards, endgame triggers, and scoring switches. The
//! rules layer reads the config and hardcodes nothing, so tests build
//! small boards and skewed price tables through the `with_*` methods.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::ShopItem;
use super::board::{Color, ShopKind, SpaceKind};
use super::inventory::Resource;
use super::rocket::RocketPart;

/// One board cell as configured; `Board` adds the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSpec {
    pub color: Color,
    pub kind: SpaceKind,
}

/// What reaching a track level grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackReward {
    /// Score points right away.
    Immediate { points: u32 },
    /// Grant a lasting effect instead of points.
    Passive { effect: PassiveEffect },
}

/// Passive effects granted by track rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveEffect {
    /// Resource spaces grant one extra unit to this player.
    ExtraResource,
}

/// What a thief gains and suffers at one shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealRule {
    pub gain: ShopItem,
    pub punishment: Punishment,
}

/// What happens to a thief.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Punishment {
    /// The thieving rat returns to the start space.
    SendHome,
}

/// Thresholds that end the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndgameTriggers {
    /// One player's rats aboard the rocket.
    pub rats_on_rocket: usize,
    /// Built rocket parts, game-wide.
    pub scoring_markers: usize,
}

/// Which components count at final scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub rocket_parts: bool,
    /// Points per bottlecap.
    pub bottlecap_points: u32,
    pub lightbulb_track: bool,
    /// Half a point per remaining resource unit, rounded down.
    pub remaining_resources: bool,
}

/// Complete rule parameterization for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ordered board cells; index 0 is the start, the last is the launch
    /// pad in the standard layout.
    pub board_layout: Vec<SpaceSpec>,
    pub start_index: usize,
    pub launch_index: usize,
    /// Raw-landing redirects applied before clamping.
    pub shortcuts: FxHashMap<usize, usize>,

    pub starting_rats: usize,
    pub max_rats: usize,
    pub starting_capacity: u32,

    /// Step caps for moves: one rat alone, or each rat in a group of 2+.
    pub max_single_steps: u8,
    pub max_group_steps: u8,
    pub max_group_size: usize,

    /// Prices per shop, in deterministic order.
    pub prices: FxHashMap<ShopKind, Vec<(Resource, u32)>>,
    pub steal_rules: FxHashMap<ShopKind, StealRule>,

    pub part_costs: FxHashMap<RocketPart, Vec<(Resource, u32)>>,
    pub part_scores: FxHashMap<RocketPart, u32>,

    /// Cheese donated -> points scored. Amounts outside the table are
    /// invalid actions.
    pub donation_points: FxHashMap<u32, u32>,

    /// Lightbulb track level -> reward, for levels that grant one.
    pub track_rewards: FxHashMap<u32, TrackReward>,

    pub endgame: EndgameTriggers,
    pub scoring: ScoringRules,
}

impl GameConfig {
    /// The standard 60-space game.
    #[must_use]
    pub fn standard() -> Self {
        let mut prices = FxHashMap::default();
        prices.insert(ShopKind::Mole, vec![(Resource::TinCan, 2)]);
        prices.insert(ShopKind::Frog, vec![(Resource::Soda, 2)]);
        prices.insert(ShopKind::Crow, vec![(Resource::Cheese, 2)]);

        let mut steal_rules = FxHashMap::default();
        for (shop, gain) in [
            (ShopKind::Mole, ShopItem::Capacity),
            (ShopKind::Frog, ShopItem::DoubleNext),
            (ShopKind::Crow, ShopItem::Bottlecap),
        ] {
            steal_rules.insert(
                shop,
                StealRule {
                    gain,
                    punishment: Punishment::SendHome,
                },
            );
        }

        let mut part_costs = FxHashMap::default();
        part_costs.insert(
            RocketPart::Nose,
            vec![(Resource::TinCan, 3), (Resource::Cheese, 1)],
        );
        part_costs.insert(
            RocketPart::Tank,
            vec![(Resource::TinCan, 2), (Resource::Soda, 2)],
        );
        part_costs.insert(
            RocketPart::Engine,
            vec![(Resource::TinCan, 4), (Resource::Lightbulb, 1)],
        );
        part_costs.insert(
            RocketPart::FinA,
            vec![(Resource::TinCan, 1), (Resource::Soda, 1)],
        );
        part_costs.insert(
            RocketPart::FinB,
            vec![(Resource::TinCan, 1), (Resource::Cheese, 2)],
        );

        let mut part_scores = FxHashMap::default();
        part_scores.insert(RocketPart::Nose, 4);
        part_scores.insert(RocketPart::Tank, 3);
        part_scores.insert(RocketPart::Engine, 5);
        part_scores.insert(RocketPart::FinA, 2);
        part_scores.insert(RocketPart::FinB, 3);

        let mut donation_points = FxHashMap::default();
        donation_points.insert(1, 1);
        donation_points.insert(2, 3);
        donation_points.insert(3, 6);
        donation_points.insert(4, 10);

        let mut track_rewards = FxHashMap::default();
        track_rewards.insert(1, TrackReward::Immediate { points: 1 });
        track_rewards.insert(2, TrackReward::Immediate { points: 2 });
        track_rewards.insert(3, TrackReward::Immediate { points: 3 });
        track_rewards.insert(
            4,
            TrackReward::Passive {
                effect: PassiveEffect::ExtraResource,
            },
        );
        track_rewards.insert(5, TrackReward::Immediate { points: 5 });

        let board_layout = standard_board_layout();
        let launch_index = board_layout.len() - 1;

        Self {
            board_layout,
            start_index: 0,
            launch_index,
            shortcuts: FxHashMap::default(),
            starting_rats: 2,
            max_rats: 4,
            starting_capacity: 3,
            max_single_steps: 5,
            max_group_steps: 3,
            max_group_size: 4,
            prices,
            steal_rules,
            part_costs,
            part_scores,
            donation_points,
            track_rewards,
            endgame: EndgameTriggers {
                rats_on_rocket: 4,
                scoring_markers: 8,
            },
            scoring: ScoringRules {
                rocket_parts: true,
                bottlecap_points: 1,
                lightbulb_track: true,
                remaining_resources: false,
            },
        }
    }

    /// Replace the board with a custom layout. Test helper.
    #[must_use]
    pub fn with_board(mut self, layout: Vec<SpaceSpec>, start: usize, launch: usize) -> Self {
        self.board_layout = layout;
        self.start_index = start;
        self.launch_index = launch;
        self.shortcuts.clear();
        self
    }

    /// Add one shortcut redirect. Test helper.
    #[must_use]
    pub fn with_shortcut(mut self, from: usize, to: usize) -> Self {
        self.shortcuts.insert(from, to);
        self
    }

    #[must_use]
    pub fn with_starting_capacity(mut self, capacity: u32) -> Self {
        self.starting_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_starting_rats(mut self, rats: usize) -> Self {
        self.starting_rats = rats;
        self
    }

    #[must_use]
    pub fn with_endgame(mut self, endgame: EndgameTriggers) -> Self {
        self.endgame = endgame;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard layout: green start, blue launch pad, and a repeating
/// 20-space pattern between them.
fn standard_board_layout() -> Vec<SpaceSpec> {
    let spec = |color, kind| SpaceSpec { color, kind };
    let res = |resource, amount| SpaceKind::Resource { resource, amount };
    let shop = |kind| SpaceKind::Shop(kind);
    let track = SpaceKind::LightbulbTrack { gain: 1 };

    let pattern: [SpaceSpec; 20] = [
        spec(Color::Yellow, res(Resource::Cheese, 1)),
        spec(Color::Red, res(Resource::TinCan, 1)),
        spec(Color::Blue, shop(ShopKind::Mole)),
        spec(Color::Green, res(Resource::Soda, 1)),
        spec(Color::Yellow, track),
        spec(Color::Red, res(Resource::Lightbulb, 1)),
        spec(Color::Blue, res(Resource::Cheese, 1)),
        spec(Color::Green, shop(ShopKind::Frog)),
        spec(Color::Yellow, res(Resource::TinCan, 1)),
        spec(Color::Red, res(Resource::Soda, 1)),
        spec(Color::Blue, res(Resource::Lightbulb, 1)),
        spec(Color::Green, shop(ShopKind::Crow)),
        spec(Color::Yellow, res(Resource::Cheese, 1)),
        spec(Color::Red, track),
        spec(Color::Blue, res(Resource::TinCan, 1)),
        spec(Color::Green, res(Resource::Soda, 1)),
        spec(Color::Yellow, res(Resource::Lightbulb, 1)),
        spec(Color::Red, shop(ShopKind::Mole)),
        spec(Color::Blue, res(Resource::Cheese, 1)),
        spec(Color::Green, res(Resource::TinCan, 1)),
    ];

    let mut layout = Vec::with_capacity(60);
    layout.push(spec(Color::Green, SpaceKind::Start));
    for i in 1..59 {
        layout.push(pattern[(i - 1) % pattern.len()]);
    }
    layout.push(spec(Color::Blue, SpaceKind::LaunchPad));
    layout
}
