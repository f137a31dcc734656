//! Action validation.
//!
//! Validation is pure: it reads the state and config, never mutates, and
//! produces either a typed rejection or the [`Derived`] data resolution
//! consumes. Everything the resolver needs that is computed from the
//! action (landing positions, prices, costs, point values) is computed
//! here exactly once; the resolver trusts it and recomputes nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Action, Color, GameConfig, GameState, PlayerId, Punishment, RatId, Resource, RocketPart,
    ShopItem, ShopKind, SpaceKind,
};
use crate::error::RuleViolation;

/// Validation output: the action's derived data, ready for resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Derived {
    Move {
        /// (rat, landing index) in action order, shortcut-redirected and
        /// clamped.
        landings: SmallVec<[(RatId, usize); 4]>,
        /// The single color all landings share.
        color: Color,
    },
    Buy {
        shop: ShopKind,
        item: ShopItem,
        payer: RatId,
        price: Vec<(Resource, u32)>,
    },
    Steal {
        shop: ShopKind,
        item: ShopItem,
        thief: RatId,
        punishment: Punishment,
    },
    Build {
        part: RocketPart,
        cost: Vec<(Resource, u32)>,
        immediate_points: u32,
    },
    Donate { amount: u32, points: u32 },
    EndTurn,
}

/// Stateless validator over one config.
pub struct ActionValidator<'a> {
    config: &'a GameConfig,
}

impl<'a> ActionValidator<'a> {
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Validate `action` by `actor` against `state`.
    pub fn validate(
        &self,
        state: &GameState,
        actor: PlayerId,
        action: &Action,
    ) -> Result<Derived, RuleViolation> {
        let player = state
            .player(actor)
            .ok_or(RuleViolation::UnknownPlayer(actor))?;
        if actor.index() != state.current_player {
            return Err(RuleViolation::NotYourTurn(actor));
        }
        if state.game_over {
            return Err(RuleViolation::GameOver);
        }

        match action {
            Action::Move { moves } => self.validate_move(state, actor, moves),
            Action::Buy { shop, item, payer } => {
                self.validate_buy(state, actor, *shop, *item, *payer)
            }
            Action::Steal { shop, item, thief } => {
                self.validate_steal(state, actor, *shop, *item, *thief)
            }
            Action::BuildRocket { part } => self.validate_build(state, player, *part),
            Action::DonateCheese { amount } => self.validate_donate(player, u32::from(*amount)),
            Action::EndTurn => Ok(Derived::EndTurn),
        }
    }

    fn validate_move(
        &self,
        state: &GameState,
        actor: PlayerId,
        moves: &[(RatId, u8)],
    ) -> Result<Derived, RuleViolation> {
        if moves.is_empty() {
            return Err(RuleViolation::EmptyMove);
        }
        if moves.len() > self.config.max_group_size {
            return Err(RuleViolation::BadRatCount { count: moves.len() });
        }
        if moves.len() == 1 {
            let (_, steps) = moves[0];
            if steps == 0 || steps > self.config.max_single_steps {
                return Err(RuleViolation::SingleRatSteps { steps });
            }
        } else {
            for &(rat, steps) in moves {
                if steps == 0 || steps > self.config.max_group_steps {
                    return Err(RuleViolation::GroupRatSteps { rat, steps });
                }
            }
        }
        for (i, &(rat, _)) in moves.iter().enumerate() {
            if moves[..i].iter().any(|&(other, _)| other == rat) {
                return Err(RuleViolation::DuplicateRat { rat });
            }
        }

        let player = state.player(actor).expect("actor checked above");
        let board = &state.board;

        let mut landings: SmallVec<[(RatId, usize); 4]> = SmallVec::new();
        for &(rat_id, steps) in moves {
            let rat = player
                .rat(rat_id)
                .filter(|r| r.is_on_board())
                .ok_or(RuleViolation::RatUnavailable { rat: rat_id })?;
            let from = rat.board_index().expect("rat is on board");
            landings.push((rat_id, board.next_index(from, usize::from(steps))));
        }

        let color = board.space(landings[0].1).color;
        for &(_, index) in &landings {
            let landing_color = board.space(index).color;
            if landing_color != color {
                return Err(RuleViolation::ColorMismatch {
                    first: color,
                    second: landing_color,
                });
            }
        }

        // One rat per space, with no exemptions: rats already taking part
        // in this move vacate their spaces, everyone else blocks.
        let moving: SmallVec<[RatId; 4]> = moves.iter().map(|&(rat, _)| rat).collect();
        for &(_, index) in &landings {
            let occupant = state
                .board_rats()
                .filter(|r| !moving.contains(&r.id))
                .find(|r| r.board_index() == Some(index));
            if let Some(occupant) = occupant {
                return Err(RuleViolation::SpaceOccupied {
                    index,
                    by: occupant.id,
                });
            }
        }
        for (i, &(_, index)) in landings.iter().enumerate() {
            if landings[..i].iter().any(|&(_, other)| other == index) {
                return Err(RuleViolation::LandingConflict { index });
            }
        }

        Ok(Derived::Move { landings, color })
    }

    fn rat_at_shop(
        &self,
        state: &GameState,
        actor: PlayerId,
        rat_id: RatId,
        shop: ShopKind,
    ) -> Result<(), RuleViolation> {
        let player = state.player(actor).expect("actor checked above");
        let rat = player
            .rat(rat_id)
            .filter(|r| r.is_on_board())
            .ok_or(RuleViolation::RatUnavailable { rat: rat_id })?;
        let index = rat.board_index().expect("rat is on board");
        match state.board.space(index).kind {
            SpaceKind::Shop(kind) if kind == shop => Ok(()),
            _ => Err(RuleViolation::NotAtShop { rat: rat_id, shop }),
        }
    }

    fn check_affordable(
        player: &crate::core::Player,
        cost: &[(Resource, u32)],
    ) -> Result<(), RuleViolation> {
        for &(resource, need) in cost {
            let have = player.inventory.count(resource);
            if have < need {
                return Err(RuleViolation::InsufficientResources {
                    resource,
                    need,
                    have,
                });
            }
        }
        Ok(())
    }

    fn validate_buy(
        &self,
        state: &GameState,
        actor: PlayerId,
        shop: ShopKind,
        item: ShopItem,
        payer: RatId,
    ) -> Result<Derived, RuleViolation> {
        self.rat_at_shop(state, actor, payer, shop)?;
        if item.sold_at() != shop {
            return Err(RuleViolation::WrongShopItem { shop, item });
        }
        let player = state.player(actor).expect("actor checked above");
        if item == ShopItem::DoubleNext && player.inventory.x2_active {
            return Err(RuleViolation::DoubleAlreadyActive);
        }
        let price = self
            .config
            .prices
            .get(&shop)
            .ok_or(RuleViolation::UnpricedShop(shop))?;
        Self::check_affordable(player, price)?;

        Ok(Derived::Buy {
            shop,
            item,
            payer,
            price: price.clone(),
        })
    }

    fn validate_steal(
        &self,
        state: &GameState,
        actor: PlayerId,
        shop: ShopKind,
        item: ShopItem,
        thief: RatId,
    ) -> Result<Derived, RuleViolation> {
        self.rat_at_shop(state, actor, thief, shop)?;
        let rule = self
            .config
            .steal_rules
            .get(&shop)
            .ok_or(RuleViolation::StealNotAllowed(shop))?;
        if item != rule.gain {
            return Err(RuleViolation::WrongShopItem { shop, item });
        }
        let player = state.player(actor).expect("actor checked above");
        if item == ShopItem::DoubleNext && player.inventory.x2_active {
            return Err(RuleViolation::DoubleAlreadyActive);
        }

        Ok(Derived::Steal {
            shop,
            item,
            thief,
            punishment: rule.punishment,
        })
    }

    fn validate_build(
        &self,
        state: &GameState,
        player: &crate::core::Player,
        part: RocketPart,
    ) -> Result<Derived, RuleViolation> {
        if let Some(builder) = state.rocket.builder(part) {
            return Err(RuleViolation::PartAlreadyBuilt { part, builder });
        }
        let cost = self
            .config
            .part_costs
            .get(&part)
            .ok_or(RuleViolation::UnknownPartCost(part))?;
        Self::check_affordable(player, cost)?;

        Ok(Derived::Build {
            part,
            cost: cost.clone(),
            immediate_points: self.config.part_scores.get(&part).copied().unwrap_or(0),
        })
    }

    fn validate_donate(
        &self,
        player: &crate::core::Player,
        amount: u32,
    ) -> Result<Derived, RuleViolation> {
        let points = self
            .config
            .donation_points
            .get(&amount)
            .copied()
            .ok_or(RuleViolation::InvalidDonation { amount })?;
        let have = player.inventory.count(Resource::Cheese);
        if have < amount {
            return Err(RuleViolation::InsufficientResources {
                resource: Resource::Cheese,
                need: amount,
                have,
            });
        }

        Ok(Derived::Donate { amount, points })
    }
}
