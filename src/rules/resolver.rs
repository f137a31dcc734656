//! Effect resolution.
//!
//! The resolver is the only writer of game state during play. It consumes
//! the [`Derived`] data validation produced and trusts it completely:
//! landing positions, prices, costs, and point values are never
//! recomputed here. Every mutation emits exactly one event; events are
//! timestamped in emission order from the state's monotonic counter.

use crate::core::{
    GameConfig, GameState, PassiveEffect, Player, PlayerId, Punishment, Rat, RatId, RatPosition,
    Resource, ShopItem, SpaceKind, TrackKind, TrackReward,
};
use crate::events::{Event, EventKind, GainSource, ScoreReason, SentHomeReason, SpendPurpose};
use crate::rules::validator::Derived;
use crate::scoring;

/// Stateless resolver over one config.
pub struct EffectResolver<'a> {
    config: &'a GameConfig,
}

impl<'a> EffectResolver<'a> {
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Apply a validated action's effects. Returns the events emitted,
    /// including a trailing `GameEnded` if this action ended the game.
    pub fn resolve(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        derived: &Derived,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        match derived {
            Derived::Move { landings, .. } => {
                for &(rat, index) in landings {
                    self.resolve_landing(state, actor, rat, index, &mut events);
                }
            }
            Derived::Buy {
                shop,
                item,
                payer,
                price,
            } => {
                self.spend(state, actor, price, SpendPurpose::Buy(*item), &mut events);
                self.grant_item(state, actor, *item, &mut events);
                events.push(Event::new(
                    EventKind::ShopBought {
                        shop: *shop,
                        item: *item,
                        rat: *payer,
                    },
                    Some(actor),
                ));
            }
            Derived::Steal {
                shop,
                item,
                thief,
                punishment,
            } => {
                self.grant_item(state, actor, *item, &mut events);
                events.push(Event::new(
                    EventKind::ShopStolen {
                        shop: *shop,
                        item: *item,
                        rat: *thief,
                    },
                    Some(actor),
                ));
                match punishment {
                    Punishment::SendHome => {
                        let home = state.board.start_index;
                        let player = player_mut(state, actor);
                        if let Some(rat) = player.rat_mut(*thief) {
                            rat.position = RatPosition::OnBoard(home);
                        }
                        events.push(Event::new(
                            EventKind::SentHome {
                                rat: *thief,
                                reason: SentHomeReason::Theft,
                            },
                            Some(actor),
                        ));
                    }
                }
            }
            Derived::Build {
                part,
                cost,
                immediate_points,
            } => {
                self.spend(state, actor, cost, SpendPurpose::Build(*part), &mut events);
                state.rocket.build(*part, actor);
                player_mut(state, actor).built_parts.insert(*part);
                events.push(Event::new(
                    EventKind::PartBuilt {
                        part: *part,
                        immediate_points: *immediate_points,
                    },
                    Some(actor),
                ));
                if *immediate_points > 0 {
                    self.score(
                        state,
                        actor,
                        *immediate_points,
                        ScoreReason::PartBuilt(*part),
                        &mut events,
                    );
                }
            }
            Derived::Donate { amount, points } => {
                let player = player_mut(state, actor);
                player.inventory.remove(Resource::Cheese, *amount);
                events.push(Event::new(
                    EventKind::ResourceSpent {
                        resource: Resource::Cheese,
                        amount: *amount,
                        purpose: SpendPurpose::Donation,
                    },
                    Some(actor),
                ));
                events.push(Event::new(
                    EventKind::CheeseDonated {
                        amount: *amount,
                        points: *points,
                    },
                    Some(actor),
                ));
                self.score(
                    state,
                    actor,
                    *points,
                    ScoreReason::Donation { amount: *amount },
                    &mut events,
                );
            }
            Derived::EndTurn => {
                events.push(Event::new(
                    EventKind::TurnEnded { round: state.round },
                    Some(actor),
                ));
                state.advance_turn();
            }
        }

        for ev in &mut events {
            ev.timestamp = state.take_timestamp();
        }

        if let Some(game_end) = scoring::check_and_finalize(state, self.config) {
            events.push(game_end);
        }

        events
    }

    /// Move one rat to its landing and apply the space's effect.
    fn resolve_landing(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        rat: RatId,
        index: usize,
        events: &mut Vec<Event>,
    ) {
        {
            let player = player_mut(state, actor);
            if let Some(r) = player.rat_mut(rat) {
                r.position = RatPosition::OnBoard(index);
            }
        }

        let kind = state.board.space(index).kind;
        match kind {
            SpaceKind::Resource { resource, amount } => {
                self.gain_resource(state, actor, resource, amount, events);
            }
            SpaceKind::LightbulbTrack { gain } => {
                let new_level = player_mut(state, actor).advance_track(TrackKind::Lightbulb, gain);
                events.push(Event::new(
                    EventKind::TrackAdvanced {
                        track: TrackKind::Lightbulb,
                        new_level,
                    },
                    Some(actor),
                ));
                if let Some(TrackReward::Immediate { points }) =
                    self.config.track_rewards.get(&new_level)
                {
                    self.score(
                        state,
                        actor,
                        *points,
                        ScoreReason::TrackLevel { level: new_level },
                        events,
                    );
                }
            }
            SpaceKind::LaunchPad => {
                let spawn = {
                    let player = player_mut(state, actor);
                    if let Some(r) = player.rat_mut(rat) {
                        r.position = RatPosition::OnRocket;
                    }
                    player.rats.len() < self.config.max_rats
                };
                events.push(Event::new(EventKind::RatBoarded { rat }, Some(actor)));
                if spawn {
                    let id = state.alloc_rat_id();
                    let home = state.board.start_index;
                    player_mut(state, actor).rats.push(Rat::new(id, actor, home));
                    events.push(Event::new(EventKind::NewRatGained { rat: id }, Some(actor)));
                }
            }
            // No landing effect.
            SpaceKind::Start
            | SpaceKind::Shop(_)
            | SpaceKind::Shortcut
            | SpaceKind::Hazard => {}
        }
    }

    /// Grant a resource-space gain: passive bonus, one-shot doubling,
    /// then capacity clamping. A gain clamped to zero emits nothing.
    fn gain_resource(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        resource: Resource,
        amount: u32,
        events: &mut Vec<Event>,
    ) {
        let extra = if self.has_passive(state, actor, PassiveEffect::ExtraResource) {
            1
        } else {
            0
        };
        let player = player_mut(state, actor);

        let mut gain = amount + extra;
        if player.inventory.x2_active {
            gain *= 2;
            player.inventory.x2_active = false;
            events.push(Event::new(
                EventKind::InventoryChanged {
                    capacity_delta: 0,
                    x2_activated: false,
                    x2_consumed: true,
                    bottlecap_delta: 0,
                },
                Some(actor),
            ));
        }

        let granted = gain.min(player.inventory.free_space());
        if granted > 0 {
            player.inventory.add(resource, granted);
            events.push(Event::new(
                EventKind::ResourceGained {
                    resource,
                    amount: granted,
                    source: GainSource::Space,
                },
                Some(actor),
            ));
        }
    }

    fn has_passive(&self, state: &GameState, actor: PlayerId, effect: PassiveEffect) -> bool {
        let level = match state.player(actor) {
            Some(p) => p.track_level(TrackKind::Lightbulb),
            None => return false,
        };
        self.config.track_rewards.iter().any(|(&at, reward)| {
            level >= at && matches!(reward, TrackReward::Passive { effect: e } if *e == effect)
        })
    }

    fn spend(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        cost: &[(Resource, u32)],
        purpose: SpendPurpose,
        events: &mut Vec<Event>,
    ) {
        let player = player_mut(state, actor);
        for &(resource, amount) in cost {
            player.inventory.remove(resource, amount);
            events.push(Event::new(
                EventKind::ResourceSpent {
                    resource,
                    amount,
                    purpose,
                },
                Some(actor),
            ));
        }
    }

    /// Apply a shop good and emit the inventory change it caused.
    fn grant_item(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        item: ShopItem,
        events: &mut Vec<Event>,
    ) {
        let player = player_mut(state, actor);
        let kind = match item {
            ShopItem::Capacity => {
                player.inventory.capacity += 1;
                EventKind::InventoryChanged {
                    capacity_delta: 1,
                    x2_activated: false,
                    x2_consumed: false,
                    bottlecap_delta: 0,
                }
            }
            ShopItem::DoubleNext => {
                player.inventory.x2_active = true;
                EventKind::InventoryChanged {
                    capacity_delta: 0,
                    x2_activated: true,
                    x2_consumed: false,
                    bottlecap_delta: 0,
                }
            }
            ShopItem::Bottlecap => {
                player.inventory.bottlecaps += 1;
                EventKind::InventoryChanged {
                    capacity_delta: 0,
                    x2_activated: false,
                    x2_consumed: false,
                    bottlecap_delta: 1,
                }
            }
        };
        events.push(Event::new(kind, Some(actor)));
    }

    fn score(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        points: u32,
        reason: ScoreReason,
        events: &mut Vec<Event>,
    ) {
        let player = player_mut(state, actor);
        player.score += points;
        events.push(Event::new(
            EventKind::ScoreChanged {
                points,
                reason,
                new_total: player.score,
            },
            Some(actor),
        ));
    }
}

/// The resolver only runs after validation confirmed the actor exists.
fn player_mut(state: &mut GameState, actor: PlayerId) -> &mut Player {
    state
        .player_mut(actor)
        .expect("actor validated before resolution")
}
