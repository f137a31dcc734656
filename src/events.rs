//! Events: the facts emitted by effect resolution.
//!
//! Every state mutation the resolver performs is mirrored by exactly one
//! event, so the event stream of a history entry is a complete account of
//! what that action did. Events are facts, not commands: consumers replay
//! or display them but never apply them.
//!
//! Timestamps come from a state-owned monotonic counter, stamped once per
//! event in emission order. Wall-clock time never enters the engine.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, RatId, Resource, RocketPart, ShopItem, ShopKind, TrackKind};
use crate::scoring::EndTrigger;

/// Where a resource gain came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainSource {
    /// Landing on a resource space.
    Space,
}

/// What a resource spend paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendPurpose {
    Buy(ShopItem),
    Build(RocketPart),
    Donation,
}

/// Why a rat was sent back to the start space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentHomeReason {
    Theft,
}

/// Why a player's score changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    PartBuilt(RocketPart),
    Donation { amount: u32 },
    TrackLevel { level: u32 },
}

/// One emitted fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// The player the fact is about, when there is one.
    pub actor: Option<PlayerId>,
    /// Monotonic sequence number, unique per game.
    pub timestamp: u64,
}

impl Event {
    /// Create an unstamped event; the resolver stamps timestamps in one
    /// pass after all events for an action exist.
    #[must_use]
    pub fn new(kind: EventKind, actor: Option<PlayerId>) -> Self {
        Self {
            kind,
            actor,
            timestamp: 0,
        }
    }
}

/// The closed set of fact kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Resources entered an inventory. Only emitted when the granted
    /// amount is nonzero after capacity clamping.
    ResourceGained {
        resource: Resource,
        amount: u32,
        source: GainSource,
    },
    /// Resources left an inventory.
    ResourceSpent {
        resource: Resource,
        amount: u32,
        purpose: SpendPurpose,
    },
    /// A non-resource inventory property changed.
    InventoryChanged {
        capacity_delta: i32,
        x2_activated: bool,
        x2_consumed: bool,
        bottlecap_delta: u32,
    },
    /// A progress track advanced.
    TrackAdvanced { track: TrackKind, new_level: u32 },
    /// A shop purchase completed.
    ShopBought {
        shop: ShopKind,
        item: ShopItem,
        rat: RatId,
    },
    /// A shop theft completed.
    ShopStolen {
        shop: ShopKind,
        item: ShopItem,
        rat: RatId,
    },
    /// A rat was returned to the start space.
    SentHome { rat: RatId, reason: SentHomeReason },
    /// A rat boarded the rocket.
    RatBoarded { rat: RatId },
    /// A replacement rat appeared on the start space.
    NewRatGained { rat: RatId },
    /// A player's score increased.
    ScoreChanged {
        points: u32,
        reason: ScoreReason,
        new_total: u32,
    },
    /// A rocket part was built.
    PartBuilt {
        part: RocketPart,
        immediate_points: u32,
    },
    /// Cheese was donated for points.
    CheeseDonated { amount: u32, points: u32 },
    /// A turn ended; `round` is the round it belonged to.
    TurnEnded { round: u32 },
    /// The game ended.
    GameEnded {
        winners: Vec<PlayerId>,
        final_scores: Vec<(PlayerId, u32)>,
        trigger: EndTrigger,
    },
    /// Free-form diagnostic note.
    Log { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_unstamped() {
        let ev = Event::new(
            EventKind::TurnEnded { round: 3 },
            Some(PlayerId::new(1)),
        );

        assert_eq!(ev.timestamp, 0);
        assert_eq!(ev.actor, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let events = vec![
            Event::new(
                EventKind::ResourceGained {
                    resource: Resource::Cheese,
                    amount: 2,
                    source: GainSource::Space,
                },
                Some(PlayerId::new(0)),
            ),
            Event::new(
                EventKind::ScoreChanged {
                    points: 4,
                    reason: ScoreReason::PartBuilt(RocketPart::Nose),
                    new_total: 4,
                },
                Some(PlayerId::new(1)),
            ),
            Event::new(
                EventKind::GameEnded {
                    winners: vec![PlayerId::new(0)],
                    final_scores: vec![(PlayerId::new(0), 21), (PlayerId::new(1), 17)],
                    trigger: EndTrigger::FourthRatOnRocket,
                },
                None,
            ),
        ];

        for ev in events {
            let json = serde_json::to_string(&ev).unwrap();
            let back: Event = serde_json::from_str(&json).unwrap();
            assert_eq!(ev, back);
        }
    }
}
