//! Action representation: the closed set of player verbs.
//!
//! Actions are pure data describing intent. They carry no derived
//! information (no landing positions, no prices); validation computes that
//! and hands it to resolution. The enum is closed: the rules layer matches
//! on it exhaustively, so adding a variant is a compile-time event across
//! the whole crate.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::ShopKind;
use super::player::RatId;
use super::rocket::RocketPart;

/// A purchasable (or stealable) shop good.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    /// +1 inventory capacity, from the mole.
    Capacity,
    /// One-shot double-next-gain drink, from the frog.
    DoubleNext,
    /// One bottlecap, from the crow.
    Bottlecap,
}

impl ShopItem {
    /// The shop that stocks this item.
    #[must_use]
    pub const fn sold_at(self) -> ShopKind {
        match self {
            ShopItem::Capacity => ShopKind::Mole,
            ShopItem::DoubleNext => ShopKind::Frog,
            ShopItem::Bottlecap => ShopKind::Crow,
        }
    }
}

impl std::fmt::Display for ShopItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShopItem::Capacity => "capacity",
            ShopItem::DoubleNext => "double-next",
            ShopItem::Bottlecap => "bottlecap",
        };
        write!(f, "{name}")
    }
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use rocket_rats::core::{Action, RatId};
///
/// // Move one rat 4 steps.
/// let single = Action::single_move(RatId::new(0), 4);
///
/// // Move three rats together, up to 3 steps each.
/// let group = Action::multi_move(&[
///     (RatId::new(0), 2),
///     (RatId::new(1), 3),
///     (RatId::new(2), 1),
/// ]);
/// assert_ne!(single, group);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Move 1 rat 1-5 steps, or 2-4 rats 1-3 steps each.
    Move {
        /// (rat, steps) pairs. SmallVec keeps the common 1-4 rat case
        /// off the heap.
        moves: SmallVec<[(RatId, u8); 4]>,
    },
    /// Buy an item at a shop; `payer` must stand on that shop.
    Buy {
        shop: ShopKind,
        item: ShopItem,
        payer: RatId,
    },
    /// Steal from a shop instead of paying. The thief gets sent home.
    Steal {
        shop: ShopKind,
        item: ShopItem,
        thief: RatId,
    },
    /// Spend resources to build one rocket part.
    BuildRocket { part: RocketPart },
    /// Donate 1-4 cheese for immediate points.
    DonateCheese { amount: u8 },
    /// End the turn without further effect.
    EndTurn,
}

impl Action {
    /// Move one rat `steps` spaces.
    #[must_use]
    pub fn single_move(rat: RatId, steps: u8) -> Self {
        Action::Move {
            moves: SmallVec::from_slice(&[(rat, steps)]),
        }
    }

    /// Move several rats together.
    #[must_use]
    pub fn multi_move(moves: &[(RatId, u8)]) -> Self {
        Action::Move {
            moves: SmallVec::from_slice(moves),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Buy { .. } => "buy",
            Action::Steal { .. } => "steal",
            Action::BuildRocket { .. } => "build_rocket",
            Action::DonateCheese { .. } => "donate_cheese",
            Action::EndTurn => "end_turn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_shop_mapping() {
        assert_eq!(ShopItem::Capacity.sold_at(), ShopKind::Mole);
        assert_eq!(ShopItem::DoubleNext.sold_at(), ShopKind::Frog);
        assert_eq!(ShopItem::Bottlecap.sold_at(), ShopKind::Crow);
    }

    #[test]
    fn test_move_constructors() {
        let single = Action::single_move(RatId::new(3), 5);
        match &single {
            Action::Move { moves } => {
                assert_eq!(moves.as_slice(), &[(RatId::new(3), 5)]);
            }
            other => panic!("unexpected action {other:?}"),
        }

        let multi = Action::multi_move(&[(RatId::new(0), 1), (RatId::new(1), 2)]);
        match &multi {
            Action::Move { moves } => assert_eq!(moves.len(), 2),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Action::EndTurn.kind_name(), "end_turn");
        assert_eq!(
            Action::BuildRocket {
                part: RocketPart::Nose
            }
            .kind_name(),
            "build_rocket"
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let actions = vec![
            Action::multi_move(&[(RatId::new(0), 2), (RatId::new(4), 3)]),
            Action::Buy {
                shop: ShopKind::Mole,
                item: ShopItem::Capacity,
                payer: RatId::new(1),
            },
            Action::Steal {
                shop: ShopKind::Crow,
                item: ShopItem::Bottlecap,
                thief: RatId::new(2),
            },
            Action::BuildRocket {
                part: RocketPart::FinA,
            },
            Action::DonateCheese { amount: 3 },
            Action::EndTurn,
        ];

        for action in actions {
            let json = serde_json::to_string(&action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(action, back);
        }
    }
}
