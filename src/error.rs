//! Error types for the rules engine.
//!
//! Two disjoint failure classes:
//! - [`RuleViolation`]: the action was illegal; the state is untouched and
//!   play continues.
//! - [`InvariantViolation`]: the engine corrupted the state; the state has
//!   already been mutated and must be discarded.
//!
//! [`SetupError`] covers bad game-creation input and never appears during
//! play.

use thiserror::Error;

use crate::core::{Color, PlayerId, RatId, Resource, RocketPart, ShopItem, ShopKind};

/// An action rejected by validation. The state was not modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("the game is over; no further actions are accepted")]
    GameOver,

    #[error("a move must involve at least one rat")]
    EmptyMove,

    #[error("a single rat may move 1-5 steps, not {steps}")]
    SingleRatSteps { steps: u8 },

    #[error("{rat} may move 1-3 steps in a group, not {steps}")]
    GroupRatSteps { rat: RatId, steps: u8 },

    #[error("a move uses 1-4 rats, not {count}")]
    BadRatCount { count: usize },

    #[error("{rat} appears more than once in the move")]
    DuplicateRat { rat: RatId },

    #[error("{rat} is not available to move")]
    RatUnavailable { rat: RatId },

    #[error("all rats must land on the same color: got {first} and {second}")]
    ColorMismatch { first: Color, second: Color },

    #[error("space {index} is occupied by {by}")]
    SpaceOccupied { index: usize, by: RatId },

    #[error("two rats would land on space {index}")]
    LandingConflict { index: usize },

    #[error("{rat} is not at a {shop} shop")]
    NotAtShop { rat: RatId, shop: ShopKind },

    #[error("the {shop} shop does not sell {item}")]
    WrongShopItem { shop: ShopKind, item: ShopItem },

    #[error("need {need} {resource} but only have {have}")]
    InsufficientResources {
        resource: Resource,
        need: u32,
        have: u32,
    },

    #[error("a double-next drink is already active")]
    DoubleAlreadyActive,

    #[error("stealing is not possible at the {0} shop")]
    StealNotAllowed(ShopKind),

    #[error("part {part} was already built by {builder}")]
    PartAlreadyBuilt { part: RocketPart, builder: PlayerId },

    #[error("no cost is configured for part {0}")]
    UnknownPartCost(RocketPart),

    #[error("no price is configured for the {0} shop")]
    UnpricedShop(ShopKind),

    #[error("cannot donate {amount} cheese; only listed amounts are accepted")]
    InvalidDonation { amount: u32 },
}

/// A structural invariant broken after resolution. Always an engine bug;
/// the state that produced it is poisoned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{player} holds {total} resources over capacity {capacity}")]
    CapacityExceeded {
        player: PlayerId,
        total: u32,
        capacity: u32,
    },

    #[error("{player} has a zero-count entry for {resource}")]
    ZeroCountEntry {
        player: PlayerId,
        resource: Resource,
    },

    #[error("{rat} is at out-of-bounds space {index}")]
    RatOutOfBounds { rat: RatId, index: usize },

    #[error("current player index {index} does not address a player")]
    BadCurrentPlayer { index: usize },

    #[error("part {part} was built by unknown {builder}")]
    UnknownBuilder { part: RocketPart, builder: PlayerId },

    #[error("{player} is missing built part {part} recorded on the rocket")]
    MissingBuiltPart { player: PlayerId, part: RocketPart },

    #[error("{player} claims part {part} the rocket does not attribute to them")]
    PhantomBuiltPart { player: PlayerId, part: RocketPart },
}

/// Anything `apply` can fail with.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The action was rejected; the state is unchanged.
    #[error("action rejected: {0}")]
    Rejected(#[from] RuleViolation),

    /// The state is corrupt and must be discarded.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Bad input to game creation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game takes 2-4 players, not {0}")]
    BadPlayerCount(usize),

    #[error("duplicate player name: {0}")]
    DuplicateName(String),

    #[error("the board layout is empty")]
    EmptyBoard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mismatch_names_both_colors() {
        let err = RuleViolation::ColorMismatch {
            first: Color::Yellow,
            second: Color::Blue,
        };

        let msg = err.to_string();
        assert!(msg.contains("YELLOW"));
        assert!(msg.contains("BLUE"));
    }

    #[test]
    fn test_part_already_built_names_builder() {
        let err = RuleViolation::PartAlreadyBuilt {
            part: RocketPart::Engine,
            builder: PlayerId::new(1),
        };

        let msg = err.to_string();
        assert!(msg.contains("ENGINE"));
        assert!(msg.contains("Player 1"));
    }

    #[test]
    fn test_engine_error_from_rule_violation() {
        let err: EngineError = RuleViolation::GameOver.into();
        assert!(matches!(err, EngineError::Rejected(RuleViolation::GameOver)));
    }

    #[test]
    fn test_engine_error_from_invariant() {
        let err: EngineError = InvariantViolation::BadCurrentPlayer { index: 7 }.into();
        assert!(matches!(err, EngineError::Invariant(_)));
    }
}
