//! # rocket-rats
//!
//! Rules engine for a turn-based rat-racing board game: 2-4 players race
//! rats along a colored track, gather resources, trade (or steal) at
//! shops, and build a shared rocket part by part. The first player to
//! board four rats, or the eighth scoring marker, ends the game.
//!
//! ## Design Principles
//!
//! 1. **Single write path**: all mutation goes through
//!    [`rules::apply`]: validate, resolve, record, check.
//!
//! 2. **Derived data flows forward**: validation computes landing
//!    positions, prices, and point values once; resolution consumes them
//!    and recomputes nothing.
//!
//! 3. **Events are facts**: every mutation emits exactly one event, so a
//!    history entry fully accounts for what its action did.
//!
//! ## Modules
//!
//! - `core`: board, players, rats, inventory, rocket, actions, config,
//!   aggregate state
//! - `rules`: validation, effect resolution, orchestration, invariants
//! - `events`: the typed event vocabulary
//! - `scoring`: endgame detection, final scores, standings
//! - `setup`: board and game creation
//! - `error`: rule rejections, invariant violations, setup errors

pub mod core;
pub mod error;
pub mod events;
pub mod rules;
pub mod scoring;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    Action, Board, Color, GameConfig, GameState, HistoryAction, HistoryEntry, Inventory, Phase,
    Player, PlayerId, Rat, RatId, RatPosition, Resource, Rocket, RocketPart, ShopItem, ShopKind,
    Space, SpaceKind, TrackKind,
};

pub use crate::error::{EngineError, InvariantViolation, RuleViolation, SetupError};

pub use crate::events::{
    Event, EventKind, GainSource, ScoreReason, SentHomeReason, SpendPurpose,
};

pub use crate::rules::{apply, check_invariants, ActionValidator, Derived, EffectResolver};

pub use crate::scoring::{
    breakdown, check_endgame, current_standings, final_scores, winners, EndTrigger,
    ScoreBreakdown,
};

pub use crate::setup::{build_board, new_game};
