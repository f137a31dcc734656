//! Core data model: board, players, rats, inventory, rocket, actions,
//! configuration, and the aggregate game state.
//!
//! Everything here is pure data plus bookkeeping. Rule interpretation
//! (validation, effects, scoring) lives in `rules` and `scoring`.

pub mod action;
pub mod board;
pub mod config;
pub mod inventory;
pub mod player;
pub mod rocket;
pub mod state;

pub use action::{Action, ShopItem};
pub use board::{Board, Color, ShopKind, Space, SpaceKind};
pub use config::{
    EndgameTriggers, GameConfig, PassiveEffect, Punishment, ScoringRules, SpaceSpec, StealRule,
    TrackReward,
};
pub use inventory::{Inventory, Resource};
pub use player::{Player, PlayerId, Rat, RatId, RatPosition, TrackKind};
pub use rocket::{Rocket, RocketPart};
pub use state::{GameState, HistoryAction, HistoryEntry, Phase};
