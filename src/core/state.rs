//! Game state: the aggregate root.
//!
//! ## GameState
//!
//! Everything the engine knows about one game:
//! - Board, players, rocket
//! - Turn and round counters
//! - The append-only history of applied actions
//! - Endgame status
//!
//! The state has no methods that interpret rules; validation and effect
//! resolution live in `rules`. State methods are bookkeeping only.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::player::{Player, PlayerId, Rat, RatId};
use super::rocket::Rocket;
use crate::core::Action;
use crate::events::Event;
use crate::rules::Derived;
use crate::scoring::EndTrigger;

/// Turn phase. A single phase exists today; the field stays so saved
/// games carry it when sub-phases arrive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Main,
}

/// What a history entry records: a player action, or the synthetic
/// game-end marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HistoryAction {
    Player { action: Action, actor: PlayerId },
    GameEnd { trigger: EndTrigger },
}

/// One applied action with everything it caused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    /// Events in emission order, timestamps stamped.
    pub events: Vec<Event>,
    /// The validation output the resolver consumed. `None` for the
    /// synthetic game-end entry.
    pub derived: Option<Derived>,
}

/// Complete state of one game.
///
/// Cloning is cheap where it matters: history is an `im::Vector`, so a
/// clone shares structure with the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: Vec<Player>,
    pub rocket: Rocket,

    /// Index into `players`.
    pub current_player: usize,
    /// 1-based; increments when the turn wraps back to player 0.
    pub round: u32,
    pub phase: Phase,

    /// Seed recorded at setup for replay provenance. The rule set draws
    /// no randomness.
    pub rng_seed: u64,

    pub history: Vector<HistoryEntry>,

    pub game_over: bool,
    /// Set exactly once, together with `game_over`.
    pub winner_ids: Option<Vec<PlayerId>>,

    next_rat_id: u16,
    next_timestamp: u64,
}

impl GameState {
    /// Assemble a fresh state. `next_rat_id` continues from the rats
    /// already handed to players.
    #[must_use]
    pub fn new(board: Board, players: Vec<Player>, rng_seed: u64, next_rat_id: u16) -> Self {
        Self {
            board,
            players,
            rocket: Rocket::new(),
            current_player: 0,
            round: 1,
            phase: Phase::Main,
            rng_seed,
            history: Vector::new(),
            game_over: false,
            winner_ids: None,
            next_rat_id,
            next_timestamp: 1,
        }
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Mutable player lookup.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// The player whose turn it is.
    ///
    /// Panics if `current_player` is out of range, which the invariant
    /// sweep rules out.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Pass the turn to the next player, bumping the round on wraparound.
    pub fn advance_turn(&mut self) {
        self.current_player += 1;
        if self.current_player >= self.players.len() {
            self.current_player = 0;
            self.round += 1;
        }
    }

    /// All rats currently on the board, across players.
    pub fn board_rats(&self) -> impl Iterator<Item = &Rat> {
        self.players.iter().flat_map(|p| p.rats_on_board())
    }

    /// Hand out the next unique rat ID.
    pub fn alloc_rat_id(&mut self) -> RatId {
        let id = RatId::new(self.next_rat_id);
        self.next_rat_id += 1;
        id
    }

    /// Hand out the next event timestamp.
    pub fn take_timestamp(&mut self) -> u64 {
        let ts = self.next_timestamp;
        self.next_timestamp += 1;
        ts
    }

    /// Append a history entry.
    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push_back(entry);
    }
}
