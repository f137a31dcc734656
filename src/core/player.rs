//! Player identification, rats, and per-player state.
//!
//! ## PlayerId / RatId
//!
//! Type-safe identifiers. `PlayerId` doubles as the index into
//! `GameState::players`; `RatId` is unique per game and allocated from a
//! state-owned counter.
//!
//! ## RatPosition
//!
//! A rat is either on the board at an index or aboard the rocket, never
//! both and never neither. Modeling this as an enum makes the exclusivity
//! invariant unrepresentable to violate.

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::rocket::RocketPart;

/// Player identifier supporting 2-4 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Rat token identifier, unique within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatId(pub u16);

impl RatId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for RatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rat {}", self.0)
    }
}

/// Where a rat is. Exactly one of the two states holds at all times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatPosition {
    /// On the board at this space index.
    OnBoard(usize),
    /// Aboard the shared rocket; board position is meaningless.
    OnRocket,
}

/// A player's movable token. Created at setup or when boarding spawns a
/// replacement; never destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rat {
    pub id: RatId,
    pub owner: PlayerId,
    pub position: RatPosition,
}

impl Rat {
    /// Create a rat on the board at `index`.
    #[must_use]
    pub fn new(id: RatId, owner: PlayerId, index: usize) -> Self {
        Self {
            id,
            owner,
            position: RatPosition::OnBoard(index),
        }
    }

    #[must_use]
    pub fn is_on_board(&self) -> bool {
        matches!(self.position, RatPosition::OnBoard(_))
    }

    #[must_use]
    pub fn is_on_rocket(&self) -> bool {
        matches!(self.position, RatPosition::OnRocket)
    }

    /// Board index, if on the board.
    #[must_use]
    pub fn board_index(&self) -> Option<usize> {
        match self.position {
            RatPosition::OnBoard(index) => Some(index),
            RatPosition::OnRocket => None,
        }
    }
}

/// A named per-player progress track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Lightbulb,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Lightbulb => write!(f, "lightbulb"),
        }
    }
}

/// One player: rats, inventory, track progress, score, built parts.
///
/// `built_parts` mirrors the rocket's builder slots for this player; the
/// post-resolution invariant sweep enforces the correspondence in both
/// directions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rats: Vec<Rat>,
    pub inventory: Inventory,
    pub tracks: FxHashMap<TrackKind, u32>,
    /// Monotonically non-decreasing during play.
    pub score: u32,
    pub built_parts: ImHashSet<RocketPart>,
}

impl Player {
    /// Create a player with the given rats and an empty inventory.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, rats: Vec<Rat>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            rats,
            inventory: Inventory::new(capacity),
            tracks: FxHashMap::default(),
            score: 0,
            built_parts: ImHashSet::new(),
        }
    }

    /// Look up one of this player's rats.
    #[must_use]
    pub fn rat(&self, id: RatId) -> Option<&Rat> {
        self.rats.iter().find(|r| r.id == id)
    }

    /// Mutable lookup of one of this player's rats.
    pub fn rat_mut(&mut self, id: RatId) -> Option<&mut Rat> {
        self.rats.iter_mut().find(|r| r.id == id)
    }

    /// Rats currently on the board.
    pub fn rats_on_board(&self) -> impl Iterator<Item = &Rat> {
        self.rats.iter().filter(|r| r.is_on_board())
    }

    /// Number of rats aboard the rocket.
    #[must_use]
    pub fn rats_on_rocket(&self) -> usize {
        self.rats.iter().filter(|r| r.is_on_rocket()).count()
    }

    /// Current level of a progress track (0 if never advanced).
    #[must_use]
    pub fn track_level(&self, track: TrackKind) -> u32 {
        self.tracks.get(&track).copied().unwrap_or(0)
    }

    /// Advance a track and return the new level.
    pub fn advance_track(&mut self, track: TrackKind, gain: u32) -> u32 {
        let level = self.tracks.entry(track).or_insert(0);
        *level += gain;
        *level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> Player {
        let id = PlayerId::new(0);
        let rats = vec![
            Rat::new(RatId::new(0), id, 0),
            Rat::new(RatId::new(1), id, 0),
        ];
        Player::new(id, "Alice", rats, 3)
    }

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(2);

        assert_eq!(p.index(), 2);
        assert_eq!(format!("{p}"), "Player 2");
        assert_eq!(PlayerId::all(3).count(), 3);
    }

    #[test]
    fn test_rat_position_exclusivity() {
        let mut rat = Rat::new(RatId::new(0), PlayerId::new(0), 4);

        assert!(rat.is_on_board());
        assert!(!rat.is_on_rocket());
        assert_eq!(rat.board_index(), Some(4));

        rat.position = RatPosition::OnRocket;
        assert!(!rat.is_on_board());
        assert!(rat.is_on_rocket());
        assert_eq!(rat.board_index(), None);
    }

    #[test]
    fn test_rat_lookup() {
        let player = sample_player();

        assert!(player.rat(RatId::new(1)).is_some());
        assert!(player.rat(RatId::new(9)).is_none());
    }

    #[test]
    fn test_rats_on_board_and_rocket() {
        let mut player = sample_player();
        assert_eq!(player.rats_on_board().count(), 2);
        assert_eq!(player.rats_on_rocket(), 0);

        player.rat_mut(RatId::new(0)).unwrap().position = RatPosition::OnRocket;

        assert_eq!(player.rats_on_board().count(), 1);
        assert_eq!(player.rats_on_rocket(), 1);
    }

    #[test]
    fn test_track_advance() {
        let mut player = sample_player();

        assert_eq!(player.track_level(TrackKind::Lightbulb), 0);
        assert_eq!(player.advance_track(TrackKind::Lightbulb, 1), 1);
        assert_eq!(player.advance_track(TrackKind::Lightbulb, 2), 3);
        assert_eq!(player.track_level(TrackKind::Lightbulb), 3);
    }

    #[test]
    fn test_player_serialization_round_trip() {
        let mut player = sample_player();
        player.built_parts.insert(RocketPart::Nose);
        player.score = 7;

        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();

        assert_eq!(player, back);
    }
}
