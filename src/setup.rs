//! Game creation.
//!
//! Builds a validated initial state from a config: board from the
//! configured layout, 2-4 named players with their starting rats on the
//! start space, empty inventories, an unbuilt rocket, round 1, player 0
//! active.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::core::{Board, GameConfig, GameState, Player, PlayerId, Rat, RatId, Space};
use crate::error::SetupError;

/// Materialize the configured board layout.
#[must_use]
pub fn build_board(config: &GameConfig) -> Board {
    let spaces = config
        .board_layout
        .iter()
        .enumerate()
        .map(|(index, spec)| Space {
            index,
            color: spec.color,
            kind: spec.kind,
        })
        .collect();
    let shortcuts: FxHashMap<usize, usize> = config.shortcuts.clone();
    Board::new(spaces, config.start_index, config.launch_index, shortcuts)
}

/// Create a fresh game for the named players.
///
/// `seed` is recorded on the state for provenance; the rule set itself
/// draws no randomness.
pub fn new_game(
    names: &[&str],
    config: &GameConfig,
    seed: u64,
) -> Result<GameState, SetupError> {
    if !(2..=4).contains(&names.len()) {
        return Err(SetupError::BadPlayerCount(names.len()));
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(SetupError::DuplicateName((*name).to_string()));
        }
    }
    if config.board_layout.is_empty() {
        return Err(SetupError::EmptyBoard);
    }

    let board = build_board(config);

    let mut next_rat_id: u16 = 0;
    let players = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = PlayerId::new(i as u8);
            let rats = (0..config.starting_rats)
                .map(|_| {
                    let rat_id = RatId::new(next_rat_id);
                    next_rat_id += 1;
                    Rat::new(rat_id, id, board.start_index)
                })
                .collect();
            Player::new(id, *name, rats, config.starting_capacity)
        })
        .collect();

    info!(players = names.len(), seed, "new game");

    Ok(GameState::new(board, players, seed, next_rat_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SpaceKind;

    #[test]
    fn test_new_game_initial_shape() {
        let config = GameConfig::standard();
        let state = new_game(&["Alice", "Bob", "Carol"], &config, 7).unwrap();

        assert_eq!(state.players.len(), 3);
        assert_eq!(state.current_player, 0);
        assert_eq!(state.round, 1);
        assert!(!state.game_over);
        assert_eq!(state.rng_seed, 7);
        assert_eq!(state.rocket.built_count(), 0);
        assert!(state.history.is_empty());

        for player in &state.players {
            assert_eq!(player.rats.len(), config.starting_rats);
            for rat in &player.rats {
                assert_eq!(rat.board_index(), Some(state.board.start_index));
            }
            assert_eq!(player.inventory.total(), 0);
            assert_eq!(player.inventory.capacity, config.starting_capacity);
            assert_eq!(player.score, 0);
        }
    }

    #[test]
    fn test_rat_ids_are_unique_across_players() {
        let config = GameConfig::standard();
        let state = new_game(&["Alice", "Bob"], &config, 0).unwrap();

        let mut ids: Vec<_> = state
            .players
            .iter()
            .flat_map(|p| p.rats.iter().map(|r| r.id))
            .collect();
        ids.sort_by_key(|r| r.raw());
        ids.dedup();

        assert_eq!(ids.len(), 2 * config.starting_rats);
    }

    #[test]
    fn test_player_count_bounds() {
        let config = GameConfig::standard();

        assert_eq!(
            new_game(&["Solo"], &config, 0).unwrap_err(),
            SetupError::BadPlayerCount(1)
        );
        assert_eq!(
            new_game(&["A", "B", "C", "D", "E"], &config, 0).unwrap_err(),
            SetupError::BadPlayerCount(5)
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let config = GameConfig::standard();

        assert_eq!(
            new_game(&["Alice", "Alice"], &config, 0).unwrap_err(),
            SetupError::DuplicateName("Alice".to_string())
        );
    }

    #[test]
    fn test_board_built_from_layout() {
        let config = GameConfig::standard();
        let state = new_game(&["Alice", "Bob"], &config, 0).unwrap();

        assert_eq!(state.board.len(), config.board_layout.len());
        assert_eq!(state.board.space(0).kind, SpaceKind::Start);
        assert_eq!(
            state.board.space(state.board.launch_index).kind,
            SpaceKind::LaunchPad
        );
    }
}
