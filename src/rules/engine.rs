//! The engine entry point: validate, resolve, record, check.
//!
//! [`apply`] is the single write path for a game in progress. Rejection
//! leaves the state untouched; an invariant failure after resolution
//! means the state is corrupt and must be discarded, never resumed.

use tracing::{debug, error};

use crate::core::{Action, GameConfig, GameState, PlayerId, RatPosition};
use crate::error::{EngineError, InvariantViolation};
use crate::events::Event;
use crate::core::state::{HistoryAction, HistoryEntry};
use crate::rules::resolver::EffectResolver;
use crate::rules::validator::ActionValidator;

/// Apply one action by one player.
///
/// On success the state reflects the action, the history carries a new
/// entry, and the emitted events are returned. On
/// [`EngineError::Rejected`] nothing changed. On
/// [`EngineError::Invariant`] the state has been mutated and is no
/// longer trustworthy.
pub fn apply(
    state: &mut GameState,
    action: &Action,
    actor: PlayerId,
    config: &GameConfig,
) -> Result<Vec<Event>, EngineError> {
    let derived = ActionValidator::new(config).validate(state, actor, action)?;

    debug!(%actor, kind = action.kind_name(), "applying action");

    let events = EffectResolver::new(config).resolve(state, actor, &derived);

    state.push_history(HistoryEntry {
        action: HistoryAction::Player {
            action: action.clone(),
            actor,
        },
        events: events.clone(),
        derived: Some(derived),
    });

    if let Err(violation) = check_invariants(state) {
        error!(%violation, "state invariant violated after resolution");
        return Err(EngineError::Invariant(violation));
    }

    Ok(events)
}

/// Sweep the structural invariants resolution must preserve.
pub fn check_invariants(state: &GameState) -> Result<(), InvariantViolation> {
    if state.current_player >= state.players.len() {
        return Err(InvariantViolation::BadCurrentPlayer {
            index: state.current_player,
        });
    }

    for player in &state.players {
        let inv = &player.inventory;
        if inv.total() > inv.capacity {
            return Err(InvariantViolation::CapacityExceeded {
                player: player.id,
                total: inv.total(),
                capacity: inv.capacity,
            });
        }
        for (resource, count) in inv.resources() {
            if count == 0 {
                return Err(InvariantViolation::ZeroCountEntry {
                    player: player.id,
                    resource,
                });
            }
        }
        for rat in &player.rats {
            if let RatPosition::OnBoard(index) = rat.position {
                if !state.board.in_bounds(index) {
                    return Err(InvariantViolation::RatOutOfBounds { rat: rat.id, index });
                }
            }
        }
    }

    // Rocket slots and player built-part sets must agree both ways.
    for (part, builder) in state.rocket.slots() {
        if let Some(builder) = builder {
            let player = state
                .player(builder)
                .ok_or(InvariantViolation::UnknownBuilder { part, builder })?;
            if !player.built_parts.contains(&part) {
                return Err(InvariantViolation::MissingBuiltPart {
                    player: builder,
                    part,
                });
            }
        }
    }
    for player in &state.players {
        for part in player.built_parts.iter() {
            if state.rocket.builder(*part) != Some(player.id) {
                return Err(InvariantViolation::PhantomBuiltPart {
                    player: player.id,
                    part: *part,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RocketPart;
    use crate::error::RuleViolation;
    use crate::setup::new_game;

    fn two_player_game() -> (GameState, GameConfig) {
        let config = GameConfig::standard();
        let state = new_game(&["Alice", "Bob"], &config, 0).unwrap();
        (state, config)
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let (mut state, config) = two_player_game();
        let before = state.clone();

        let err = apply(
            &mut state,
            &Action::DonateCheese { amount: 9 },
            PlayerId::new(0),
            &config,
        )
        .unwrap_err();

        assert_eq!(
            err,
            EngineError::Rejected(RuleViolation::InvalidDonation { amount: 9 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_end_turn_records_history() {
        let (mut state, config) = two_player_game();

        let events = apply(&mut state, &Action::EndTurn, PlayerId::new(0), &config).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.history.len(), 1);
        let entry = state.history.last().unwrap();
        assert!(matches!(
            entry.action,
            HistoryAction::Player {
                action: Action::EndTurn,
                actor: PlayerId(0)
            }
        ));
        assert_eq!(entry.events, events);
    }

    #[test]
    fn test_fresh_state_passes_invariants() {
        let (state, _) = two_player_game();
        assert!(check_invariants(&state).is_ok());
    }

    #[test]
    fn test_phantom_built_part_detected() {
        let (mut state, _) = two_player_game();
        state.players[0].built_parts.insert(RocketPart::Nose);

        assert_eq!(
            check_invariants(&state),
            Err(InvariantViolation::PhantomBuiltPart {
                player: PlayerId::new(0),
                part: RocketPart::Nose,
            })
        );
    }

    #[test]
    fn test_missing_built_part_detected() {
        let (mut state, _) = two_player_game();
        state.rocket.build(RocketPart::Tank, PlayerId::new(1));

        assert_eq!(
            check_invariants(&state),
            Err(InvariantViolation::MissingBuiltPart {
                player: PlayerId::new(1),
                part: RocketPart::Tank,
            })
        );
    }

    #[test]
    fn test_capacity_violation_detected() {
        let (mut state, _) = two_player_game();
        state.players[0]
            .inventory
            .add(crate::core::Resource::Cheese, 10);

        assert!(matches!(
            check_invariants(&state),
            Err(InvariantViolation::CapacityExceeded { .. })
        ));
    }
}
