//! Endgame detection, final scoring, and standings.
//!
//! The final score stacks endgame components on top of the score
//! accumulated during play: built parts count once more at game end (on
//! top of their immediate award), plus bottlecaps, track level, and
//! optionally remaining resources. Each component has a config switch.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameState, Player, PlayerId, TrackKind};
use crate::events::{Event, EventKind};
use crate::core::state::{HistoryAction, HistoryEntry};

/// Points per lightbulb track level at final scoring.
pub const TRACK_LEVEL_POINTS: u32 = 2;

/// What ended the game. Checked in declaration order: a fourth boarded
/// rat wins the race against the eighth marker when one action causes
/// both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndTrigger {
    /// One player's fourth rat boarded the rocket.
    FourthRatOnRocket,
    /// The eighth scoring marker (built part or equivalent) was placed.
    EighthScoringMarker,
}

impl std::fmt::Display for EndTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EndTrigger::FourthRatOnRocket => "fourth rat on rocket",
            EndTrigger::EighthScoringMarker => "eighth scoring marker",
        };
        write!(f, "{name}")
    }
}

/// One player's score, component by component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points scored during play.
    pub base: u32,
    /// Built parts counted again at game end, when enabled.
    pub rocket_parts: u32,
    pub bottlecaps: u32,
    pub lightbulb_track: u32,
    pub remaining_resources: u32,
    /// Tie-break only; worth no points.
    pub rats_on_rocket: usize,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.base
            + self.rocket_parts
            + self.bottlecaps
            + self.lightbulb_track
            + self.remaining_resources
    }
}

/// Compute one player's breakdown under the config's scoring switches.
#[must_use]
pub fn breakdown(player: &Player, config: &GameConfig) -> ScoreBreakdown {
    let scoring = &config.scoring;

    let rocket_parts = if scoring.rocket_parts {
        player
            .built_parts
            .iter()
            .map(|part| config.part_scores.get(part).copied().unwrap_or(0))
            .sum()
    } else {
        0
    };
    let lightbulb_track = if scoring.lightbulb_track {
        player.track_level(TrackKind::Lightbulb) * TRACK_LEVEL_POINTS
    } else {
        0
    };
    let remaining_resources = if scoring.remaining_resources {
        player.inventory.total() / 2
    } else {
        0
    };

    ScoreBreakdown {
        base: player.score,
        rocket_parts,
        bottlecaps: player.inventory.bottlecaps * scoring.bottlecap_points,
        lightbulb_track,
        remaining_resources,
        rats_on_rocket: player.rats_on_rocket(),
    }
}

/// Has either endgame threshold been crossed?
#[must_use]
pub fn check_endgame(state: &GameState, config: &GameConfig) -> Option<EndTrigger> {
    if state
        .players
        .iter()
        .any(|p| p.rats_on_rocket() >= config.endgame.rats_on_rocket)
    {
        return Some(EndTrigger::FourthRatOnRocket);
    }
    if state.rocket.built_count() >= config.endgame.scoring_markers {
        return Some(EndTrigger::EighthScoringMarker);
    }
    None
}

/// Final totals for every player, in player order.
#[must_use]
pub fn final_scores(state: &GameState, config: &GameConfig) -> Vec<(PlayerId, u32)> {
    state
        .players
        .iter()
        .map(|p| (p.id, breakdown(p, config).total()))
        .collect()
}

/// The winner set: highest total, ties broken by rats aboard the rocket.
/// Players tied on both share the win.
#[must_use]
pub fn winners(state: &GameState, config: &GameConfig) -> Vec<PlayerId> {
    let breakdowns: Vec<(PlayerId, ScoreBreakdown)> = state
        .players
        .iter()
        .map(|p| (p.id, breakdown(p, config)))
        .collect();

    let best_total = breakdowns
        .iter()
        .map(|(_, b)| b.total())
        .max()
        .unwrap_or(0);
    let best_rats = breakdowns
        .iter()
        .filter(|(_, b)| b.total() == best_total)
        .map(|(_, b)| b.rats_on_rocket)
        .max()
        .unwrap_or(0);

    breakdowns
        .iter()
        .filter(|(_, b)| b.total() == best_total && b.rats_on_rocket == best_rats)
        .map(|(id, _)| *id)
        .collect()
}

/// Live standings, best first: total descending, then rats aboard.
#[must_use]
pub fn current_standings(
    state: &GameState,
    config: &GameConfig,
) -> Vec<(PlayerId, ScoreBreakdown)> {
    let mut standings: Vec<(PlayerId, ScoreBreakdown)> = state
        .players
        .iter()
        .map(|p| (p.id, breakdown(p, config)))
        .collect();
    standings.sort_by(|(_, a), (_, b)| {
        b.total()
            .cmp(&a.total())
            .then(b.rats_on_rocket.cmp(&a.rats_on_rocket))
    });
    standings
}

/// If an endgame threshold has been crossed, lock the game: set the
/// winner set, append the synthetic game-end history entry, and return
/// the stamped `GameEnded` event. The caller appends the triggering
/// action's own history entry afterwards, so the game-end marker sits
/// before it, matching the moment the threshold was crossed.
pub fn check_and_finalize(state: &mut GameState, config: &GameConfig) -> Option<Event> {
    if state.game_over {
        return None;
    }
    let trigger = check_endgame(state, config)?;

    let winners = winners(state, config);
    let final_scores = final_scores(state, config);
    state.game_over = true;
    state.winner_ids = Some(winners.clone());

    let mut event = Event::new(
        EventKind::GameEnded {
            winners,
            final_scores,
            trigger,
        },
        None,
    );
    event.timestamp = state.take_timestamp();

    state.push_history(HistoryEntry {
        action: HistoryAction::GameEnd { trigger },
        events: vec![event.clone()],
        derived: None,
    });

    Some(event)
}
