//! Point calculation for a single round.
//!
//! Scoring is a pure function of the round facts and the table mode. The
//! state machine stores the result on the round so later edits can reverse
//! exactly what was applied.

use crate::config::TableMode;
use crate::state::{GameType, Modifiers, Round, RoundValue};

/// Bonus added to a won game and subtracted from a lost one.
pub const OUTCOME_ADJUSTMENT: i32 = 50;

const NULL_BASE: i32 = 23;
const NULL_HAND: i32 = 35;
const NULL_OUVERT: i32 = 46;
const NULL_HAND_OUVERT: i32 = 59;

/// Scores `round` as if it were completed with its current `won` flag.
///
/// Rounds without a contract and passed rounds score zero.
pub fn compute_round_value(round: &Round, mode: TableMode) -> RoundValue {
    match game_value(round) {
        Some(value) => value_for_outcome(value, round.won, mode),
        None => RoundValue::ZERO,
    }
}

/// Value the round would score if the player won, shown before the outcome is chosen.
pub fn preview_value(round: &Round, mode: TableMode) -> RoundValue {
    match game_value(round) {
        Some(value) => value_for_outcome(value, true, mode),
        None => RoundValue::ZERO,
    }
}

/// Game value before the won/lost adjustment.
///
/// Announced flags do not imply their plain counterpart; every set flag counts once.
pub fn game_value(round: &Round) -> Option<i32> {
    let game_type = round.game_type?;
    if game_type.is_passed() {
        return None;
    }
    if game_type.is_null() {
        return Some(null_value(round.modifiers));
    }

    let base = game_type.suit_base_value()?;
    let multiplier = 1 + i32::from(round.multiplier_bonus) + round.modifiers.multiplier_steps();
    Some(base * multiplier)
}

fn null_value(modifiers: Modifiers) -> i32 {
    match (
        modifiers.contains(Modifiers::HAND),
        modifiers.contains(Modifiers::OUVERT),
    ) {
        (true, true) => NULL_HAND_OUVERT,
        (false, true) => NULL_OUVERT,
        (true, false) => NULL_HAND,
        (false, false) => NULL_BASE,
    }
}

fn value_for_outcome(game_value: i32, won: bool, mode: TableMode) -> RoundValue {
    if won {
        RoundValue {
            base_points: game_value,
            total_points: game_value + OUTCOME_ADJUSTMENT,
            defender_bonus: 0,
        }
    } else {
        RoundValue {
            base_points: -2 * game_value,
            total_points: -2 * game_value - OUTCOME_ADJUSTMENT,
            defender_bonus: mode.defender_bonus(),
        }
    }
}
