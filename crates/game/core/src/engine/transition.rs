//! Command dispatch and the three-phase pipeline.

use crate::action::{Command, Effect, SheetError, SheetTransition};
use crate::state::ScoreSheet;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// What a successful transition hands back besides the mutated sheet.
#[derive(Debug, Default)]
pub(super) struct Dispatched {
    pub effects: Vec<Effect>,
    pub superseded_edit: Option<u32>,
}

/// Runs a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the sheet and return the result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    sheet: &mut ScoreSheet,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: SheetTransition,
{
    transition
        .pre_validate(sheet)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(sheet)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(sheet)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each command to its transition.
pub(super) fn execute_transition(
    command: &Command,
    sheet: &mut ScoreSheet,
) -> Result<Dispatched, TransitionPhaseError<SheetError>> {
    let mut dispatched = Dispatched::default();

    match command {
        Command::SelectPlayer(transition) => drive_transition(transition, sheet)?,
        Command::SelectGameType(transition) => drive_transition(transition, sheet)?,
        Command::ChooseTrump(transition) => drive_transition(transition, sheet)?,
        Command::AdjustMultiplier(transition) => drive_transition(transition, sheet)?,
        Command::ToggleModifier(transition) => drive_transition(transition, sheet)?,
        Command::Proceed(transition) => drive_transition(transition, sheet)?,
        Command::Back(transition) => drive_transition(transition, sheet)?,
        Command::CancelEditing(transition) => drive_transition(transition, sheet)?,
        Command::Pass(transition) => {
            dispatched.effects = drive_transition(transition, sheet)?;
        }
        Command::CompleteRound(transition) => {
            dispatched.effects = drive_transition(transition, sheet)?;
        }
        Command::StartEditing(transition) => {
            dispatched.superseded_edit = drive_transition(transition, sheet)?;
        }
    }

    Ok(dispatched)
}
