//! Command execution pipeline.
//!
//! The [`SheetEngine`] is the authoritative reducer for [`ScoreSheet`]. Every
//! mutation flows through [`SheetEngine::execute`], which drives the command
//! through its transition phases and rolls the sheet back when any phase
//! fails.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Command, Effect};
use crate::state::{ScoreSheet, Step};

/// Outcome of a successfully executed command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Step the sheet is at after the command.
    pub step: Step,

    /// Side effects to run. Empty unless a round was committed.
    pub effects: Vec<Effect>,

    /// Round whose edit was rolled back by a newer `StartEditing`.
    pub superseded_edit: Option<u32>,
}

/// Engine that applies commands to a borrowed score sheet.
///
/// All commands share the same three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct SheetEngine<'a> {
    sheet: &'a mut ScoreSheet,
}

impl<'a> SheetEngine<'a> {
    pub fn new(sheet: &'a mut ScoreSheet) -> Self {
        Self { sheet }
    }

    /// Executes a command. On error the sheet is left exactly as it was.
    pub fn execute(&mut self, command: &Command) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.sheet.clone();

        match transition::execute_transition(command, self.sheet) {
            Ok(dispatched) => Ok(ExecutionOutcome {
                step: self.sheet.step(),
                effects: dispatched.effects,
                superseded_edit: dispatched.superseded_edit,
            }),
            Err(failure) => {
                *self.sheet = before;
                Err(ExecuteError::new(command.kind(), failure))
            }
        }
    }
}
