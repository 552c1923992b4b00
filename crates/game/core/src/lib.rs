//! Deterministic Skat scoring rules and the score sheet state machine.
//!
//! `skat-core` defines the canonical rules (round values, aggregates, dealer
//! rotation) and the command pipeline that enters rounds one selection at a
//! time. It performs no I/O: committing a round yields [`action::Effect`]s
//! that the runtime executes. All sheet mutation flows through
//! [`engine::SheetEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod rotation;
pub mod scoring;
pub mod state;

pub use action::{
    AggregateUpdate, Command, CommandKind, Effect, RoundOutcome, RoundRecord, SheetError,
    SheetTransition,
};
pub use config::{ConfigError, SeriesConfig, TableMode};
pub use engine::{ExecuteError, ExecutionOutcome, SheetEngine, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorSeverity, SkatError};
pub use rotation::DealerRotation;
pub use scoring::{compute_round_value, preview_value};
pub use state::{
    EditSession, GameType, HydrateError, LastUpdated, Modifier, Modifiers, ParticipantAggregate,
    ParticipantIndex, Round, RoundValue, ScoreSheet, SeriesStatus, StatKind, Step, TrumpChoice,
};
