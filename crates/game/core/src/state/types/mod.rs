//! Value types stored on the score sheet.

mod aggregate;
mod game_type;
mod modifiers;
mod participant;
mod round;

pub use aggregate::{Contribution, ParticipantAggregate};
pub use game_type::{GameType, TrumpChoice};
pub use modifiers::{Modifier, Modifiers};
pub use participant::ParticipantIndex;
pub use round::{Round, RoundValue};
