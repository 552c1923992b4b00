//! Common error infrastructure for skat-core.
//!
//! Domain-specific errors (`SheetError`, `HydrateError`, `ConfigError`) live
//! next to the code that raises them. This module only provides the shared
//! classification used by the runtime to decide how loudly to report them.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the caller; the sheet is unchanged and the caller may
    /// try again with a different command.
    ///
    /// Examples: dealer chosen as player, command issued in the wrong step
    Validation,

    /// Stored or in-memory data is inconsistent.
    ///
    /// Examples: persisted aggregates that do not match the persisted rounds
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all skat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to act, not on impact
pub trait SkatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
