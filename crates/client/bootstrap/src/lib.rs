//! Shared bootstrap utilities for score sheet front-ends.
//!
//! Provides configuration loading, logging setup, and runtime assembly that
//! can be reused by any front-end embedding the sheet.
pub mod builder;
pub mod config;
pub mod logging;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::{ChannelConfig, ClientConfig, ClientConfigError};
pub use logging::setup_logging;
