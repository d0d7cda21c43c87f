//! Error types shared by the catalog compiler and the dispatcher.

use crate::catalog::DestinationId;
use thiserror::Error;

/// Malformed or conflicting category configuration.
///
/// Fatal at startup: the bot must not serve until the catalog compiles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No categories were supplied
    #[error("category list is empty")]
    EmptyCatalog,
    /// Two categories point at the same destination
    #[error("destination {destination} is declared by both '{first}' and '{second}'")]
    DuplicateDestination {
        /// Conflicting destination
        destination: DestinationId,
        /// Category declared first
        first: String,
        /// Category declared later
        second: String,
    },
    /// Two categories share a display name
    #[error("category '{0}' is declared more than once")]
    DuplicateName(String),
    /// More than one category is marked as fallback
    #[error("both '{first}' and '{second}' are marked as fallback")]
    MultipleFallbacks {
        /// Fallback declared first
        first: String,
        /// Fallback declared later
        second: String,
    },
}

/// Failure of an outbound transport action.
///
/// Never fatal: the routing decision is considered handled either way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Copying the message into its destination failed
    #[error("relocate failed: {0}")]
    Relocate(String),
    /// Sending the redirect notice failed
    #[error("notify failed: {0}")]
    Notify(String),
}
