#![deny(missing_docs)]
//! Topic Router core library.
//!
//! Keyword-based classification of chat messages into forum topics and the
//! redirect decisions built on top of it.

/// Keyword catalog and its compiled form.
pub mod catalog;
/// Message classification.
pub mod classifier;
/// Configuration management.
pub mod config;
/// Execution of routing decisions against a transport.
pub mod dispatch;
/// Error types.
pub mod error;
/// Deep links into forum topics.
pub mod link;
/// User-facing message formatting.
pub mod notice;
/// Routing decisions.
pub mod router;
/// Text normalization and tokenization.
pub mod text;
/// Utility functions.
pub mod utils;

pub use catalog::{compile, Category, CompiledCatalog, CompiledCategory, DestinationId};
pub use classifier::{classify, explain, Match, MatchReason};
pub use error::{ConfigurationError, TransportError};
pub use router::{decide, ChatRef, MessageContext, RouteDecision, Sender};
