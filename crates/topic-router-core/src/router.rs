//! Routing decisions.

use crate::catalog::{CompiledCategory, DestinationId};

/// Chat a message was posted in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatRef {
    /// Numeric chat id (supergroups carry the `-100` prefix)
    pub id: i64,
    /// Public handle without the `@`
    pub username: Option<String>,
}

/// Author of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Numeric user id
    pub id: i64,
    /// Display name
    pub full_name: String,
}

/// Per-message input to the router. Identity fields are only used for
/// formatting, never for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageContext {
    /// Raw message text
    pub text: String,
    /// Chat the message belongs to
    pub chat: ChatRef,
    /// Topic the message was posted in, if any
    pub current_destination: Option<DestinationId>,
    /// Author, if known
    pub sender: Option<Sender>,
    /// Id of the message itself, used for replies
    pub message_id: Option<i32>,
}

/// What to do with a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision<'a> {
    /// Nothing to do
    Silent,
    /// Copy the message to `destination` and notify the author
    Relocate {
        /// Matched category
        category: &'a CompiledCategory,
        /// Where the message belongs
        destination: DestinationId,
    },
}

impl RouteDecision<'_> {
    /// Whether this decision requires any action.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }
}

/// Decide what to do with a message given its classification and where it
/// currently is.
///
/// A message already in its category's destination yields
/// [`RouteDecision::Silent`], so calling this again after relocation is a
/// no-op.
#[must_use]
pub fn decide(
    classification: Option<&CompiledCategory>,
    current_destination: Option<DestinationId>,
) -> RouteDecision<'_> {
    match classification {
        None => RouteDecision::Silent,
        Some(category) if current_destination == Some(category.destination()) => {
            RouteDecision::Silent
        }
        Some(category) => RouteDecision::Relocate {
            category,
            destination: category.destination(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{compile, Category, CompiledCatalog};
    use crate::error::ConfigurationError;

    fn catalog() -> Result<CompiledCatalog, ConfigurationError> {
        compile(&[Category::new("Housing", 5, ["uy"])])
    }

    #[test]
    fn test_no_match_is_silent() {
        assert_eq!(decide(None, None), RouteDecision::Silent);
        assert_eq!(decide(None, Some(DestinationId(5))), RouteDecision::Silent);
    }

    #[test]
    fn test_relocate_from_elsewhere() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let housing = &catalog.categories()[0];

        for current in [None, Some(DestinationId(1))] {
            assert_eq!(
                decide(Some(housing), current),
                RouteDecision::Relocate {
                    category: housing,
                    destination: DestinationId(5),
                }
            );
        }
        Ok(())
    }

    #[test]
    fn test_already_in_place_is_idempotent() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let housing = &catalog.categories()[0];
        let here = Some(DestinationId(5));

        assert!(decide(Some(housing), here).is_silent());
        assert!(decide(Some(housing), here).is_silent());
        Ok(())
    }
}
