//! Message classification.
//!
//! Phrase keywords are checked across every category before any token
//! keyword: they are more specific, and multi-word keywords never show up in
//! the token set. Category declaration order is the only tie-break.

use crate::catalog::{CompiledCatalog, CompiledCategory};
use crate::text::{normalize, token_set};
use tracing::debug;

/// Why a category was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason<'a> {
    /// Phrase keyword found as a substring
    Phrase(&'a str),
    /// Token keyword equal to a message token
    Token(&'a str),
    /// Nothing matched; catalog fallback
    Fallback,
}

/// A classification together with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Matched category
    pub category: &'a CompiledCategory,
    /// Why it matched
    pub reason: MatchReason<'a>,
}

/// Classify `text`, returning the matched category.
#[must_use]
pub fn classify<'a>(text: &str, catalog: &'a CompiledCatalog) -> Option<&'a CompiledCategory> {
    explain(text, catalog).map(|m| m.category)
}

/// Classify `text` and report which keyword decided it.
///
/// Empty or whitespace-only text never matches, not even the fallback.
#[must_use]
pub fn explain<'a>(text: &str, catalog: &'a CompiledCatalog) -> Option<Match<'a>> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    for category in catalog.categories() {
        if let Some(phrase) = category
            .phrases()
            .iter()
            .find(|phrase| normalized.contains(phrase.as_str()))
        {
            debug!("Phrase '{phrase}' matched category '{}'", category.name());
            return Some(Match {
                category,
                reason: MatchReason::Phrase(phrase),
            });
        }
    }

    let tokens = token_set(&normalized);
    for category in catalog.categories() {
        if let Some(token) = category.tokens().iter().find(|t| tokens.contains(t.as_str())) {
            debug!("Token '{token}' matched category '{}'", category.name());
            return Some(Match {
                category,
                reason: MatchReason::Token(token),
            });
        }
    }

    catalog.fallback().map(|category| {
        debug!("No keyword matched, using fallback '{}'", category.name());
        Match {
            category,
            reason: MatchReason::Fallback,
        }
    })
}
