//! Keyword catalog.
//!
//! A [`Category`] is plain configuration data. [`compile`] turns an ordered
//! list of them into an immutable [`CompiledCatalog`] where every keyword has
//! been normalized and sorted into token or phrase shape.

/// Catalog shipped with the bot.
pub mod builtin;

use crate::error::ConfigurationError;
use crate::text::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

/// Opaque handle of a destination (forum topic thread id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(pub i32);

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One topical bucket as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display label
    pub name: String,
    /// Where matching messages belong
    pub destination: DestinationId,
    /// Raw keyword strings, in declaration order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Returned when nothing else matches
    #[serde(default)]
    pub fallback: bool,
}

impl Category {
    /// Create a regular (non-fallback) category.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, destination: i32, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            destination: DestinationId(destination),
            keywords: keywords.into_iter().map(Into::into).collect(),
            fallback: false,
        }
    }

    /// Mark this category as the catalog fallback.
    #[must_use]
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }
}

/// A normalized keyword in its matching shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    /// Single word, compared against whole tokens
    Token(String),
    /// Contains whitespace or a hyphen, searched as a substring
    Phrase(String),
}

impl Keyword {
    /// Normalize `raw` and classify it. Returns `None` for empty keywords.
    ///
    /// # Examples
    ///
    /// ```
    /// use topic_router_core::catalog::Keyword;
    ///
    /// assert_eq!(Keyword::parse(" Ijara "), Some(Keyword::Token("ijara".into())));
    /// assert_eq!(Keyword::parse("olib-sotish"), Some(Keyword::Phrase("olib-sotish".into())));
    /// assert_eq!(Keyword::parse("   "), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return None;
        }
        if normalized.contains(' ') || normalized.contains('-') {
            Some(Self::Phrase(normalized))
        } else {
            Some(Self::Token(normalized))
        }
    }

    /// Whether the keyword can ever match.
    ///
    /// A token keyword carrying characters the tokenizer drops (`"kv."`,
    /// `"c++"`) is never equal to a message token.
    ///
    /// ```
    /// use topic_router_core::catalog::Keyword;
    ///
    /// assert!(Keyword::Token("kv".into()).is_matchable());
    /// assert!(!Keyword::Token("kv.".into()).is_matchable());
    /// ```
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        match self {
            Self::Token(token) => tokenize(token) == [token.as_str()],
            Self::Phrase(_) => true,
        }
    }
}

/// A category with its keywords ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCategory {
    name: String,
    destination: DestinationId,
    fallback: bool,
    tokens: BTreeSet<String>,
    phrases: Vec<String>,
}

impl CompiledCategory {
    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination of this category.
    #[must_use]
    pub const fn destination(&self) -> DestinationId {
        self.destination
    }

    /// Whether this is the catalog fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Phrase keywords in declaration order.
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Token keywords.
    #[must_use]
    pub const fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    /// Whether `token` is one of the token keywords.
    #[must_use]
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// `{name, destination}` pair for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Display label
    pub name: String,
    /// Destination of the category
    pub destination: DestinationId,
}

/// Immutable, ordered set of compiled categories.
///
/// Declaration order is preserved and is the only tie-break between
/// categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCatalog {
    categories: Vec<CompiledCategory>,
    fallback: Option<usize>,
}

impl CompiledCatalog {
    /// Categories in declaration order.
    #[must_use]
    pub fn categories(&self) -> &[CompiledCategory] {
        &self.categories
    }

    /// The designated fallback category, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<&CompiledCategory> {
        self.fallback.and_then(|idx| self.categories.get(idx))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always `false` for a successfully compiled catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Find the category owning `destination`.
    #[must_use]
    pub fn by_destination(&self, destination: DestinationId) -> Option<&CompiledCategory> {
        self.categories
            .iter()
            .find(|c| c.destination == destination)
    }

    /// `{name, destination}` pairs in declaration order.
    #[must_use]
    pub fn listing(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                name: c.name.clone(),
                destination: c.destination,
            })
            .collect()
    }
}

/// Compile categories into a [`CompiledCatalog`].
///
/// Deterministic: the same input always yields an equal catalog.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if the list is empty, if a destination or
/// name is declared twice, or if more than one category is a fallback.
pub fn compile(categories: &[Category]) -> Result<CompiledCatalog, ConfigurationError> {
    if categories.is_empty() {
        return Err(ConfigurationError::EmptyCatalog);
    }

    let mut destinations: HashMap<DestinationId, &str> = HashMap::new();
    let mut names: HashSet<&str> = HashSet::new();
    let mut fallback: Option<usize> = None;
    let mut compiled = Vec::with_capacity(categories.len());

    for (idx, category) in categories.iter().enumerate() {
        if let Some(first) = destinations.insert(category.destination, &category.name) {
            return Err(ConfigurationError::DuplicateDestination {
                destination: category.destination,
                first: first.to_string(),
                second: category.name.clone(),
            });
        }
        if !names.insert(category.name.as_str()) {
            return Err(ConfigurationError::DuplicateName(category.name.clone()));
        }
        if category.fallback {
            if let Some(first) = fallback {
                return Err(ConfigurationError::MultipleFallbacks {
                    first: categories[first].name.clone(),
                    second: category.name.clone(),
                });
            }
            fallback = Some(idx);
        }

        compiled.push(compile_category(category));
    }

    info!(
        "Compiled keyword catalog: {} categories (fallback: {})",
        compiled.len(),
        fallback.map_or("none", |idx| categories[idx].name.as_str())
    );

    Ok(CompiledCatalog {
        categories: compiled,
        fallback,
    })
}

fn compile_category(category: &Category) -> CompiledCategory {
    let mut tokens = BTreeSet::new();
    let mut phrases: Vec<String> = Vec::new();

    for raw in &category.keywords {
        match Keyword::parse(raw) {
            Some(keyword @ Keyword::Token(_)) if !keyword.is_matchable() => warn!(
                "Keyword {raw:?} in '{}' can never match a token, skipping",
                category.name
            ),
            Some(Keyword::Token(token)) => {
                tokens.insert(token);
            }
            Some(Keyword::Phrase(phrase)) => {
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
            None => debug!("Dropping empty keyword {raw:?} in '{}'", category.name),
        }
    }

    CompiledCategory {
        name: category.name.clone(),
        destination: category.destination,
        fallback: category.fallback,
        tokens,
        phrases,
    }
}
