//! Configuration and settings management
//!
//! Loads routing settings from config files and environment variables and
//! resolves category destinations.

use crate::catalog::{builtin, Category, DestinationId};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Telegram message limit with a safety margin for HTML markup.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4000;

/// Host used for topic deep links.
pub const DEFAULT_LINK_HOST: &str = "t.me";

/// Build the layered configuration source shared by all settings structs.
///
/// # Errors
///
/// Returns a `ConfigError` if a present config file cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Local overrides, not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // Bare env vars; UPPER_SNAKE_CASE maps to snake_case, empty means unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// One category as written in configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CategorySettings {
    /// Display label
    pub name: String,
    /// Explicit topic thread id
    #[serde(default)]
    pub destination_id: Option<i32>,
    /// Environment variable holding the topic thread id
    #[serde(default)]
    pub destination_env: Option<String>,
    /// Raw keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Returned when nothing else matches
    #[serde(default)]
    pub fallback: bool,
}

impl CategorySettings {
    fn resolve_destination<F>(&self, lookup: &F) -> Option<DestinationId>
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = match self.destination_id {
            Some(id) => id,
            None => lookup(self.destination_env.as_deref()?)?.trim().parse::<i32>().ok()?,
        };
        // Thread ids are positive; 0 would address the General topic
        (id > 0).then_some(DestinationId(id))
    }
}

/// Destination status of one configured category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicStatus {
    /// Display label
    pub name: String,
    /// Resolved destination, `None` when missing or invalid
    pub destination: Option<DestinationId>,
}

/// Categories split by whether their destination could be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCategories {
    /// Categories ready for compilation, in declaration order
    pub categories: Vec<Category>,
    /// Every configured category with its status, in declaration order
    pub topics: Vec<TopicStatus>,
}

impl ResolvedCategories {
    /// Names of categories left out for lack of a destination.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        unresolved_names(&self.topics)
    }
}

/// Names of the topics without a destination, in declaration order.
#[must_use]
pub fn unresolved_names(topics: &[TopicStatus]) -> Vec<&str> {
    topics
        .iter()
        .filter(|t| t.destination.is_none())
        .map(|t| t.name.as_str())
        .collect()
}

/// Routing settings loaded from config files and the environment.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RouterSettings {
    /// Configured categories; the builtin catalog is used when empty
    #[serde(default)]
    pub categories: Vec<CategorySettings>,
    /// Post a copy of misplaced messages into their topic
    #[serde(default = "default_copy_to_topic")]
    pub copy_to_topic: bool,
    /// Host used for topic deep links
    #[serde(default = "default_link_host")]
    pub link_host: String,
}

const fn default_copy_to_topic() -> bool {
    true
}

fn default_link_host() -> String {
    DEFAULT_LINK_HOST.to_string()
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            copy_to_topic: default_copy_to_topic(),
            link_host: default_link_host(),
        }
    }
}

impl RouterSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        build_config()?.try_deserialize()
    }

    /// Configured categories, or the builtin catalog when none are set.
    #[must_use]
    pub fn category_settings(&self) -> Vec<CategorySettings> {
        if self.categories.is_empty() {
            builtin::categories()
        } else {
            self.categories.clone()
        }
    }

    /// Resolve destinations from the process environment.
    #[must_use]
    pub fn resolve_categories(&self) -> ResolvedCategories {
        self.resolve_categories_with(|var| std::env::var(var).ok())
    }

    /// Resolve destinations using `lookup` for env-based ids.
    ///
    /// Categories without a positive destination are skipped and reported in
    /// [`ResolvedCategories::topics`].
    #[must_use]
    pub fn resolve_categories_with<F>(&self, lookup: F) -> ResolvedCategories
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resolved = ResolvedCategories::default();

        for settings in self.category_settings() {
            let destination = settings.resolve_destination(&lookup);
            resolved.topics.push(TopicStatus {
                name: settings.name.clone(),
                destination,
            });
            match destination {
                Some(destination) => resolved.categories.push(Category {
                    name: settings.name,
                    destination,
                    keywords: settings.keywords,
                    fallback: settings.fallback,
                }),
                None => warn!(
                    "Category '{}' has no destination (env: {}), skipping",
                    settings.name,
                    settings.destination_env.as_deref().unwrap_or("-")
                ),
            }
        }

        resolved
    }
}
