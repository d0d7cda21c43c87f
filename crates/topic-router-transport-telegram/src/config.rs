//! Telegram transport settings.

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use topic_router_core::catalog::CompiledCatalog;
use topic_router_core::config::{
    unresolved_names, ResolvedCategories, RouterSettings, TopicStatus,
};
use topic_router_core::dispatch::DispatchOptions;
use topic_router_core::{compile, ConfigurationError};

/// Maximum retries for a single Telegram API call.
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;
/// Initial backoff between retries (milliseconds).
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Upper bound for backoff between retries (milliseconds).
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 4000;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Only this chat is served when set (supergroups look like `-100...`).
    #[serde(default)]
    pub allowed_chat_id: Option<i64>,
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or the token is missing.
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Self = topic_router_core::config::build_config()?.try_deserialize()?;
        if settings.bot_token.trim().is_empty() {
            return Err(ConfigError::NotFound("bot_token".to_string()));
        }
        Ok(settings)
    }

    /// Access gate: whether messages from `chat_id` may be classified.
    #[must_use]
    pub fn is_chat_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chat_id.is_none_or(|allowed| allowed == chat_id)
    }
}

/// Everything the Telegram handlers need, built once at startup.
#[derive(Clone)]
pub struct BotSettings {
    /// Routing settings.
    pub router: Arc<RouterSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
    /// Compiled keyword catalog.
    pub catalog: Arc<CompiledCatalog>,
    /// Every configured category with its destination status, in
    /// declaration order.
    pub topics: Arc<Vec<TopicStatus>>,
    /// Options for executing routing decisions.
    pub dispatch: Arc<DispatchOptions>,
}

impl BotSettings {
    /// Resolve categories from the environment and compile the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the catalog does not compile; no
    /// settings bundle exists in that case.
    pub fn new(
        router: RouterSettings,
        telegram: TelegramSettings,
    ) -> Result<Self, ConfigurationError> {
        let resolved = router.resolve_categories();
        Self::with_categories(router, telegram, resolved)
    }

    /// Build the bundle from already resolved categories.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the catalog does not compile.
    pub fn with_categories(
        router: RouterSettings,
        telegram: TelegramSettings,
        resolved: ResolvedCategories,
    ) -> Result<Self, ConfigurationError> {
        let catalog = compile(&resolved.categories)?;
        let dispatch = DispatchOptions::from(&router);
        Ok(Self {
            router: Arc::new(router),
            telegram: Arc::new(telegram),
            catalog: Arc::new(catalog),
            topics: Arc::new(resolved.topics),
            dispatch: Arc::new(dispatch),
        })
    }

    /// Names of categories left out of the catalog for lack of a destination.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        unresolved_names(&self.topics)
    }
}
