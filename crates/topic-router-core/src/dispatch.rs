//! Execution of routing decisions against a transport.
//!
//! The router only produces a [`RouteDecision`]. This module turns a
//! `Relocate` decision into the two outbound actions (copy + notice) and runs
//! them through a [`Transport`]. The two actions are independent failure
//! domains: a failed copy never suppresses the notice.

use crate::catalog::DestinationId;
use crate::config::RouterSettings;
use crate::error::TransportError;
use crate::link::deep_link;
use crate::notice::{redirect_notice, relocated_copy};
use crate::router::{MessageContext, RouteDecision};
use async_trait::async_trait;
use tracing::{info, warn};

/// Outbound messaging capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `text` into `destination` on behalf of `message`.
    async fn relocate(
        &self,
        message: &MessageContext,
        destination: DestinationId,
        text: &str,
    ) -> Result<(), TransportError>;

    /// Reply to `message` where it was posted.
    async fn notify(&self, message: &MessageContext, text: &str) -> Result<(), TransportError>;
}

/// Options that shape the outbound actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Post a copy into the destination
    pub copy_to_destination: bool,
    /// Host used for deep links
    pub link_host: String,
}

impl From<&RouterSettings> for DispatchOptions {
    fn from(settings: &RouterSettings) -> Self {
        Self {
            copy_to_destination: settings.copy_to_topic,
            link_host: settings.link_host.clone(),
        }
    }
}

/// Texts to send for a `Relocate` decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationPlan {
    /// Destination topic
    pub destination: DestinationId,
    /// Copy body; `None` when copying is disabled
    pub copy: Option<String>,
    /// Redirect notice
    pub notice: String,
}

/// Build the outbound texts for `decision`. `Silent` yields no plan.
#[must_use]
pub fn plan(
    decision: &RouteDecision<'_>,
    message: &MessageContext,
    options: &DispatchOptions,
) -> Option<RelocationPlan> {
    let RouteDecision::Relocate {
        category,
        destination,
    } = *decision
    else {
        return None;
    };

    let link = deep_link(&options.link_host, &message.chat, destination);
    let copy = options
        .copy_to_destination
        .then(|| relocated_copy(message.sender.as_ref(), &message.text));

    Some(RelocationPlan {
        destination,
        copy,
        notice: redirect_notice(category.name(), &link),
    })
}

/// Result of running a decision through a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// A copy was posted into the destination
    pub relocated: bool,
    /// The redirect notice was sent
    pub notified: bool,
    /// Transport failures, in the order they happened
    pub errors: Vec<TransportError>,
}

impl DispatchOutcome {
    /// Whether every attempted action succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Execute `decision` through `transport`.
///
/// The copy is attempted first (when enabled), then the notice is always
/// attempted. Failures are logged and collected; nothing is retried here.
pub async fn dispatch(
    decision: &RouteDecision<'_>,
    message: &MessageContext,
    options: &DispatchOptions,
    transport: &dyn Transport,
) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();
    let Some(plan) = plan(decision, message, options) else {
        return outcome;
    };

    info!(
        "Redirecting message {:?} in chat {} to topic {}",
        message.message_id, message.chat.id, plan.destination
    );

    if let Some(copy) = &plan.copy {
        match transport.relocate(message, plan.destination, copy).await {
            Ok(()) => outcome.relocated = true,
            Err(e) => {
                warn!("Failed to copy message to topic {}: {e}", plan.destination);
                outcome.errors.push(e);
            }
        }
    }

    match transport.notify(message, &plan.notice).await {
        Ok(()) => outcome.notified = true,
        Err(e) => {
            warn!("Failed to send redirect notice: {e}");
            outcome.errors.push(e);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{compile, Category, CompiledCatalog};
    use crate::error::ConfigurationError;
    use crate::router::{decide, ChatRef, Sender};
    use mockall::predicate::eq;

    fn catalog() -> Result<CompiledCatalog, ConfigurationError> {
        compile(&[Category::new("Housing", 5, ["uy"])])
    }

    fn message() -> MessageContext {
        MessageContext {
            text: "uy kerak".to_string(),
            chat: ChatRef {
                id: -1_001_234,
                username: None,
            },
            current_destination: None,
            sender: Some(Sender {
                id: 7,
                full_name: "Ali".to_string(),
            }),
            message_id: Some(99),
        }
    }

    fn options(copy: bool) -> DispatchOptions {
        DispatchOptions {
            copy_to_destination: copy,
            link_host: "t.me".to_string(),
        }
    }

    #[test]
    fn test_plan_contents() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);
        let plan = plan(&decision, &message(), &options(true));

        let plan = plan.ok_or(ConfigurationError::EmptyCatalog)?;
        assert_eq!(plan.destination, DestinationId(5));
        assert!(plan.notice.contains("<b>Housing</b>"));
        assert!(plan.notice.contains("https://t.me/c/1234/5"));
        assert!(plan
            .copy
            .as_deref()
            .is_some_and(|c| c.ends_with("uy kerak")));
        Ok(())
    }

    #[test]
    fn test_plan_without_copy() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);
        let plan = plan(&decision, &message(), &options(false));
        assert_eq!(plan.map(|p| p.copy), Some(None));
        Ok(())
    }

    #[tokio::test]
    async fn test_silent_touches_nothing() {
        let transport = MockTransport::new();
        let outcome = dispatch(&RouteDecision::Silent, &message(), &options(true), &transport).await;
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[tokio::test]
    async fn test_copy_then_notify() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);

        let mut seq = mockall::Sequence::new();
        let mut transport = MockTransport::new();
        transport
            .expect_relocate()
            .with(mockall::predicate::always(), eq(DestinationId(5)), mockall::predicate::always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        transport
            .expect_notify()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let outcome = dispatch(&decision, &message(), &options(true), &transport).await;
        assert!(outcome.relocated);
        assert!(outcome.notified);
        assert!(outcome.is_clean());
        Ok(())
    }

    #[tokio::test]
    async fn test_notify_still_runs_after_failed_copy() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);

        let mut transport = MockTransport::new();
        transport
            .expect_relocate()
            .times(1)
            .returning(|_, _, _| Err(TransportError::Relocate("forbidden".to_string())));
        transport.expect_notify().times(1).returning(|_, _| Ok(()));

        let outcome = dispatch(&decision, &message(), &options(true), &transport).await;
        assert!(!outcome.relocated);
        assert!(outcome.notified);
        assert_eq!(
            outcome.errors,
            vec![TransportError::Relocate("forbidden".to_string())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_both_failures_reported() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);

        let mut transport = MockTransport::new();
        transport
            .expect_relocate()
            .returning(|_, _, _| Err(TransportError::Relocate("timeout".to_string())));
        transport
            .expect_notify()
            .returning(|_, _| Err(TransportError::Notify("timeout".to_string())));

        let outcome = dispatch(&decision, &message(), &options(true), &transport).await;
        assert!(!outcome.relocated);
        assert!(!outcome.notified);
        assert_eq!(outcome.errors.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_disabled_only_notifies() -> Result<(), ConfigurationError> {
        let catalog = catalog()?;
        let decision = decide(catalog.categories().first(), None);

        let mut transport = MockTransport::new();
        transport.expect_relocate().never();
        transport.expect_notify().times(1).returning(|_, _| Ok(()));

        let outcome = dispatch(&decision, &message(), &options(false), &transport).await;
        assert!(!outcome.relocated);
        assert!(outcome.notified);
        Ok(())
    }
}
