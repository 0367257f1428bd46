//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a plain-text message
    async fn notify(&self, text: &str) -> crate::Result<()>;
}

/// Deliver `text`, logging the outcome. Never fails; returns whether the
/// message went out.
pub async fn send_message(notifier: &dyn Notifier, text: &str) -> bool {
    match notifier.notify(text).await {
        Ok(()) => {
            tracing::info!("Message sent via {}: {}", notifier.type_name(), text);
            true
        }
        Err(e) => {
            tracing::error!(
                "Failed to send message via {}: {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}
