mod logger;
mod webhook;

pub use logger::LogNotifier;
pub use webhook::{WebhookNotifier, WEBHOOK_KEY_HEADER};
use timerbot_domain::TimerNotification;

/// Delivers `TimerNotification`s to the origin of the `Timer`
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, notification: &TimerNotification) -> anyhow::Result<()>;
}
