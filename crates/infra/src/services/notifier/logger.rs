use super::INotifier;
use crate::system::ISys;
use std::sync::Arc;
use timerbot_domain::TimerNotification;
use tracing::info;

/// Used when no webhook is configured. Every notification ends up in the logs.
pub struct LogNotifier {
    sys: Arc<dyn ISys>,
}

impl LogNotifier {
    pub fn new(sys: Arc<dyn ISys>) -> Self {
        Self { sys }
    }
}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn notify(&self, notification: &TimerNotification) -> anyhow::Result<()> {
        let rendered = notification.render(self.sys.now());
        let fields = rendered
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.value))
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            kind = rendered.kind,
            origin = %rendered.origin,
            "{}: {} ({})",
            rendered.title,
            rendered.description,
            fields
        );
        Ok(())
    }
}
