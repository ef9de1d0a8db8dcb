use super::INotifier;
use crate::system::ISys;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use timerbot_domain::TimerNotification;
use url::Url;

pub const WEBHOOK_KEY_HEADER: &str = "timerbot-webhook-key";

/// POSTs the rendered notification as json to a configured url. Every
/// request is bounded by `timeout` so a hanging receiver can not stall
/// the due poller.
pub struct WebhookNotifier {
    client: Client,
    url: Url,
    key: String,
    sys: Arc<dyn ISys>,
}

impl WebhookNotifier {
    pub fn new(url: Url, key: String, timeout: Duration, sys: Arc<dyn ISys>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            key,
            sys,
        })
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn notify(&self, notification: &TimerNotification) -> anyhow::Result<()> {
        let rendered = notification.render(self.sys.now());
        self.client
            .post(self.url.clone())
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(&rendered)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
