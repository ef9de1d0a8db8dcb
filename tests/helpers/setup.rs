use reqwest::{Client, Method, RequestBuilder};
use std::sync::{Arc, Mutex};
use timerbot_api::{Application, ORIGIN_HEADER, USER_HEADER};
use timerbot_domain::TimerNotification;
use timerbot_infra::{Config, INotifier, TimerbotContext};

/// Collects everything the application announces
#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<TimerNotification>>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.kind())
            .collect()
    }
}

#[async_trait::async_trait]
impl INotifier for RecordingNotifier {
    async fn notify(&self, notification: &TimerNotification) -> anyhow::Result<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub client: Client,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// Request on behalf of `user` sent from the `origin` channel
    pub fn request(&self, method: Method, path: &str, user: &str, origin: Option<&str>) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}/api/v1{}", self.address, path))
            .header(USER_HEADER, user);
        match origin {
            Some(origin) => req.header(ORIGIN_HEADER, origin),
            None => req,
        }
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = TimerbotContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.due_poll_interval_secs = 1;
    let notifier = Arc::new(RecordingNotifier::default());
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        config,
        address,
        client: Client::new(),
        notifier,
    }
}
