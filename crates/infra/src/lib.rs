mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{ITimerRepo, InMemoryTimerRepo, PostgresTimerRepo, Repos};
pub use services::*;
use std::sync::Arc;
use std::time::Duration;
pub use system::{ISys, RealSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct TimerbotContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

fn create_notifier(config: &Config, sys: Arc<dyn ISys>) -> anyhow::Result<Arc<dyn INotifier>> {
    match &config.notification_webhook_url {
        Some(url) => {
            info!("Notifications will be delivered to the webhook: {}", url);
            let notifier = WebhookNotifier::new(
                url.clone(),
                config.notification_webhook_key.clone(),
                Duration::from_secs(config.notification_webhook_timeout_secs),
                sys,
            )?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(LogNotifier::new(sys))),
    }
}

impl TimerbotContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("Did not find DATABASE_URL environment variable. Timers will only be stored in memory and are lost on restart.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let notifier = create_notifier(&config, sys.clone())?;
        Ok(Self {
            repos,
            config,
            sys,
            notifier,
        })
    }

    /// Context backed by the in memory store that only logs notifications
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let notifier = Arc::new(LogNotifier::new(sys.clone()));
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys,
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<TimerbotContext> {
    TimerbotContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
