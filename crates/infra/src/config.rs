use timerbot_utils::create_random_secret;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the due poller looks for `Timer`s to announce
    pub due_poll_interval_secs: u64,
    /// How many identifier candidates are tried before creating a `Timer` gives up
    pub timer_id_max_attempts: usize,
    /// Where notifications are delivered. When absent they are only logged.
    pub notification_webhook_url: Option<Url>,
    /// Sent along every webhook request so that the receiver can verify the sender
    pub notification_webhook_key: String,
    /// Upper bound for a single webhook delivery
    pub notification_webhook_timeout_secs: u64,
}

/// Reads a numeric environment variable, falling back to `default`
/// when it is absent or invalid
fn parse_env_or<T: std::str::FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                name, value, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or("PORT", 5000);
        let due_poll_interval_secs = match parse_env_or("DUE_POLL_INTERVAL_SECS", 60) {
            0 => {
                warn!("DUE_POLL_INTERVAL_SECS can not be 0, falling back to 60.");
                60
            }
            interval => interval,
        };
        let timer_id_max_attempts = match parse_env_or("TIMER_ID_MAX_ATTEMPTS", 128) {
            0 => {
                warn!("TIMER_ID_MAX_ATTEMPTS can not be 0, falling back to 128.");
                128
            }
            attempts => attempts,
        };

        let notification_webhook_url = match std::env::var("NOTIFICATION_WEBHOOK_URL") {
            Ok(url) => match Url::parse(&url) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(
                        "The given NOTIFICATION_WEBHOOK_URL: {} is not valid ({}). Notifications will only be logged.",
                        url, e
                    );
                    None
                }
            },
            Err(_) => {
                info!("Did not find NOTIFICATION_WEBHOOK_URL environment variable. Notifications will only be logged.");
                None
            }
        };
        let notification_webhook_key = match std::env::var("NOTIFICATION_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                let key = create_random_secret(32);
                if notification_webhook_url.is_some() {
                    info!(
                        "Did not find NOTIFICATION_WEBHOOK_KEY environment variable. Generated webhook key: {}",
                        key
                    );
                }
                key
            }
        };

        let notification_webhook_timeout_secs =
            match parse_env_or("NOTIFICATION_WEBHOOK_TIMEOUT_SECS", 10) {
                0 => {
                    warn!("NOTIFICATION_WEBHOOK_TIMEOUT_SECS can not be 0, falling back to 10.");
                    10
                }
                timeout => timeout,
            };

        Self {
            port,
            due_poll_interval_secs,
            timer_id_max_attempts,
            notification_webhook_url,
            notification_webhook_key,
            notification_webhook_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
