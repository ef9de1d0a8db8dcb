mod notifier;

pub use notifier::{INotifier, LogNotifier, WebhookNotifier, WEBHOOK_KEY_HEADER};
