use chrono::{DateTime, Duration, Local, TimeZone};
use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Arc, Mutex,
};
use timerbot_domain::TimerNotification;
use timerbot_infra::{INotifier, ISys, TimerbotContext};

/// Clock that only moves when told to
pub struct StaticTimeSys {
    millis: AtomicI64,
}

impl StaticTimeSys {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            millis: AtomicI64::new(now.timestamp_millis()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Keeps every notification it is asked to deliver
#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<TimerNotification>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.kind())
            .collect()
    }

    pub fn clear(&self) {
        self.notifications.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl INotifier for RecordingNotifier {
    async fn notify(&self, notification: &TimerNotification) -> anyhow::Result<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("Chat platform is unreachable");
        }
        Ok(())
    }
}

pub struct TestContext {
    pub ctx: TimerbotContext,
    pub sys: Arc<StaticTimeSys>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Monday 19 October 2026, noon
pub fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn setup() -> TestContext {
    let sys = Arc::new(StaticTimeSys::new(now()));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut ctx = TimerbotContext::create_inmemory();
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();

    TestContext { ctx, sys, notifier }
}
