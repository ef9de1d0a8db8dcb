use crate::{
    shared::usecase::execute,
    timer::announce_due_timers::{AnnounceDueTimersUseCase, DueTimersReport},
};
use std::time::Duration;
use timerbot_infra::TimerbotContext;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs one announcement pass
pub async fn announce_due_timers(ctx: &TimerbotContext) -> Option<DueTimersReport> {
    let report = execute(AnnounceDueTimersUseCase {}, ctx).await.ok()?;
    if !report.is_empty() {
        info!(
            fired = report.fired,
            notification_failures = report.notification_failures,
            superseded = report.superseded,
            mark_failures = report.mark_failures,
            "Announced due timers"
        );
    }
    Some(report)
}

/// Polls for due `Timer`s until `shutdown` is cancelled. A pass is awaited
/// before the next tick so passes never overlap, and ticks missed while a
/// pass was running are skipped.
pub fn start_due_timers_job(ctx: TimerbotContext, shutdown: CancellationToken) -> JoinHandle<()> {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.due_poll_interval_secs);
        let mut due_interval = interval(period);
        due_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Polling for due timers every {:?}", period);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Stopped polling for due timers");
                    break;
                }
                _ = due_interval.tick() => {
                    announce_due_timers(&ctx).await;
                }
            }
        }
    })
}
