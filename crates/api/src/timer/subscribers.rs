use super::{
    create_timer::CreateTimerUseCase, delete_timer::DeleteTimerUseCase,
    snooze_timer::SnoozeTimerUseCase, update_timer::UpdateTimerUseCase,
};
use crate::shared::usecase::Subscriber;
use timerbot_domain::{Timer, TimerNotification};
use timerbot_infra::TimerbotContext;
use tracing::error;

/// Delivery is best effort, the lifecycle operation already succeeded
async fn announce(notification: TimerNotification, ctx: &TimerbotContext) {
    if let Err(e) = ctx.notifier.notify(&notification).await {
        error!(
            "Unable to announce that timer: {} was {}. Error: {:?}",
            notification.timer().id,
            notification.kind(),
            e
        );
    }
}

pub struct AnnounceCreatedTimer;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateTimerUseCase> for AnnounceCreatedTimer {
    async fn notify(&self, timer: &Timer, ctx: &TimerbotContext) {
        announce(TimerNotification::Created(timer.clone()), ctx).await;
    }
}

pub struct AnnounceDeletedTimer;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteTimerUseCase> for AnnounceDeletedTimer {
    async fn notify(&self, timer: &Timer, ctx: &TimerbotContext) {
        announce(TimerNotification::Deleted(timer.clone()), ctx).await;
    }
}

pub struct AnnounceEditedTimer;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateTimerUseCase> for AnnounceEditedTimer {
    async fn notify(&self, timer: &Timer, ctx: &TimerbotContext) {
        announce(TimerNotification::Edited(timer.clone()), ctx).await;
    }
}

pub struct AnnounceSnoozedTimer;

#[async_trait::async_trait(?Send)]
impl Subscriber<SnoozeTimerUseCase> for AnnounceSnoozedTimer {
    async fn notify(&self, timer: &Timer, ctx: &TimerbotContext) {
        announce(TimerNotification::Snoozed(timer.clone()), ctx).await;
    }
}
