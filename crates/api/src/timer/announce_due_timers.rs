use crate::shared::usecase::UseCase;
use timerbot_domain::{OwnerIdentity, TimerNotification};
use timerbot_infra::TimerbotContext;
use tracing::{error, warn};

/// Outcome of one pass over the due `Timer`s
#[derive(Debug, Default, PartialEq)]
pub struct DueTimersReport {
    /// `Timer`s that were marked as announced
    pub fired: usize,
    /// `Timer`s whose notification could not be delivered. They are marked
    /// as announced anyway.
    pub notification_failures: usize,
    /// `Timer`s that were deleted, rescheduled or snoozed between being
    /// found and being marked. They are left as they are.
    pub superseded: usize,
    /// `Timer`s that could not be marked because of a storage error. They
    /// stay due and are announced again by the next pass.
    pub mark_failures: usize,
}

impl DueTimersReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

/// Announces every `Timer` that is due and has not been announced yet.
/// A `Timer` is announced at most once: it is marked regardless of whether
/// the delivery succeeded.
#[derive(Debug)]
pub struct AnnounceDueTimersUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for AnnounceDueTimersUseCase {
    type Response = DueTimersReport;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let due_timers = ctx.repos.timers.find_due(now).await.map_err(|e| {
            error!("Unable to find due timers. Error: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut report = DueTimersReport::default();
        for timer in due_timers {
            let timer_id = timer.id.clone();
            let owner = OwnerIdentity::new(timer.owner.clone());
            let notification = TimerNotification::Due { timer, owner };
            if let Err(e) = ctx.notifier.notify(&notification).await {
                warn!("Unable to announce due timer: {}. Error: {:?}", timer_id, e);
                report.notification_failures += 1;
            }

            match ctx.repos.timers.mark_announced(&timer_id, now).await {
                Ok(true) => report.fired += 1,
                Ok(false) => report.superseded += 1,
                Err(e) => {
                    error!(
                        "Unable to mark timer: {} as announced. Error: {:?}",
                        timer_id, e
                    );
                    report.mark_failures += 1;
                }
            }
        }

        Ok(report)
    }
}
