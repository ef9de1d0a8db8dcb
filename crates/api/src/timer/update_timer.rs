use super::{find_owned_timer, subscribers::AnnounceEditedTimer, TimerAccessError};
use crate::error::TimerbotError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use timerbot_api_structs::update_timer::{APIResponse, PathParams, RequestBody};
use timerbot_domain::{resolve, Timer, TimerEdit, ID};
use timerbot_infra::TimerbotContext;
use tracing::error;

pub async fn update_timer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TimerbotContext>,
) -> Result<HttpResponse, TimerbotError> {
    let requester = protect_route(&http_req)?;
    let body = body.0;

    let usecase = UpdateTimerUseCase {
        timer_id: path.timer_id.clone(),
        requester: requester.user,
        message: body.message,
        time: body.time,
    };

    execute(usecase, &ctx)
        .await
        .map(|timer| HttpResponse::Ok().json(APIResponse::new(timer)))
        .map_err(TimerbotError::from)
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NothingToUpdate,
    InvalidTime(String),
    NotFound(ID),
    NotOwner(ID),
    StorageError,
}

impl From<TimerAccessError> for UseCaseError {
    fn from(e: TimerAccessError) -> Self {
        match e {
            TimerAccessError::NotFound(id) => Self::NotFound(id),
            TimerAccessError::NotOwner(id) => Self::NotOwner(id),
            TimerAccessError::Storage => Self::StorageError,
        }
    }
}

impl From<UseCaseError> for TimerbotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NothingToUpdate => {
                Self::BadClientData("Provide a new message, a new time or both.".into())
            }
            UseCaseError::InvalidTime(msg) => Self::BadClientData(msg),
            UseCaseError::NotFound(timer_id) => Self::NotFound(format!(
                "The timer with id: {}, was not found.",
                timer_id
            )),
            UseCaseError::NotOwner(timer_id) => Self::Forbidden(format!(
                "The timer with id: {}, is owned by someone else.",
                timer_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UpdateTimerUseCase {
    pub timer_id: ID,
    pub requester: String,
    pub message: Option<String>,
    /// Unresolved time text. A new time drops any snooze.
    pub time: Option<String>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTimerUseCase {
    type Response = Timer;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        if self.message.is_none() && self.time.is_none() {
            return Err(UseCaseError::NothingToUpdate);
        }

        find_owned_timer(&self.timer_id, &self.requester, ctx).await?;

        let due_at = match &self.time {
            Some(time) => Some(
                resolve(time, ctx.sys.now())
                    .map_err(|e| UseCaseError::InvalidTime(e.to_string()))?,
            ),
            None => None,
        };
        let edit = TimerEdit {
            message: self.message.clone(),
            due_at,
        };

        ctx.repos
            .timers
            .save(&self.timer_id, &edit)
            .await
            .map_err(|e| {
                error!(
                    "Unable to save edit: {:?} of timer: {}. Error: {:?}",
                    edit, self.timer_id, e
                );
                UseCaseError::StorageError
            })?
            // Deleted after the ownership check
            .ok_or_else(|| UseCaseError::NotFound(self.timer_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(AnnounceEditedTimer)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{now, setup, TestContext};
    use chrono::{DateTime, Duration, Local};
    use std::sync::Arc;
    use timerbot_infra::ITimerRepo;

    async fn setup_with_snoozed_timer() -> (TestContext, Timer) {
        let tctx = setup();
        let timer = Timer::new(
            "abcd".parse().unwrap(),
            "Stand up".into(),
            "alice".into(),
            "general".into(),
            now() + Duration::hours(1),
            now(),
        );
        tctx.ctx.repos.timers.insert(&timer).await.unwrap();
        let timer = tctx
            .ctx
            .repos
            .timers
            .snooze(&timer.id, now() + Duration::hours(2))
            .await
            .unwrap()
            .unwrap();
        (tctx, timer)
    }

    fn usecase(message: Option<&str>, time: Option<&str>) -> UpdateTimerUseCase {
        UpdateTimerUseCase {
            timer_id: "abcd".parse().unwrap(),
            requester: "alice".into(),
            message: message.map(String::from),
            time: time.map(String::from),
        }
    }

    #[actix_web::test]
    async fn message_only_edit_keeps_the_snooze() {
        let (tctx, timer) = setup_with_snoozed_timer().await;

        let res = execute(usecase(Some("Sit down"), None), &tctx.ctx)
            .await
            .unwrap();
        assert_eq!(res.message, "Sit down");
        assert_eq!(res.effective_due_at, timer.effective_due_at);
        assert_eq!(res.due_at, timer.due_at);

        let stored = tctx.ctx.repos.timers.find(&timer.id).await.unwrap().unwrap();
        assert_eq!(stored, res);
        assert_eq!(tctx.notifier.kinds(), vec!["edited"]);
    }

    #[actix_web::test]
    async fn new_time_drops_the_snooze_but_not_the_count() {
        let (tctx, timer) = setup_with_snoozed_timer().await;

        let res = usecase(None, Some("in 3 hours"))
            .execute(&tctx.ctx)
            .await
            .unwrap();
        assert_eq!(res.due_at, now() + Duration::hours(3));
        assert_eq!(res.effective_due_at, res.due_at);
        assert_eq!(res.snooze_count, 1);
        assert_eq!(res.message, timer.message);
    }

    #[actix_web::test]
    async fn rejects_invalid_requests_without_writing() {
        let (tctx, timer) = setup_with_snoozed_timer().await;

        assert_eq!(
            usecase(None, None).execute(&tctx.ctx).await,
            Err(UseCaseError::NothingToUpdate)
        );
        assert!(matches!(
            usecase(Some("Sit down"), Some("whenever")).execute(&tctx.ctx).await,
            Err(UseCaseError::InvalidTime(_))
        ));

        let mut not_owner = usecase(Some("Sit down"), None);
        not_owner.requester = "bob".into();
        assert_eq!(
            not_owner.execute(&tctx.ctx).await,
            Err(UseCaseError::NotOwner(timer.id.clone()))
        );

        let stored = tctx.ctx.repos.timers.find(&timer.id).await.unwrap().unwrap();
        assert_eq!(stored, timer);
    }

    /// Snoozes every `Timer` right after handing it out, like a user
    /// snoozing while an edit is in flight
    struct SnoozeAfterReadRepo {
        inner: Arc<dyn ITimerRepo>,
        until: DateTime<Local>,
    }

    #[async_trait::async_trait]
    impl ITimerRepo for SnoozeAfterReadRepo {
        async fn insert(&self, timer: &Timer) -> anyhow::Result<()> {
            self.inner.insert(timer).await
        }
        async fn find(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
            let timer = self.inner.find(timer_id).await?;
            self.inner.snooze(timer_id, self.until).await?;
            Ok(timer)
        }
        async fn find_by_owner(&self, owner: &str, active_only: bool) -> anyhow::Result<Vec<Timer>> {
            self.inner.find_by_owner(owner, active_only).await
        }
        async fn save(&self, timer_id: &ID, edit: &TimerEdit) -> anyhow::Result<Option<Timer>> {
            self.inner.save(timer_id, edit).await
        }
        async fn snooze(&self, timer_id: &ID, until: DateTime<Local>) -> anyhow::Result<Option<Timer>> {
            self.inner.snooze(timer_id, until).await
        }
        async fn delete(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
            self.inner.delete(timer_id).await
        }
        async fn find_due(&self, now: DateTime<Local>) -> anyhow::Result<Vec<Timer>> {
            self.inner.find_due(now).await
        }
        async fn mark_announced(&self, timer_id: &ID, now: DateTime<Local>) -> anyhow::Result<bool> {
            self.inner.mark_announced(timer_id, now).await
        }
    }

    #[actix_web::test]
    async fn message_edit_keeps_a_concurrent_snooze() {
        let mut tctx = setup();
        let timer = Timer::new(
            "abcd".parse().unwrap(),
            "Stand up".into(),
            "alice".into(),
            "general".into(),
            now() + Duration::minutes(10),
            now(),
        );
        tctx.ctx.repos.timers.insert(&timer).await.unwrap();
        let snoozed_until = now() + Duration::days(1);
        tctx.ctx.repos.timers = Arc::new(SnoozeAfterReadRepo {
            inner: tctx.ctx.repos.timers.clone(),
            until: snoozed_until,
        });

        let res = usecase(Some("Sit down"), None)
            .execute(&tctx.ctx)
            .await
            .unwrap();
        assert_eq!(res.message, "Sit down");
        assert_eq!(res.due_at, timer.due_at);
        assert_eq!(res.effective_due_at, snoozed_until);
        assert_eq!(res.snooze_count, 1);
    }

    #[actix_web::test]
    async fn timers_deleted_after_the_check_are_not_found() {
        let (tctx, timer) = setup_with_snoozed_timer().await;
        tctx.ctx.repos.timers.delete(&timer.id).await.unwrap();
        assert_eq!(
            tctx.ctx
                .repos
                .timers
                .save(&timer.id, &TimerEdit::default())
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            usecase(Some("Sit down"), None).execute(&tctx.ctx).await,
            Err(UseCaseError::NotFound(timer.id.clone()))
        );
    }
}
