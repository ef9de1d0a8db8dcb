use super::{
    subscribers::AnnounceCreatedTimer,
    timer_id::{generate_timer_id, random_timer_id, TimerIdError},
};
use crate::error::TimerbotError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use timerbot_api_structs::create_timer::{APIResponse, RequestBody};
use timerbot_domain::{resolve, Timer};
use timerbot_infra::TimerbotContext;
use tracing::error;

pub async fn create_timer_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TimerbotContext>,
) -> Result<HttpResponse, TimerbotError> {
    let requester = protect_route(&http_req)?;
    let body = body.0;

    let usecase = CreateTimerUseCase {
        message: body.message,
        time: body.time,
        owner: requester.user,
        origin: requester.origin,
    };

    execute(usecase, &ctx)
        .await
        .map(|timer| HttpResponse::Created().json(APIResponse::new(timer)))
        .map_err(TimerbotError::from)
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTime(String),
    StorageError,
    ExhaustedAttempts,
}

impl From<UseCaseError> for TimerbotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTime(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError | UseCaseError::ExhaustedAttempts => Self::InternalError,
        }
    }
}

impl From<TimerIdError> for UseCaseError {
    fn from(e: TimerIdError) -> Self {
        match e {
            TimerIdError::Storage => Self::StorageError,
            TimerIdError::ExhaustedAttempts(_) => Self::ExhaustedAttempts,
        }
    }
}

#[derive(Debug)]
pub struct CreateTimerUseCase {
    pub message: String,
    /// Unresolved time text, e.g. `in 5 minutes`
    pub time: String,
    pub owner: String,
    pub origin: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTimerUseCase {
    type Response = Timer;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let due_at =
            resolve(&self.time, now).map_err(|e| UseCaseError::InvalidTime(e.to_string()))?;

        let id = generate_timer_id(
            ctx.repos.timers.as_ref(),
            ctx.config.timer_id_max_attempts,
            random_timer_id,
        )
        .await?;

        let timer = Timer::new(
            id,
            self.message.clone(),
            self.owner.clone(),
            self.origin.clone(),
            due_at,
            now,
        );
        ctx.repos.timers.insert(&timer).await.map_err(|e| {
            error!("Unable to store timer: {:?}. Error: {:?}", timer, e);
            UseCaseError::StorageError
        })?;

        Ok(timer)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(AnnounceCreatedTimer)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{now, setup};
    use chrono::Duration;

    fn usecase(time: &str) -> CreateTimerUseCase {
        CreateTimerUseCase {
            message: "Take out the trash".into(),
            time: time.into(),
            owner: "alice".into(),
            origin: "general".into(),
        }
    }

    #[actix_web::test]
    async fn creates_pending_timer() {
        let tctx = setup();

        let timer = usecase("in 5 minutes").execute(&tctx.ctx).await.unwrap();
        assert_eq!(timer.due_at, now() + Duration::minutes(5));
        assert_eq!(timer.created_at, now());

        let stored = tctx.ctx.repos.timers.find(&timer.id).await.unwrap().unwrap();
        assert_eq!(stored, timer);
        assert!(!stored.announced);
        assert_eq!(stored.snooze_count, 0);
        assert_eq!(stored.effective_due_at, stored.due_at);
        assert_eq!(stored.owner, "alice");
        assert_eq!(stored.origin, "general");
    }

    #[actix_web::test]
    async fn rejects_unparseable_time() {
        let tctx = setup();

        let res = usecase("not a date").execute(&tctx.ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidTime(_))));
        assert!(tctx
            .ctx
            .repos
            .timers
            .find_by_owner("alice", false)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn announces_creation() {
        let tctx = setup();

        let timer = execute(usecase("tomorrow"), &tctx.ctx).await.unwrap();
        assert_eq!(tctx.notifier.kinds(), vec!["created"]);
        assert_eq!(
            tctx.notifier.notifications.lock().unwrap()[0].timer(),
            &timer
        );

        // Failing announcements do not fail the creation
        tctx.notifier.set_failing(true);
        assert!(execute(usecase("tomorrow"), &tctx.ctx).await.is_ok());
    }
}
