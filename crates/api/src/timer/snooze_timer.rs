use super::{find_owned_timer, subscribers::AnnounceSnoozedTimer, TimerAccessError};
use crate::error::TimerbotError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use timerbot_api_structs::snooze_timer::{APIResponse, PathParams, RequestBody};
use timerbot_domain::{resolve, Timer, ID};
use timerbot_infra::TimerbotContext;
use tracing::error;

pub async fn snooze_timer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TimerbotContext>,
) -> Result<HttpResponse, TimerbotError> {
    let requester = protect_route(&http_req)?;

    let usecase = SnoozeTimerUseCase {
        timer_id: path.timer_id.clone(),
        requester: requester.user,
        time: body.0.time,
    };

    execute(usecase, &ctx)
        .await
        .map(|timer| HttpResponse::Ok().json(APIResponse::new(timer)))
        .map_err(TimerbotError::from)
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
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

/// Postpones a `Timer`, also one that already has been announced
#[derive(Debug)]
pub struct SnoozeTimerUseCase {
    pub timer_id: ID,
    pub requester: String,
    pub time: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeTimerUseCase {
    type Response = Timer;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        find_owned_timer(&self.timer_id, &self.requester, ctx).await?;

        let until = resolve(&self.time, ctx.sys.now())
            .map_err(|e| UseCaseError::InvalidTime(e.to_string()))?;

        match ctx.repos.timers.snooze(&self.timer_id, until).await {
            Ok(Some(timer)) => Ok(timer),
            Ok(None) => Err(UseCaseError::NotFound(self.timer_id.clone())),
            Err(e) => {
                error!("Unable to snooze timer: {}. Error: {:?}", self.timer_id, e);
                Err(UseCaseError::StorageError)
            }
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(AnnounceSnoozedTimer)]
    }
}
