use super::{find_owned_timer, subscribers::AnnounceDeletedTimer, TimerAccessError};
use crate::error::TimerbotError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use timerbot_api_structs::delete_timer::{APIResponse, PathParams};
use timerbot_domain::{Timer, ID};
use timerbot_infra::TimerbotContext;
use tracing::error;

pub async fn delete_timer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<TimerbotContext>,
) -> Result<HttpResponse, TimerbotError> {
    let requester = protect_route(&http_req)?;

    let usecase = DeleteTimerUseCase {
        timer_id: path.timer_id.clone(),
        requester: requester.user,
    };

    execute(usecase, &ctx)
        .await
        .map(|timer| HttpResponse::Ok().json(APIResponse::new(timer)))
        .map_err(TimerbotError::from)
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
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
pub struct DeleteTimerUseCase {
    pub timer_id: ID,
    pub requester: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTimerUseCase {
    /// The `Timer` as it was right before it was deleted
    type Response = Timer;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        find_owned_timer(&self.timer_id, &self.requester, ctx).await?;

        match ctx.repos.timers.delete(&self.timer_id).await {
            Ok(Some(timer)) => Ok(timer),
            // Deleted by a concurrent request
            Ok(None) => Err(UseCaseError::NotFound(self.timer_id.clone())),
            Err(e) => {
                error!("Unable to delete timer: {}. Error: {:?}", self.timer_id, e);
                Err(UseCaseError::StorageError)
            }
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(AnnounceDeletedTimer)]
    }
}
