use crate::error::TimerbotError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use timerbot_api_structs::get_timers::{APIResponse, QueryParams};
use timerbot_domain::Timer;
use timerbot_infra::TimerbotContext;
use tracing::error;

pub async fn get_timers_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<TimerbotContext>,
) -> Result<HttpResponse, TimerbotError> {
    let requester = protect_route(&http_req)?;

    let usecase = GetTimersUseCase {
        owner: requester.user,
        active_only: query.active_only,
    };

    execute(usecase, &ctx)
        .await
        .map(|timers| HttpResponse::Ok().json(APIResponse::new(timers)))
        .map_err(TimerbotError::from)
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TimerbotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct GetTimersUseCase {
    pub owner: String,
    /// Leave out `Timer`s that already have been announced
    pub active_only: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTimersUseCase {
    type Response = Vec<Timer>;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &TimerbotContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .timers
            .find_by_owner(&self.owner, self.active_only)
            .await
            .map_err(|e| {
                error!("Unable to list timers of: {}. Error: {:?}", self.owner, e);
                UseCaseError::StorageError
            })
    }
}
