use actix_web::web;
use timerbot_domain::{Timer, ID};
use timerbot_infra::TimerbotContext;
use tracing::error;

pub mod announce_due_timers;
mod create_timer;
mod delete_timer;
mod get_timers;
mod snooze_timer;
mod subscribers;
mod timer_id;
mod update_timer;

use create_timer::create_timer_controller;
use delete_timer::delete_timer_controller;
use get_timers::get_timers_controller;
use snooze_timer::snooze_timer_controller;
use update_timer::update_timer_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/timers", web::post().to(create_timer_controller));
    cfg.route("/timers", web::get().to(get_timers_controller));

    cfg.route(
        "/timers/{timer_id}",
        web::delete().to(delete_timer_controller),
    );
    cfg.route("/timers/{timer_id}", web::put().to(update_timer_controller));

    cfg.route(
        "/timers/{timer_id}/snooze",
        web::post().to(snooze_timer_controller),
    );
}

#[derive(Debug, PartialEq)]
pub(crate) enum TimerAccessError {
    NotFound(ID),
    NotOwner(ID),
    Storage,
}

/// Looks up a `Timer` that `requester` is allowed to modify
pub(crate) async fn find_owned_timer(
    timer_id: &ID,
    requester: &str,
    ctx: &TimerbotContext,
) -> Result<Timer, TimerAccessError> {
    let timer = ctx.repos.timers.find(timer_id).await.map_err(|e| {
        error!("Unable to look up timer: {}. Error: {:?}", timer_id, e);
        TimerAccessError::Storage
    })?;
    match timer {
        Some(timer) if timer.is_owned_by(requester) => Ok(timer),
        Some(_) => Err(TimerAccessError::NotOwner(timer_id.clone())),
        None => Err(TimerAccessError::NotFound(timer_id.clone())),
    }
}
