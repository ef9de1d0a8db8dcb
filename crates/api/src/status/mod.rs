use actix_web::{web, HttpResponse};
use timerbot_api_structs::get_service_health::*;
use timerbot_infra::TimerbotContext;

async fn status(ctx: web::Data<TimerbotContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        server_time: ctx.sys.now(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
