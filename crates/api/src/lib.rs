mod error;
mod job_schedulers;
mod shared;
mod status;
mod timer;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::start_due_timers_job;
use std::net::TcpListener;
use timerbot_infra::TimerbotContext;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use shared::auth::{ORIGIN_HEADER, USER_HEADER};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    timer::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    shutdown: CancellationToken,
}

impl Application {
    pub async fn new(context: TimerbotContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let shutdown = CancellationToken::new();
        Application::start_job_schedulers(context, shutdown.clone());

        Ok(Self {
            server,
            port,
            shutdown,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Cancelling the token stops the background jobs
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    fn start_job_schedulers(context: TimerbotContext, shutdown: CancellationToken) {
        start_due_timers_job(context, shutdown);
    }

    async fn configure_server(context: TimerbotContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port: {}", port);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.shutdown.cancel();
        res
    }
}
