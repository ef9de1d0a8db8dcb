mod shared;
mod timer;

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use timer::{ITimerRepo, InMemoryTimerRepo, PostgresTimerRepo};

#[derive(Clone)]
pub struct Repos {
    pub timers: Arc<dyn ITimerRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            timers: Arc::new(PostgresTimerRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            timers: Arc::new(InMemoryTimerRepo::new()),
        }
    }
}
