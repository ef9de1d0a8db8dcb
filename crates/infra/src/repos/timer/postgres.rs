use super::ITimerRepo;
use chrono::{DateTime, Local, Utc};
use sqlx::{FromRow, PgPool};
use std::convert::TryFrom;
use timerbot_domain::{Timer, TimerEdit, ID};
use tracing::error;

pub struct PostgresTimerRepo {
    pool: PgPool,
}

impl PostgresTimerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TimerRaw {
    timer_id: String,
    message: String,
    owner: String,
    origin: String,
    created_at: DateTime<Utc>,
    due_at: DateTime<Utc>,
    effective_due_at: DateTime<Utc>,
    snooze_count: i64,
    announced: bool,
}

impl TryFrom<TimerRaw> for Timer {
    type Error = anyhow::Error;

    fn try_from(e: TimerRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.timer_id.parse()?,
            message: e.message,
            owner: e.owner,
            origin: e.origin,
            created_at: e.created_at.with_timezone(&Local),
            due_at: e.due_at.with_timezone(&Local),
            effective_due_at: e.effective_due_at.with_timezone(&Local),
            snooze_count: e.snooze_count,
            announced: e.announced,
        })
    }
}

fn to_timers(timers: Vec<TimerRaw>) -> anyhow::Result<Vec<Timer>> {
    timers.into_iter().map(Timer::try_from).collect()
}

const TIMER_COLUMNS: &str =
    "timer_id, message, owner, origin, created_at, due_at, effective_due_at, snooze_count, announced";

#[async_trait::async_trait]
impl ITimerRepo for PostgresTimerRepo {
    async fn insert(&self, timer: &Timer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO timers(timer_id, message, owner, origin, created_at, due_at, effective_due_at, snooze_count, announced)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(timer.id.as_str())
        .bind(&timer.message)
        .bind(&timer.owner)
        .bind(&timer.origin)
        .bind(timer.created_at.with_timezone(&Utc))
        .bind(timer.due_at.with_timezone(&Utc))
        .bind(timer.effective_due_at.with_timezone(&Utc))
        .bind(timer.snooze_count)
        .bind(timer.announced)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert timer: {:?}. DB returned error: {:?}",
                timer, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
        let res: Option<TimerRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM timers WHERE timer_id = $1",
            TIMER_COLUMNS
        ))
        .bind(timer_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find timer with id: {:?} failed. DB returned error: {:?}",
                timer_id, e
            );
            e
        })?;
        res.map(Timer::try_from).transpose()
    }

    async fn find_by_owner(&self, owner: &str, active_only: bool) -> anyhow::Result<Vec<Timer>> {
        let timers: Vec<TimerRaw> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM timers
            WHERE owner = $1 AND (NOT $2 OR announced = FALSE)
            ORDER BY effective_due_at, timer_id
            "#,
            TIMER_COLUMNS
        ))
        .bind(owner)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find timers by owner: {:?} failed. DB returned error: {:?}",
                owner, e
            );
            e
        })?;
        to_timers(timers)
    }

    async fn save(&self, timer_id: &ID, edit: &TimerEdit) -> anyhow::Result<Option<Timer>> {
        let res: Option<TimerRaw> = sqlx::query_as(&format!(
            r#"
            UPDATE timers
            SET message = COALESCE($2, message),
            due_at = COALESCE($3, due_at),
            effective_due_at = COALESCE($3, effective_due_at)
            WHERE timer_id = $1
            RETURNING {}
            "#,
            TIMER_COLUMNS
        ))
        .bind(timer_id.as_str())
        .bind(edit.message.as_deref())
        .bind(edit.due_at.map(|due_at| due_at.with_timezone(&Utc)))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save edit: {:?} of timer with id: {:?}. DB returned error: {:?}",
                edit, timer_id, e
            );
            e
        })?;
        res.map(Timer::try_from).transpose()
    }

    async fn snooze(&self, timer_id: &ID, until: DateTime<Local>) -> anyhow::Result<Option<Timer>> {
        let res: Option<TimerRaw> = sqlx::query_as(&format!(
            r#"
            UPDATE timers
            SET effective_due_at = $2,
            snooze_count = snooze_count + 1,
            announced = FALSE
            WHERE timer_id = $1
            RETURNING {}
            "#,
            TIMER_COLUMNS
        ))
        .bind(timer_id.as_str())
        .bind(until.with_timezone(&Utc))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Snooze timer with id: {:?} failed. DB returned error: {:?}",
                timer_id, e
            );
            e
        })?;
        res.map(Timer::try_from).transpose()
    }

    async fn delete(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
        let res: Option<TimerRaw> = sqlx::query_as(&format!(
            "DELETE FROM timers WHERE timer_id = $1 RETURNING {}",
            TIMER_COLUMNS
        ))
        .bind(timer_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete timer with id: {:?} failed. DB returned error: {:?}",
                timer_id, e
            );
            e
        })?;
        res.map(Timer::try_from).transpose()
    }

    async fn find_due(&self, now: DateTime<Local>) -> anyhow::Result<Vec<Timer>> {
        let timers: Vec<TimerRaw> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM timers
            WHERE effective_due_at <= $1 AND announced = FALSE
            "#,
            TIMER_COLUMNS
        ))
        .bind(now.with_timezone(&Utc))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find due timers at: {} failed. DB returned error: {:?}",
                now, e
            );
            e
        })?;
        to_timers(timers)
    }

    async fn mark_announced(&self, timer_id: &ID, now: DateTime<Local>) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE timers
            SET announced = TRUE
            WHERE timer_id = $1 AND announced = FALSE AND effective_due_at <= $2
            "#,
        )
        .bind(timer_id.as_str())
        .bind(now.with_timezone(&Utc))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Mark timer with id: {:?} as announced failed. DB returned error: {:?}",
                timer_id, e
            );
            e
        })?;
        Ok(res.rows_affected() > 0)
    }
}
