mod inmemory;
mod postgres;

use chrono::{DateTime, Local};
pub use inmemory::InMemoryTimerRepo;
pub use postgres::PostgresTimerRepo;
use timerbot_domain::{Timer, TimerEdit, ID};

#[async_trait::async_trait]
pub trait ITimerRepo: Send + Sync {
    async fn insert(&self, timer: &Timer) -> anyhow::Result<()>;
    async fn find(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>>;
    /// Ordered by `effective_due_at`
    async fn find_by_owner(&self, owner: &str, active_only: bool) -> anyhow::Result<Vec<Timer>>;
    /// Writes only the columns present in `edit` in a single update, so a
    /// concurrent snooze of a message only edit survives
    async fn save(&self, timer_id: &ID, edit: &TimerEdit) -> anyhow::Result<Option<Timer>>;
    /// Moves `effective_due_at`, bumps `snooze_count` and clears `announced`
    /// in a single update
    async fn snooze(&self, timer_id: &ID, until: DateTime<Local>) -> anyhow::Result<Option<Timer>>;
    async fn delete(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>>;
    /// Unannounced `Timer`s with `effective_due_at <= now`
    async fn find_due(&self, now: DateTime<Local>) -> anyhow::Result<Vec<Timer>>;
    /// Marks the `Timer` only if it is still due at `now`. Returns `false` when
    /// it was deleted, rescheduled or snoozed since it was found.
    async fn mark_announced(&self, timer_id: &ID, now: DateTime<Local>) -> anyhow::Result<bool>;
}
