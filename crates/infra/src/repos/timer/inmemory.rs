use super::ITimerRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Local};
use timerbot_domain::{Timer, TimerEdit, ID};

pub struct InMemoryTimerRepo {
    timers: std::sync::Mutex<Vec<Timer>>,
}

impl InMemoryTimerRepo {
    pub fn new() -> Self {
        Self {
            timers: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryTimerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITimerRepo for InMemoryTimerRepo {
    async fn insert(&self, timer: &Timer) -> anyhow::Result<()> {
        if find(&timer.id, &self.timers).is_some() {
            anyhow::bail!("Timer with id: {} already exists", timer.id);
        }
        insert(timer, &self.timers);
        Ok(())
    }

    async fn find(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
        Ok(find(timer_id, &self.timers))
    }

    async fn find_by_owner(&self, owner: &str, active_only: bool) -> anyhow::Result<Vec<Timer>> {
        let mut timers = find_by(&self.timers, |timer| {
            timer.is_owned_by(owner) && !(active_only && timer.announced)
        });
        timers.sort_by(|a, b| {
            a.effective_due_at
                .cmp(&b.effective_due_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(timers)
    }

    async fn save(&self, timer_id: &ID, edit: &TimerEdit) -> anyhow::Result<Option<Timer>> {
        Ok(update(timer_id, &self.timers, |timer| edit.apply(timer)))
    }

    async fn snooze(&self, timer_id: &ID, until: DateTime<Local>) -> anyhow::Result<Option<Timer>> {
        Ok(update(timer_id, &self.timers, |timer| timer.snooze(until)))
    }

    async fn delete(&self, timer_id: &ID) -> anyhow::Result<Option<Timer>> {
        Ok(delete(timer_id, &self.timers))
    }

    async fn find_due(&self, now: DateTime<Local>) -> anyhow::Result<Vec<Timer>> {
        Ok(find_by(&self.timers, |timer| timer.is_due(now)))
    }

    async fn mark_announced(&self, timer_id: &ID, now: DateTime<Local>) -> anyhow::Result<bool> {
        let mut marked = false;
        update(timer_id, &self.timers, |timer| {
            if timer.is_due(now) {
                timer.mark_announced();
                marked = true;
            }
        });
        Ok(marked)
    }
}
