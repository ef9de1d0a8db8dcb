use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use timerbot_domain::{Timer, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerDTO {
    pub id: ID,
    pub message: String,
    pub owner: String,
    pub origin: String,
    pub created_at: DateTime<Local>,
    pub due_at: DateTime<Local>,
    pub effective_due_at: DateTime<Local>,
    pub snooze_count: i64,
    pub announced: bool,
}

impl TimerDTO {
    pub fn new(timer: Timer) -> Self {
        Self {
            id: timer.id,
            message: timer.message,
            owner: timer.owner,
            origin: timer.origin,
            created_at: timer.created_at,
            due_at: timer.due_at,
            effective_due_at: timer.effective_due_at,
            snooze_count: timer.snooze_count,
            announced: timer.announced,
        }
    }
}
