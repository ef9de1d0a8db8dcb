use crate::timer::Timer;
use chrono::{DateTime, Duration, Local};
use chrono_humanize::HumanTime;
use serde::Serialize;

/// How the owner of a `Timer` is displayed in an announcement
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerIdentity {
    pub user_id: String,
}

impl OwnerIdentity {
    pub fn new(user_id: String) -> Self {
        Self { user_id }
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

/// Something that happened to a `Timer` which should be announced in its origin
#[derive(Debug, Clone, PartialEq)]
pub enum TimerNotification {
    Created(Timer),
    Deleted(Timer),
    Edited(Timer),
    Snoozed(Timer),
    Due { timer: Timer, owner: OwnerIdentity },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
}

/// Display ready version of a `TimerNotification`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNotification {
    pub kind: &'static str,
    pub title: &'static str,
    pub description: String,
    pub color: u32,
    pub origin: String,
    pub fields: Vec<NotificationField>,
}

fn field(name: &str, value: String) -> NotificationField {
    NotificationField {
        name: name.into(),
        value,
    }
}

impl TimerNotification {
    pub fn timer(&self) -> &Timer {
        match self {
            Self::Created(timer)
            | Self::Deleted(timer)
            | Self::Edited(timer)
            | Self::Snoozed(timer) => timer,
            Self::Due { timer, .. } => timer,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Deleted(_) => "deleted",
            Self::Edited(_) => "edited",
            Self::Snoozed(_) => "snoozed",
            Self::Due { .. } => "due",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Created(_) => "Timer Created",
            Self::Deleted(_) => "Timer Deleted",
            Self::Edited(_) => "Timer Edited",
            Self::Snoozed(_) => "Timer Snoozed",
            Self::Due { .. } => "Timer Due",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Self::Created(_) => 0x00ff00,
            Self::Deleted(_) => 0xff0000,
            Self::Edited(_) => 0xffff00,
            Self::Snoozed(_) => 0x00ffff,
            Self::Due { .. } => 0x0000ff,
        }
    }

    pub fn render(&self, now: DateTime<Local>) -> RenderedNotification {
        let timer = self.timer();
        let mut fields = vec![field("ID", timer.id.to_string())];
        match self {
            Self::Created(timer) => {
                fields.push(field("Due", format_time(&timer.due_at, &now, true)));
            }
            Self::Deleted(timer) => {
                fields.push(field(
                    "Due",
                    format_time(&timer.effective_due_at, &now, false),
                ));
                fields.push(field("Created", format_time(&timer.created_at, &now, true)));
            }
            Self::Edited(timer) => {
                fields.push(field(
                    "Due",
                    format_time(&timer.effective_due_at, &now, true),
                ));
                fields.push(field("Created", format_time(&timer.created_at, &now, true)));
            }
            Self::Snoozed(timer) => {
                fields.push(field(
                    "New Due Date",
                    format_time(&timer.effective_due_at, &now, true),
                ));
                fields.push(field("Created", format_time(&timer.created_at, &now, true)));
                fields.push(field("Snoozed", timer.snooze_count.to_string()));
            }
            Self::Due { timer, owner } => {
                fields.push(field("Owner", owner.mention()));
                fields.push(field(
                    "Due",
                    format_time(&timer.effective_due_at, &now, false),
                ));
                fields.push(field("Created", format_time(&timer.created_at, &now, true)));
            }
        }

        RenderedNotification {
            kind: self.kind(),
            title: self.title(),
            description: timer.message.clone(),
            color: self.color(),
            origin: timer.origin.clone(),
            fields,
        }
    }
}

/// Formats an instant in the local time zone, e.g. `19/10/2026, 15:04:05 (in 5 minutes)`
pub fn format_time(time: &DateTime<Local>, now: &DateTime<Local>, include_distance: bool) -> String {
    let base = time.format("%d/%m/%Y, %H:%M:%S").to_string();
    if include_distance {
        format!("{} ({})", base, humanize_distance(*time - *now))
    } else {
        base
    }
}

/// Rough, human friendly distance like `in 3 hours` or `2 days ago`
pub fn humanize_distance(distance: Duration) -> String {
    HumanTime::from(distance).to_string()
}
