use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Local};

/// A `Timer` is a reminder that a user scheduled to be announced
/// in the context (e.g. channel) it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub id: ID,
    /// Text shown when the `Timer` is announced
    pub message: String,
    /// The user who created the `Timer` and is the only one allowed to modify it
    pub owner: String,
    /// Where the announcements of this `Timer` are delivered
    pub origin: String,
    pub created_at: DateTime<Local>,
    /// The instant the `Timer` was originally scheduled for
    pub due_at: DateTime<Local>,
    /// The instant the `Timer` will actually be announced at. Equal to `due_at`
    /// unless the `Timer` has been snoozed.
    pub effective_due_at: DateTime<Local>,
    pub snooze_count: i64,
    /// Set once the due announcement has been attempted. An announced `Timer`
    /// never fires again unless it is snoozed.
    pub announced: bool,
}

impl Timer {
    pub fn new(
        id: ID,
        message: String,
        owner: String,
        origin: String,
        due_at: DateTime<Local>,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            message,
            owner,
            origin,
            created_at: now,
            due_at,
            effective_due_at: due_at,
            snooze_count: 0,
            announced: false,
        }
    }

    pub fn is_owned_by(&self, user: &str) -> bool {
        self.owner == user
    }

    pub fn is_snoozed(&self) -> bool {
        self.effective_due_at != self.due_at
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        !self.announced && self.effective_due_at <= now
    }

    pub fn set_message(&mut self, message: String) {
        self.message = message;
    }

    /// Reschedules the `Timer`. This also throws away any snooze.
    pub fn set_due_at(&mut self, due_at: DateTime<Local>) {
        self.due_at = due_at;
        self.effective_due_at = due_at;
    }

    pub fn snooze(&mut self, until: DateTime<Local>) {
        self.effective_due_at = until;
        self.snooze_count += 1;
        self.announced = false;
    }

    pub fn mark_announced(&mut self) {
        self.announced = true;
    }
}

impl Entity<ID> for Timer {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// The fields a user edit changes. Everything else on the stored `Timer`,
/// including a snooze made meanwhile, is left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerEdit {
    pub message: Option<String>,
    /// A new `due_at`, which also replaces `effective_due_at`
    pub due_at: Option<DateTime<Local>>,
}

impl TimerEdit {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.due_at.is_none()
    }

    pub fn apply(&self, timer: &mut Timer) {
        if let Some(message) = &self.message {
            timer.set_message(message.clone());
        }
        if let Some(due_at) = self.due_at {
            timer.set_due_at(due_at);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn factory() -> (Timer, DateTime<Local>) {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let timer = Timer::new(
            "abcd".parse().unwrap(),
            "Water the plants".into(),
            "alice".into(),
            "general".into(),
            now + Duration::minutes(5),
            now,
        );
        (timer, now)
    }

    #[test]
    fn new_timer_is_pending() {
        let (timer, now) = factory();
        assert_eq!(timer.created_at, now);
        assert_eq!(timer.effective_due_at, timer.due_at);
        assert_eq!(timer.snooze_count, 0);
        assert!(!timer.announced);
        assert!(!timer.is_snoozed());
        assert!(timer.is_owned_by("alice"));
        assert!(!timer.is_owned_by("bob"));
    }

    #[test]
    fn is_due_respects_effective_due_at_and_announced() {
        let (mut timer, now) = factory();
        assert!(!timer.is_due(now));
        assert!(timer.is_due(now + Duration::minutes(5)));
        timer.mark_announced();
        assert!(!timer.is_due(now + Duration::minutes(10)));
    }

    #[test]
    fn snooze_rearms_an_announced_timer() {
        let (mut timer, now) = factory();
        timer.mark_announced();
        let until = now + Duration::hours(1);
        timer.snooze(until);
        assert_eq!(timer.effective_due_at, until);
        assert_eq!(timer.snooze_count, 1);
        assert!(!timer.announced);
        assert!(timer.is_snoozed());
    }

    #[test]
    fn rescheduling_drops_the_snooze_but_keeps_the_count() {
        let (mut timer, now) = factory();
        timer.snooze(now + Duration::hours(1));
        let due = now + Duration::days(1);
        timer.set_due_at(due);
        assert_eq!(timer.due_at, due);
        assert_eq!(timer.effective_due_at, due);
        assert_eq!(timer.snooze_count, 1);
        assert!(!timer.is_snoozed());
    }

    #[test]
    fn message_edit_leaves_the_schedule_alone() {
        let (mut timer, now) = factory();
        let snoozed_until = now + Duration::hours(1);
        timer.snooze(snoozed_until);

        let edit = TimerEdit {
            message: Some("Water the garden".into()),
            due_at: None,
        };
        assert!(!edit.is_empty());
        edit.apply(&mut timer);
        assert_eq!(timer.message, "Water the garden");
        assert_eq!(timer.effective_due_at, snoozed_until);
        assert!(timer.is_snoozed());

        assert!(TimerEdit::default().is_empty());
    }
}
