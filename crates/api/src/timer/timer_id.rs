use timerbot_domain::ID;
use timerbot_infra::ITimerRepo;
use timerbot_utils::{create_random_string, TIMER_ID_CHARSET};
use tracing::{error, warn};

/// Four lowercase letters give 26^4 (about 457 000) ids
pub const TIMER_ID_LENGTH: usize = 4;

#[derive(Debug, PartialEq)]
pub enum TimerIdError {
    Storage,
    ExhaustedAttempts(usize),
}

pub fn random_timer_id() -> String {
    create_random_string(TIMER_ID_LENGTH, TIMER_ID_CHARSET)
}

/// Draws candidates until one is not used by any stored `Timer`. Gives up
/// after `max_attempts` candidates.
pub async fn generate_timer_id<F: FnMut() -> String>(
    repo: &dyn ITimerRepo,
    max_attempts: usize,
    mut candidates: F,
) -> Result<ID, TimerIdError> {
    for _ in 0..max_attempts {
        let candidate = candidates();
        let id: ID = match candidate.parse() {
            Ok(id) => id,
            Err(_) => {
                warn!("Skipping malformed timer id candidate: {:?}", candidate);
                continue;
            }
        };
        match repo.find(&id).await {
            Ok(None) => return Ok(id),
            Ok(Some(_)) => continue,
            Err(e) => {
                error!("Unable to check if timer id: {} is taken: {:?}", id, e);
                return Err(TimerIdError::Storage);
            }
        }
    }

    error!(
        "Unable to find an unused timer id after {} attempts",
        max_attempts
    );
    Err(TimerIdError::ExhaustedAttempts(max_attempts))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use timerbot_domain::{Timer, TimerEdit};
    use timerbot_infra::InMemoryTimerRepo;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    async fn seeded_repo(ids: &[&str]) -> InMemoryTimerRepo {
        let repo = InMemoryTimerRepo::new();
        for id in ids {
            let timer = Timer::new(
                id.parse().unwrap(),
                "taken".into(),
                "alice".into(),
                "general".into(),
                now(),
                now(),
            );
            repo.insert(&timer).await.unwrap();
        }
        repo
    }

    fn scripted(ids: Vec<&'static str>) -> impl FnMut() -> String {
        let mut ids = ids.into_iter();
        move || ids.next().unwrap_or("zzzz").to_string()
    }

    #[tokio::test]
    async fn skips_taken_ids() {
        let repo = seeded_repo(&["aaaa", "bbbb"]).await;
        let id = generate_timer_id(&repo, 10, scripted(vec!["aaaa", "bbbb", "cccc"]))
            .await
            .unwrap();
        assert_eq!(id.as_str(), "cccc");
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let repo = seeded_repo(&["aaaa"]).await;
        let mut calls = 0;
        let res = generate_timer_id(&repo, 3, || {
            calls += 1;
            "aaaa".to_string()
        })
        .await;
        assert_eq!(res, Err(TimerIdError::ExhaustedAttempts(3)));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn never_returns_a_stored_id() {
        let taken = ["abcd", "qwer", "asdf", "zxcv", "uiop"];
        let repo = seeded_repo(&taken).await;
        let mut candidates = taken.iter().cycle().take(20).map(|id| id.to_string()).collect::<Vec<_>>();
        candidates.push("free".into());
        let mut candidates = candidates.into_iter();

        let id = generate_timer_id(&repo, 128, || candidates.next().unwrap())
            .await
            .unwrap();
        assert_eq!(id.as_str(), "free");
    }

    #[tokio::test]
    async fn random_ids_are_four_lowercase_letters() {
        for _ in 0..50 {
            let id = random_timer_id();
            assert_eq!(id.len(), TIMER_ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    struct BrokenRepo;

    #[async_trait::async_trait]
    impl ITimerRepo for BrokenRepo {
        async fn insert(&self, _: &Timer) -> anyhow::Result<()> {
            anyhow::bail!("down")
        }
        async fn find(&self, _: &ID) -> anyhow::Result<Option<Timer>> {
            anyhow::bail!("down")
        }
        async fn find_by_owner(&self, _: &str, _: bool) -> anyhow::Result<Vec<Timer>> {
            anyhow::bail!("down")
        }
        async fn save(&self, _: &ID, _: &TimerEdit) -> anyhow::Result<Option<Timer>> {
            anyhow::bail!("down")
        }
        async fn snooze(&self, _: &ID, _: DateTime<Local>) -> anyhow::Result<Option<Timer>> {
            anyhow::bail!("down")
        }
        async fn delete(&self, _: &ID) -> anyhow::Result<Option<Timer>> {
            anyhow::bail!("down")
        }
        async fn find_due(&self, _: DateTime<Local>) -> anyhow::Result<Vec<Timer>> {
            anyhow::bail!("down")
        }
        async fn mark_announced(&self, _: &ID, _: DateTime<Local>) -> anyhow::Result<bool> {
            anyhow::bail!("down")
        }
    }

    #[tokio::test]
    async fn storage_errors_abort() {
        let mut calls = 0;
        let res = generate_timer_id(&BrokenRepo, 10, || {
            calls += 1;
            "aaaa".to_string()
        })
        .await;
        assert_eq!(res, Err(TimerIdError::Storage));
        assert_eq!(calls, 1);
    }
}
