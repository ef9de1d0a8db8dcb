use crate::dtos::TimerDTO;
use serde::{Deserialize, Serialize};
use timerbot_domain::{Timer, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerResponse {
    pub timer: TimerDTO,
}

impl TimerResponse {
    pub fn new(timer: Timer) -> Self {
        Self {
            timer: TimerDTO::new(timer),
        }
    }
}

pub mod create_timer {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        /// Absolute date or natural language like `in 5 minutes`
        pub time: String,
    }

    pub type APIResponse = TimerResponse;
}

pub mod get_timers {
    use super::*;

    fn default_active_only() -> bool {
        true
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default = "default_active_only")]
        pub active_only: bool,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub timers: Vec<TimerDTO>,
    }

    impl APIResponse {
        pub fn new(timers: Vec<Timer>) -> Self {
            Self {
                timers: timers.into_iter().map(TimerDTO::new).collect(),
            }
        }
    }
}

pub mod delete_timer {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub timer_id: ID,
    }

    pub type APIResponse = TimerResponse;
}

pub mod update_timer {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub timer_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub time: Option<String>,
    }

    pub type APIResponse = TimerResponse;
}

pub mod snooze_timer {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub timer_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub time: String,
    }

    pub type APIResponse = TimerResponse;
}
