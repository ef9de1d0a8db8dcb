use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// Current time of the server. Natural language times are resolved
        /// relative to it and in its time zone.
        pub server_time: DateTime<Local>,
    }
}
