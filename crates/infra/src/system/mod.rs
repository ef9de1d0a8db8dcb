use chrono::{DateTime, Local, TimeZone, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current instant in the local time zone of the process
    fn now(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.get_timestamp_millis())
            .single()
            .unwrap_or_else(Local::now)
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
