mod notification;
mod shared;
mod time_resolution;
mod timer;

pub use notification::{
    format_time, humanize_distance, NotificationField, OwnerIdentity, RenderedNotification,
    TimerNotification,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use time_resolution::{
    resolve, resolve_with, DateInterpreter, DateOrder, NaturalLanguageParser, ParserSettings,
    ResolutionError,
};
pub use timer::{Timer, TimerEdit};
