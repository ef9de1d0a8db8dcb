mod status;
mod timer;

pub mod dtos {
    pub use crate::timer::dtos::*;
}

pub use crate::status::api::*;
pub use crate::timer::api::*;
