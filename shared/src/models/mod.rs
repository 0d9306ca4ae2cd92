//! Domain models for the Ranch Irrigation Scheduler

mod block;
mod history;
mod meter_reading;
mod ranch;
mod schedule;

pub use block::*;
pub use history::*;
pub use meter_reading::*;
pub use ranch::*;
pub use schedule::*;
