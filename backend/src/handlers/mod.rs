//! HTTP handlers

mod block;
mod health;
mod history;
mod meter_reading;
mod ranch;
mod report;
mod schedule;
mod weather;
mod well;

pub use block::*;
pub use health::*;
pub use history::*;
pub use meter_reading::*;
pub use ranch::*;
pub use report::*;
pub use schedule::*;
pub use weather::*;
pub use well::*;
