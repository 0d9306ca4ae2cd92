//! Shared types and computations for the Ranch Irrigation Scheduler
//!
//! This crate contains the irrigation-time calculator, volume conversion and
//! history aggregation used by the backend server and by the browser (via WASM).

pub mod error;
pub mod irrigation;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;
pub mod volume;

pub use error::*;
pub use irrigation::*;
pub use models::*;
pub use report::*;
pub use types::*;
pub use validation::*;
pub use volume::*;
