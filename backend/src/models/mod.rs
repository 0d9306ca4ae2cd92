//! Database models for the Ranch Irrigation Scheduler
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
