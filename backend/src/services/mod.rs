//! Business logic services for the Ranch Irrigation Scheduler

pub mod block;
pub mod history;
pub mod meter_reading;
pub mod ranch;
pub mod reporting;
pub mod schedule;
pub mod well;

pub use block::BlockService;
pub use history::HistoryService;
pub use meter_reading::MeterReadingService;
pub use ranch::RanchService;
pub use reporting::ReportingService;
pub use schedule::ScheduleService;
pub use well::WellService;
