pub mod allocator;
pub mod types;

pub use allocator::generate_schedule;
pub use types::{DayPlan, WeeklySchedule, Weekday, PERIODS_PER_DAY};
