use serde::{Deserialize, Serialize};

/// Number of teaching periods in one day
pub const PERIODS_PER_DAY: usize = 6;

/// Teaching days, always emitted in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

/// Period assignments for a single day
///
/// `periods` holds up to `PERIODS_PER_DAY` label strings; when the roster
/// runs out of hours the list is shorter and the missing tail renders as
/// free periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub periods: Vec<String>,
}

/// One generated weekly timetable, Monday through Friday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: Vec<DayPlan>,
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Total number of periods assigned across the week
    pub fn total_periods(&self) -> usize {
        self.days.iter().map(|d| d.periods.len()).sum()
    }
}

/// Formats a single-period slot label
pub fn format_period_label(name: &str, faculty: &str) -> String {
    format!("{} - {}", name, faculty)
}

/// Formats a lab-block slot label
pub fn format_lab_label(name: &str, faculty: &str) -> String {
    format!("{} (Lab) - {}", name, faculty)
}
