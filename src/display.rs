use std::fs::File;
use std::io::Write;

use crate::schedule::{WeeklySchedule, PERIODS_PER_DAY};

/// Prints a weekly timetable in a readable format
pub fn print_week_schedule(schedule: &WeeklySchedule) {
    println!("\n=== Weekly Timetable ===");
    println!("Total periods assigned: {}", schedule.total_periods());

    for day in &schedule.days {
        println!("\n{}:", day.day.name());
        for period in 0..PERIODS_PER_DAY {
            match day.periods.get(period) {
                Some(label) => println!("  Period {} -> {}", period + 1, label),
                None => println!("  Period {} -> [FREE]", period + 1),
            }
        }
    }
}

/// Writes a weekly timetable to a file, one period per line
pub fn write_schedule_to_file(
    schedule: &WeeklySchedule,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    for day in &schedule.days {
        writeln!(file, "** {} **", day.day.name())?;
        for period in 0..PERIODS_PER_DAY {
            match day.periods.get(period) {
                Some(label) => writeln!(file, "Period {} {}", period + 1, label)?,
                None => writeln!(file, "Period {} [FREE]", period + 1)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{add_subject, Category};
    use crate::schedule::generate_schedule;
    use tempfile::TempDir;

    #[test]
    fn file_output_marks_free_periods() {
        let mut roster = Vec::new();
        add_subject(&mut roster, "Maths", "Mr.X", Category::Major, 2).unwrap();
        let schedule = generate_schedule(&roster).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("week.txt");
        write_schedule_to_file(&schedule, path.to_str().unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("** Monday **"));
        assert!(contents.contains("Period 1 Maths - Mr.X"));
        assert!(contents.contains("Period 3 [FREE]"));
        assert!(contents.contains("** Friday **"));
    }
}
