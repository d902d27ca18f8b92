use crate::roster::{Category, Subject};

use super::types::{
    format_lab_label, format_period_label, DayPlan, WeeklySchedule, Weekday, PERIODS_PER_DAY,
};

/// Generates a weekly timetable from the subject roster
///
/// Fills the 5x6 grid day by day. Each period takes the first subject in
/// roster order with hours left (strict priority, not round-robin), so a
/// subject with many hours can dominate consecutive periods before later
/// subjects are touched. Lab subjects are placed as 2-period blocks when at
/// least 2 hours remain and the day has at least 2 free periods; with a
/// single hour left they fall through to a normal 1-period slot.
///
/// Allocation runs on a working copy of the roster, so the caller's hour
/// totals are untouched and repeated calls over the same roster produce the
/// same timetable.
pub fn generate_schedule(roster: &[Subject]) -> Result<WeeklySchedule, String> {
    if roster.is_empty() {
        return Err("Add at least one subject before generating a timetable".to_string());
    }

    let mut pool: Vec<Subject> = roster.to_vec();
    let mut days = Vec::with_capacity(Weekday::ALL.len());

    for day in Weekday::ALL {
        let mut periods = Vec::with_capacity(PERIODS_PER_DAY);
        let mut daily_hours = 0usize;

        while daily_hours < PERIODS_PER_DAY {
            // First eligible subject in insertion order
            let index = match pool.iter().position(|s| s.hours_remaining > 0) {
                Some(index) => index,
                None => break, // all hours spent, rest of the week stays free
            };

            let subject = &mut pool[index];
            let lab_block = subject.category == Category::Lab
                && subject.hours_remaining >= 2
                && daily_hours <= PERIODS_PER_DAY - 2;

            if lab_block {
                let label = format_lab_label(&subject.name, &subject.faculty);
                periods.push(label.clone());
                periods.push(label);
                subject.hours_remaining -= 2;
                daily_hours += 2;
            } else {
                periods.push(format_period_label(&subject.name, &subject.faculty));
                subject.hours_remaining -= 1;
                daily_hours += 1;
            }

            // Exhausted subjects leave the pool and are never scanned again
            if pool[index].hours_remaining == 0 {
                pool.remove(index);
            }
        }

        days.push(DayPlan { day, periods });
    }

    Ok(WeeklySchedule { days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::add_subject;

    fn roster_of(entries: &[(&str, &str, Category, i64)]) -> Vec<Subject> {
        let mut roster = Vec::new();
        for (name, faculty, category, hours) in entries {
            add_subject(&mut roster, name, faculty, *category, *hours).unwrap();
        }
        roster
    }

    fn count_periods_for(schedule: &WeeklySchedule, name: &str) -> usize {
        schedule
            .days
            .iter()
            .flat_map(|d| &d.periods)
            .filter(|label| label.starts_with(&format!("{} ", name)))
            .count()
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(generate_schedule(&[]).is_err());
    }

    #[test]
    fn six_hour_subject_fills_monday_and_ends_exhausted() {
        let roster = roster_of(&[("Maths", "Mr.X", Category::Major, 6)]);
        let schedule = generate_schedule(&roster).unwrap();

        assert_eq!(schedule.total_periods(), 6);
        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(monday.periods.len(), 6);
        assert!(monday.periods.iter().all(|p| p == "Maths - Mr.X"));
        for day in &schedule.days[1..] {
            assert!(day.periods.is_empty());
        }
    }

    #[test]
    fn thirty_hour_roster_fills_all_thirty_periods() {
        let roster = roster_of(&[("Maths", "Mr.X", Category::Major, 30)]);
        let schedule = generate_schedule(&roster).unwrap();

        assert_eq!(schedule.total_periods(), 30);
        for day in &schedule.days {
            assert_eq!(day.periods.len(), 6);
        }
    }

    #[test]
    fn lab_hours_are_placed_as_two_period_blocks() {
        let roster = roster_of(&[("Physics Lab", "Dr.Y", Category::Lab, 4)]);
        let schedule = generate_schedule(&roster).unwrap();

        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(monday.periods.len(), 4);
        assert!(monday
            .periods
            .iter()
            .all(|p| p == "Physics Lab (Lab) - Dr.Y"));
        for day in &schedule.days[1..] {
            assert!(day.periods.is_empty());
        }
    }

    #[test]
    fn lab_block_may_start_in_the_last_two_periods() {
        // Four Major hours leave daily_hours at 4; a lab block still fits
        // in periods 5-6 of the same day.
        let roster = roster_of(&[
            ("Maths", "Mr.X", Category::Major, 4),
            ("Chem Lab", "Dr.Z", Category::Lab, 2),
        ]);
        let schedule = generate_schedule(&roster).unwrap();

        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(monday.periods.len(), 6);
        assert_eq!(monday.periods[4], "Chem Lab (Lab) - Dr.Z");
        assert_eq!(monday.periods[5], "Chem Lab (Lab) - Dr.Z");
    }

    #[test]
    fn lab_with_one_free_period_left_spills_as_single_slots() {
        // Five Major hours leave only period 6 free, so the lab cannot open
        // a block; both lab hours land as plain single-period slots.
        let roster = roster_of(&[
            ("Maths", "Mr.X", Category::Major, 5),
            ("Chem Lab", "Dr.Z", Category::Lab, 2),
        ]);
        let schedule = generate_schedule(&roster).unwrap();

        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(monday.periods[5], "Chem Lab - Dr.Z");
        let tuesday = schedule.day(Weekday::Tuesday).unwrap();
        assert_eq!(tuesday.periods, vec!["Chem Lab - Dr.Z".to_string()]);
    }

    #[test]
    fn lab_with_odd_hours_ends_on_a_single_period() {
        let roster = roster_of(&[("Bio Lab", "Dr.W", Category::Lab, 3)]);
        let schedule = generate_schedule(&roster).unwrap();

        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(
            monday.periods,
            vec![
                "Bio Lab (Lab) - Dr.W".to_string(),
                "Bio Lab (Lab) - Dr.W".to_string(),
                "Bio Lab - Dr.W".to_string(),
            ]
        );
    }

    #[test]
    fn scan_is_strict_priority_not_round_robin() {
        let roster = roster_of(&[
            ("A", "F1", Category::Major, 1),
            ("B", "F2", Category::Major, 1),
        ]);
        let schedule = generate_schedule(&roster).unwrap();

        let monday = schedule.day(Weekday::Monday).unwrap();
        assert_eq!(monday.periods, vec!["A - F1".to_string(), "B - F2".to_string()]);
    }

    #[test]
    fn no_subject_exceeds_its_requested_hours() {
        let roster = roster_of(&[
            ("Tamil", "Ms.A", Category::Language, 5),
            ("Maths", "Mr.X", Category::Major, 6),
            ("Physics Lab", "Dr.Y", Category::Lab, 4),
            ("English", "Ms.B", Category::Language, 5),
        ]);
        let schedule = generate_schedule(&roster).unwrap();

        assert_eq!(count_periods_for(&schedule, "Tamil"), 5);
        assert_eq!(count_periods_for(&schedule, "Maths"), 6);
        assert_eq!(count_periods_for(&schedule, "Physics"), 4);
        assert_eq!(count_periods_for(&schedule, "English"), 5);
        assert_eq!(schedule.total_periods(), 20);
    }

    #[test]
    fn days_come_out_in_fixed_order_with_at_most_six_periods() {
        // 35 requested hours oversubscribe the 30-cell grid
        let roster = roster_of(&[
            ("Maths", "Mr.X", Category::Major, 30),
            ("English", "Ms.B", Category::Language, 5),
        ]);
        let schedule = generate_schedule(&roster).unwrap();

        let days: Vec<Weekday> = schedule.days.iter().map(|d| d.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
        for day in &schedule.days {
            assert!(day.periods.len() <= PERIODS_PER_DAY);
        }
        assert_eq!(schedule.total_periods(), 30);
        // Strict priority: the first subject takes the whole grid
        assert_eq!(count_periods_for(&schedule, "English"), 0);
    }

    #[test]
    fn caller_roster_is_not_mutated_and_runs_are_repeatable() {
        let roster = roster_of(&[
            ("Maths", "Mr.X", Category::Major, 6),
            ("Physics Lab", "Dr.Y", Category::Lab, 4),
        ]);
        let first = generate_schedule(&roster).unwrap();
        assert_eq!(roster[0].hours_remaining, 6);
        assert_eq!(roster[1].hours_remaining, 4);

        let second = generate_schedule(&roster).unwrap();
        assert_eq!(first, second);
    }
}
