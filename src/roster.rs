use csv::Reader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Subject category, decides the block size during allocation
/// (Lab subjects are placed as 2-period blocks when possible)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Language,
    Major,
    Lab,
}

impl Category {
    /// Parses a category from user input, case-insensitive
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_lowercase().as_str() {
            "language" => Some(Category::Language),
            "major" => Some(Category::Major),
            "lab" => Some(Category::Lab),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Language => "Language",
            Category::Major => "Major",
            Category::Lab => "Lab",
        }
    }
}

/// Weekly grid capacity: 5 days of 6 periods
pub const MAX_WEEKLY_HOURS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub faculty: String,
    pub category: Category,
    pub hours_remaining: u32,
}

/// Validates and appends a new subject to the roster
///
/// Rejects empty name/faculty (after trimming), non-positive weekly hours,
/// and duplicate subject names (exact match). On rejection the roster is
/// left untouched.
pub fn add_subject(
    roster: &mut Vec<Subject>,
    name: &str,
    faculty: &str,
    category: Category,
    hours: i64,
) -> Result<(), String> {
    let name = name.trim();
    let faculty = faculty.trim();

    if name.is_empty() {
        return Err("Subject name is required".to_string());
    }
    if faculty.is_empty() {
        return Err("Faculty name is required".to_string());
    }
    if hours <= 0 {
        return Err("Weekly hours must be a positive number".to_string());
    }
    if hours > MAX_WEEKLY_HOURS {
        return Err(format!("Weekly hours cannot exceed {}", MAX_WEEKLY_HOURS));
    }
    if roster.iter().any(|s| s.name == name) {
        return Err(format!("Subject '{}' already exists", name));
    }

    roster.push(Subject {
        name: name.to_string(),
        faculty: faculty.to_string(),
        category,
        hours_remaining: hours as u32,
    });

    Ok(())
}

/// Removes a subject from the roster by exact name match
/// Returns true if a subject was removed
pub fn remove_subject(roster: &mut Vec<Subject>, name: &str) -> bool {
    let before = roster.len();
    roster.retain(|s| s.name != name);
    roster.len() != before
}

/// Loads a subject roster from a CSV file with columns:
/// name,faculty,category,hours
///
/// Rows that fail validation (bad category, duplicate name, zero hours)
/// are skipped so one bad line does not sink the whole file.
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Subject>, Box<dyn std::error::Error>> {
    let mut reader = Reader::from_path(csv_path)?;
    let mut roster = Vec::new();

    for result in reader.records() {
        let record = result?;

        if record.len() < 4 {
            continue; // Skip incomplete records
        }

        let name = record.get(0).unwrap_or("").trim();
        let faculty = record.get(1).unwrap_or("").trim();
        let category = match Category::parse(record.get(2).unwrap_or("")) {
            Some(category) => category,
            None => {
                log::warn!("Skipping subject '{}': unknown category", name);
                continue;
            }
        };
        let hours: i64 = record.get(3).unwrap_or("").trim().parse().unwrap_or(0);

        if let Err(err) = add_subject(&mut roster, name, faculty, category, hours) {
            log::warn!("Skipping subject '{}': {}", name, err);
        }
    }

    Ok(roster)
}
