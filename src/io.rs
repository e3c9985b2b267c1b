//! The thin I/O layer around the solver: reading the four problem CSVs and
//! writing one numbered CSV per discovered schedule plus a JSON run summary.

use crate::calendar::{self, SlotId};
use crate::data::{Classroom, Course, Schedule, TimetableInput};
use anyhow::{Context, Result, bail};
use log::warn;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Loads the problem description from `courses.csv`, `classrooms.csv`,
/// `preferences.csv` and `coordinations.csv` in the given directory.
pub fn load_input(dir: &Path) -> Result<TimetableInput> {
    let read = |name: &str| {
        let path = dir.join(name);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    };
    Ok(TimetableInput {
        courses: parse_courses(&read("courses.csv")?)?,
        classrooms: parse_classrooms(&read("classrooms.csv")?)?,
        preferences: parse_preferences(&read("preferences.csv")?)?,
        coordinations: parse_coordinations(&read("coordinations.csv")?),
    })
}

/// Writes each schedule to `<1-based index>.csv` in the output directory.
pub fn write_solutions(dir: &Path, input: &TimetableInput, solutions: &[Schedule]) -> Result<()> {
    for (index, schedule) in solutions.iter().enumerate() {
        let path = dir.join(format!("{}.csv", index + 1));
        fs::write(&path, render_solution(input, schedule))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// Diagnostics written next to the solution files, not part of their format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary<'a> {
    courses: &'a [Course],
    classrooms: &'a [Classroom],
    coordination_groups: usize,
    solution_count: usize,
}

/// Writes `summary.json` describing the input and the number of solutions.
pub fn write_summary(dir: &Path, input: &TimetableInput, solution_count: usize) -> Result<()> {
    let summary = RunSummary {
        courses: &input.courses,
        classrooms: &input.classrooms,
        coordination_groups: input.coordinations.len(),
        solution_count,
    };
    let path = dir.join("summary.json");
    fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// One schedule as CSV text. Only the first slot of each block is emitted;
/// the rest follow from the course duration.
fn render_solution(input: &TimetableInput, schedule: &Schedule) -> String {
    let mut out = String::from("Course,Time,Classroom\n");
    for placed in schedule {
        out.push_str(&format!(
            "{},{},{}\n",
            input.courses[placed.course].name,
            calendar::label(placed.start_slot),
            input.classrooms[placed.classroom].name,
        ));
    }
    out
}

// Non-empty, trimmed data rows with the header line skipped.
fn data_rows(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
}

fn parse_courses(text: &str) -> Result<Vec<Course>> {
    let mut courses = Vec::new();
    for line in data_rows(text) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [name, instructor, students, hours] = fields.as_slice() else {
            bail!("malformed course row: {line:?}");
        };
        courses.push(Course {
            name: name.to_string(),
            instructor: instructor.to_string(),
            students: students
                .parse()
                .with_context(|| format!("student count in {line:?}"))?,
            hours: hours
                .parse()
                .with_context(|| format!("duration in {line:?}"))?,
        });
    }
    Ok(courses)
}

fn parse_classrooms(text: &str) -> Result<Vec<Classroom>> {
    let mut classrooms = Vec::new();
    for line in data_rows(text) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [name, capacity] = fields.as_slice() else {
            bail!("malformed classroom row: {line:?}");
        };
        classrooms.push(Classroom {
            name: name.to_string(),
            capacity: capacity
                .parse()
                .with_context(|| format!("capacity in {line:?}"))?,
        });
    }
    Ok(classrooms)
}

fn parse_preferences(text: &str) -> Result<HashMap<String, HashSet<SlotId>>> {
    let mut preferences = HashMap::new();
    for line in data_rows(text) {
        let Some((instructor, times)) = line.split_once(',') else {
            bail!("malformed preference row: {line:?}");
        };
        let instructor = instructor.trim();
        let mut allowed = HashSet::new();
        for label in times.split_whitespace() {
            match calendar::parse_label(label) {
                Some(slot) => {
                    allowed.insert(slot);
                }
                // an unknown label could never match a calendar slot anyway
                None => warn!("ignoring unknown time slot {label:?} for instructor {instructor}"),
            }
        }
        preferences.insert(instructor.to_string(), allowed);
    }
    Ok(preferences)
}

fn parse_coordinations(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "Courses")
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}
