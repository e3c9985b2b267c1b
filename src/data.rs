use crate::calendar::SlotId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// Type aliases for clarity
pub type RoomId = usize;
pub type CourseId = usize;

/// Represents a course to be scheduled.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub name: String,
    pub instructor: String,
    pub students: u32,
    /// Required number of consecutive time slots.
    pub hours: usize,
}

/// Represents a physical classroom with a given seating capacity.
#[derive(Debug, Clone, Serialize)]
pub struct Classroom {
    pub name: String,
    pub capacity: u32,
}

/// The complete, read-only input for the scheduling problem.
#[derive(Debug, Clone, Default)]
pub struct TimetableInput {
    pub courses: Vec<Course>,
    /// Kept as a list so candidate classrooms are tried in input order.
    pub classrooms: Vec<Classroom>,
    /// Instructor name to the slots that instructor agrees to teach in.
    /// An instructor absent from this table has no allowed slots at all.
    pub preferences: HashMap<String, HashSet<SlotId>>,
    /// Groups of course names whose slot blocks must never overlap,
    /// regardless of room or instructor.
    pub coordinations: Vec<Vec<String>>,
}

/// A single course bound to a classroom and a contiguous slot block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCourse {
    pub course: CourseId,
    pub classroom: RoomId,
    pub start_slot: SlotId,
    pub duration: usize,
}

impl ScheduledCourse {
    /// Whether this course occupies the given slot.
    pub fn occupies(&self, slot: SlotId) -> bool {
        slot >= self.start_slot && slot < self.start_slot + self.duration
    }
}

/// One in-progress or completed candidate assignment, in placement order.
pub type Schedule = Vec<ScheduledCourse>;
