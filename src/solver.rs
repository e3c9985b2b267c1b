use crate::calendar::{self, SlotId};
use crate::data::{Classroom, Course, RoomId, Schedule, ScheduledCourse, TimetableInput};
use itertools::Itertools;
use log::{debug, info, trace};
use std::time::Instant;

/// Enumerates every complete schedule that satisfies all hard constraints,
/// in a deterministic order: courses are placed in input order, candidate
/// classrooms are tried in input order and start slots in calendar order.
///
/// An unsatisfiable problem is not an error; it simply yields an empty
/// vector.
pub fn enumerate_schedules(input: &TimetableInput) -> Vec<Schedule> {
    let start_time = Instant::now();
    info!(
        "Searching with {} courses, {} classrooms, and {} timeslots...",
        input.courses.len(),
        input.classrooms.len(),
        calendar::TOTAL_SLOTS
    );
    let instructor_load = input
        .courses
        .iter()
        .map(|c| (c.instructor.as_str(), c.name.as_str()))
        .into_group_map();
    debug!("Instructor course load: {instructor_load:?}");

    let mut partial = Vec::with_capacity(input.courses.len());
    let mut solutions = Vec::new();
    place_next(input, &mut partial, &mut solutions);

    info!(
        "Enumeration finished in {:.2?} with {} complete schedules",
        start_time.elapsed(),
        solutions.len()
    );
    solutions
}

/// One level of chronological backtracking: tries every admissible
/// (classroom, slot block) pair for the course at index `partial.len()`,
/// recursing on each and undoing the placement afterwards. At full depth
/// the partial schedule is copied into `solutions`.
fn place_next(input: &TimetableInput, partial: &mut Schedule, solutions: &mut Vec<Schedule>) {
    if partial.len() == input.courses.len() {
        solutions.push(partial.clone());
        return;
    }

    let course_id = partial.len();
    let course = &input.courses[course_id];

    for (room_id, room) in input.classrooms.iter().enumerate() {
        // checked once per classroom; no point looking at slots otherwise
        if !capacity_compliance(course, room) {
            continue;
        }
        for start in 0..calendar::TOTAL_SLOTS {
            let Some(block) = calendar::slot_block(start, course.hours) else {
                continue;
            };
            // preference first, it is usually the most decisive
            let admissible = block.clone().all(|slot| {
                preference_compliance(input, course, slot)
                    && exclusive_classroom(partial, room_id, slot)
                    && instructor_availability(input, partial, course, slot)
                    && coordination_restrictions(input, partial, course, slot)
            });
            if !admissible {
                continue;
            }

            trace!(
                "depth {}: trying {} in {} starting at {}",
                partial.len(),
                course.name,
                room.name,
                calendar::label(start)
            );
            partial.push(ScheduledCourse {
                course: course_id,
                classroom: room_id,
                start_slot: start,
                duration: course.hours,
            });
            place_next(input, partial, solutions);
            partial.pop();
        }
    }
}

/// The classroom can seat the course's enrollment.
fn capacity_compliance(course: &Course, room: &Classroom) -> bool {
    course.students <= room.capacity
}

/// No already-placed course occupies this classroom during the slot.
fn exclusive_classroom(schedule: &[ScheduledCourse], room: RoomId, slot: SlotId) -> bool {
    schedule
        .iter()
        .filter(|placed| placed.classroom == room)
        .all(|placed| !placed.occupies(slot))
}

/// No already-placed course by the same instructor occupies the slot,
/// regardless of room.
fn instructor_availability(
    input: &TimetableInput,
    schedule: &[ScheduledCourse],
    course: &Course,
    slot: SlotId,
) -> bool {
    schedule
        .iter()
        .filter(|placed| input.courses[placed.course].instructor == course.instructor)
        .all(|placed| !placed.occupies(slot))
}

/// The slot is in the instructor's allowed set. An instructor missing from
/// the preference table has no allowed slots, so this always fails.
fn preference_compliance(input: &TimetableInput, course: &Course, slot: SlotId) -> bool {
    match input.preferences.get(&course.instructor) {
        Some(allowed) => allowed.contains(&slot),
        None => false,
    }
}

/// No already-placed course sharing a coordination group with the candidate
/// occupies the slot.
fn coordination_restrictions(
    input: &TimetableInput,
    schedule: &[ScheduledCourse],
    course: &Course,
    slot: SlotId,
) -> bool {
    schedule.iter().all(|placed| {
        let other = &input.courses[placed.course].name;
        let grouped = input
            .coordinations
            .iter()
            .any(|group| group.contains(&course.name) && group.contains(other));
        !grouped || !placed.occupies(slot)
    })
}
