//! Cross-checks the backtracking enumeration against a naive reference
//! that filters the full cartesian product of placements, on instances
//! small enough to brute-force.

use course_timetabler::calendar;
use course_timetabler::data::{Classroom, Course, Schedule, ScheduledCourse, TimetableInput};
use course_timetabler::solver;
use itertools::Itertools;
use proptest::prelude::*;
use std::collections::HashMap;

/// Full soundness check of a complete schedule, written independently of
/// the solver's per-slot predicates.
fn is_valid(input: &TimetableInput, schedule: &Schedule) -> bool {
    for placed in schedule {
        let course = &input.courses[placed.course];
        if course.students > input.classrooms[placed.classroom].capacity {
            return false;
        }
        let Some(block) = calendar::slot_block(placed.start_slot, placed.duration) else {
            return false;
        };
        let allowed = input.preferences.get(&course.instructor);
        if !block
            .clone()
            .all(|slot| allowed.is_some_and(|a| a.contains(&slot)))
        {
            return false;
        }
    }
    for (i, a) in schedule.iter().enumerate() {
        for b in &schedule[i + 1..] {
            let overlap = (a.start_slot..a.start_slot + a.duration).any(|slot| b.occupies(slot));
            if !overlap {
                continue;
            }
            if a.classroom == b.classroom {
                return false;
            }
            let (ca, cb) = (&input.courses[a.course], &input.courses[b.course]);
            if ca.instructor == cb.instructor {
                return false;
            }
            if input
                .coordinations
                .iter()
                .any(|group| group.contains(&ca.name) && group.contains(&cb.name))
            {
                return false;
            }
        }
    }
    true
}

/// Every complete assignment of every course, filtered for validity. The
/// per-course option order matches the solver's iteration order, so the
/// result must equal the solver's output exactly, order included.
fn reference_enumerate(input: &TimetableInput) -> Vec<Schedule> {
    let placements: Vec<Vec<ScheduledCourse>> = input
        .courses
        .iter()
        .enumerate()
        .map(|(course, c)| {
            (0..input.classrooms.len())
                .cartesian_product(0..calendar::TOTAL_SLOTS)
                .filter(|&(_, start)| calendar::slot_block(start, c.hours).is_some())
                .map(|(classroom, start_slot)| ScheduledCourse {
                    course,
                    classroom,
                    start_slot,
                    duration: c.hours,
                })
                .collect()
        })
        .collect();
    placements
        .into_iter()
        .multi_cartesian_product()
        .filter(|candidate| is_valid(input, candidate))
        .collect()
}

const INSTRUCTORS: [&str; 2] = ["Adams", "Baker"];

fn instance_strategy() -> impl Strategy<Value = TimetableInput> {
    let courses = prop::collection::vec((1u32..30, 1usize..=2, 0usize..2), 1..=2);
    let rooms = prop::collection::vec(5u32..40, 1..=2);
    // allowed slots drawn from Mon1..Tue2 to keep instances tight
    let prefs = prop::collection::vec(prop::collection::hash_set(0usize..10, 0..6), 2);
    (courses, rooms, prefs, any::<bool>()).prop_map(|(courses, rooms, prefs, coordinated)| {
        let courses: Vec<Course> = courses
            .into_iter()
            .enumerate()
            .map(|(i, (students, hours, instructor))| Course {
                name: format!("C{i}"),
                instructor: INSTRUCTORS[instructor].to_string(),
                students,
                hours,
            })
            .collect();
        let classrooms = rooms
            .into_iter()
            .enumerate()
            .map(|(i, capacity)| Classroom {
                name: format!("R{i}"),
                capacity,
            })
            .collect();
        let preferences: HashMap<_, _> = INSTRUCTORS
            .iter()
            .zip(prefs)
            .map(|(name, slots)| (name.to_string(), slots))
            .collect();
        let coordinations = if coordinated {
            vec![courses.iter().map(|c| c.name.clone()).collect()]
        } else {
            Vec::new()
        };
        TimetableInput {
            courses,
            classrooms,
            preferences,
            coordinations,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enumeration_matches_exhaustive_reference(input in instance_strategy()) {
        prop_assert_eq!(solver::enumerate_schedules(&input), reference_enumerate(&input));
    }

    #[test]
    fn every_enumerated_schedule_is_sound(input in instance_strategy()) {
        for schedule in solver::enumerate_schedules(&input) {
            prop_assert!(is_valid(&input, &schedule));
        }
    }
}

#[test]
fn two_hour_courses_skip_day_boundaries() {
    let input = TimetableInput {
        courses: vec![Course {
            name: "Lab".to_string(),
            instructor: "Adams".to_string(),
            students: 5,
            hours: 2,
        }],
        classrooms: vec![Classroom {
            name: "R0".to_string(),
            capacity: 30,
        }],
        preferences: HashMap::from([("Adams".to_string(), (0..calendar::TOTAL_SLOTS).collect())]),
        coordinations: vec![],
    };
    let found = solver::enumerate_schedules(&input);
    assert_eq!(found, reference_enumerate(&input));
    assert_eq!(found.len(), 35);
    assert!(
        found
            .iter()
            .all(|s| calendar::day_of(s[0].start_slot) == calendar::day_of(s[0].start_slot + 1))
    );
}
