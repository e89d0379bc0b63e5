//! Completion-time ordering for planned courses
//!
//! Every (grade, semester, delivery) slot maps onto one comparable number so
//! prerequisite checks reduce to a strict less-than comparison. Semester 1
//! finishes at `grade + 0.1`, semester 2 and full-year courses at
//! `grade + 0.2`, and summer school at `grade + 0.5` (after the school year,
//! before the next one).

use crate::core::models::{Course, Delivery, PlannedCourse, Semester};

/// Fraction of a grade year at which semester 1 completes
pub const SEMESTER_1_OFFSET: f64 = 0.1;

/// Fraction of a grade year at which semester 2 completes
pub const SEMESTER_2_OFFSET: f64 = 0.2;

/// Fraction of a grade year at which summer school completes
pub const SUMMER_OFFSET: f64 = 0.5;

/// When a planned course finishes, as a comparable time value
///
/// Full-year courses always finish at year end regardless of which semester
/// they start in.
#[must_use]
pub fn completion_time(course: &Course, placed: &PlannedCourse) -> f64 {
    let grade = f64::from(placed.placed_in_grade);
    if placed.delivery.is_summer() {
        return grade + SUMMER_OFFSET;
    }
    if course.spans_full_year() {
        return grade + SEMESTER_2_OFFSET;
    }
    match placed.semester.unwrap_or(Semester::First) {
        Semester::First => grade + SEMESTER_1_OFFSET,
        Semester::Second => grade + SEMESTER_2_OFFSET,
    }
}

/// When a candidate placement starts, as a comparable time value
///
/// A prerequisite is satisfied only by a course whose completion time is
/// strictly less than this.
#[must_use]
pub fn target_time(grade: u8, semester: Option<Semester>, delivery: Delivery) -> f64 {
    let grade = f64::from(grade);
    if delivery.is_summer() {
        return grade + SUMMER_OFFSET;
    }
    match semester.unwrap_or(Semester::First) {
        Semester::First => grade + SEMESTER_1_OFFSET,
        Semester::Second => grade + SEMESTER_2_OFFSET,
    }
}
