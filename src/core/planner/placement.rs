//! Course placement with structured rejection reasons

use crate::core::models::{
    Catalog, Course, Delivery, Plan, PlannedCourse, Semester, SummerWindow,
};
use crate::core::planner::resolver;

/// Why a course could not be added to a schedule
///
/// These are expected, recoverable outcomes, never panics. The caller
/// decides how to present them; [`std::fmt::Display`] carries the
/// student-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    /// The course is already in the plan
    Duplicate,
    /// The targeted summer window already holds its one course
    SummerSlotFull {
        /// The window that is full
        window: SummerWindow,
    },
    /// At least one prerequisite condition is not finished before the target term
    PrerequisitesUnmet,
    /// A planned course shares the candidate's exclusion key
    MutuallyExclusive {
        /// Id of the already-planned conflicting course
        conflicting_id: String,
    },
}

impl PlacementRejection {
    /// Stable reason code for callers that branch on the rejection kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::SummerSlotFull { .. } => "summer-slot-full",
            Self::PrerequisitesUnmet => "prerequisites-unmet",
            Self::MutuallyExclusive { .. } => "mutually-exclusive",
        }
    }
}

impl std::fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "this course is already in the plan"),
            Self::SummerSlotFull { window } => match window {
                SummerWindow::AfterGrade10 => {
                    write!(f, "only one course can be taken in the summer after Grade 10")
                }
                SummerWindow::AfterGrade11Or12 => {
                    write!(f, "only one course can be taken in the summer after Grade 11")
                }
            },
            Self::PrerequisitesUnmet => {
                write!(f, "prerequisites are not completed before this term")
            }
            Self::MutuallyExclusive { conflicting_id } => {
                write!(f, "mutually exclusive with planned course '{conflicting_id}'")
            }
        }
    }
}

impl std::error::Error for PlacementRejection {}

/// Try to add a course to a plan at a specific slot
///
/// Preconditions are checked in order: duplicate, summer capacity,
/// prerequisites, mutual exclusion. On success the entry is appended with a
/// normalized semester: summer placements carry none, full-year courses are
/// forced to start in semester 1 so the year-end completion rule holds, and a
/// missing semester defaults to semester 1.
///
/// # Arguments
/// * `plan` - Schedule to mutate
/// * `course` - Catalog course being placed
/// * `delivery` - Delivery method for the placement
/// * `grade` - Grade year to place the course in
/// * `semester` - Semester within the grade year (`None` for summer)
/// * `catalog` - Course catalog
///
/// # Errors
/// Returns the first [`PlacementRejection`] encountered; the plan is
/// unchanged on rejection.
pub fn place_course(
    plan: &mut Plan,
    course: &Course,
    delivery: Delivery,
    grade: u8,
    semester: Option<Semester>,
    catalog: &Catalog,
) -> Result<(), PlacementRejection> {
    if plan.contains(&course.id) {
        return Err(PlacementRejection::Duplicate);
    }

    if delivery.is_summer() {
        let window = SummerWindow::for_grade(course.grade);
        if plan.summer_count(window, catalog) > 0 {
            return Err(PlacementRejection::SummerSlotFull { window });
        }
    }

    if !resolver::prerequisites_satisfied(course, grade, semester, delivery, plan, catalog) {
        return Err(PlacementRejection::PrerequisitesUnmet);
    }

    if let Some(conflicting) = resolver::exclusion_conflict(course, plan, catalog) {
        return Err(PlacementRejection::MutuallyExclusive {
            conflicting_id: conflicting.id.clone(),
        });
    }

    let semester = if delivery.is_summer() {
        None
    } else if course.spans_full_year() {
        Some(Semester::First)
    } else {
        Some(semester.unwrap_or(Semester::First))
    };

    plan.add(PlannedCourse {
        id: course.id.clone(),
        delivery,
        placed_in_grade: grade,
        semester,
    });
    Ok(())
}
