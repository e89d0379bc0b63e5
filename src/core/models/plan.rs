//! Schedule model: planned courses and the plan that holds them

use super::Catalog;
use serde::{Deserialize, Serialize};

/// How a planned course is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// In-school, semestered delivery
    Regular,
    /// Online delivery; scheduled like a regular course
    Elearning,
    /// Summer school between grade years
    Summer,
}

impl Delivery {
    /// Whether this is the summer delivery method
    #[must_use]
    pub const fn is_summer(self) -> bool {
        matches!(self, Self::Summer)
    }
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Regular => "regular",
            Self::Elearning => "elearning",
            Self::Summer => "summer",
        };
        write!(f, "{as_str}")
    }
}

/// Semester within a grade year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
    /// Fall semester
    First = 1,
    /// Spring semester
    Second = 2,
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(format!("invalid semester: {other} (expected 1 or 2)")),
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester as Self
    }
}

/// One of the two summer-session slots in a three-year schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummerWindow {
    /// The summer between grade 10 and grade 11
    AfterGrade10,
    /// The combined window after grade 11 or grade 12
    AfterGrade11Or12,
}

impl SummerWindow {
    /// The window a course of the given nominal grade falls into
    #[must_use]
    pub const fn for_grade(grade: u8) -> Self {
        if grade <= 10 {
            Self::AfterGrade10
        } else {
            Self::AfterGrade11Or12
        }
    }
}

/// A course placed into a student's schedule
///
/// References a catalog course by id; the catalog entry itself is never owned
/// or mutated by the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Id of the catalog course this entry references
    pub id: String,

    /// Delivery method for this placement
    pub delivery: Delivery,

    /// Grade year the course is scheduled in (may differ from the nominal grade)
    pub placed_in_grade: u8,

    /// Semester within the grade year; `None` for summer delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
}

/// A student's course schedule
///
/// Holds at most one entry per course id. All placement validation lives in
/// the planner; the plan itself only enforces the no-duplicate rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Planned courses in insertion order
    courses: Vec<PlannedCourse>,
}

impl Plan {
    /// Create a new empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// All planned courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[PlannedCourse] {
        &self.courses
    }

    /// Look up a planned course by id
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&PlannedCourse> {
        self.courses.iter().find(|pc| pc.id == course_id)
    }

    /// Whether a course id is already planned
    #[must_use]
    pub fn contains(&self, course_id: &str) -> bool {
        self.get(course_id).is_some()
    }

    /// Add a planned course
    ///
    /// # Returns
    /// `true` if the entry was added, `false` if the course id was already
    /// planned. Placement validation beyond the duplicate rule belongs to
    /// the planner.
    pub fn add(&mut self, planned: PlannedCourse) -> bool {
        if self.contains(&planned.id) {
            return false;
        }
        self.courses.push(planned);
        true
    }

    /// Remove a planned course by id
    ///
    /// # Returns
    /// `true` if the course was removed, `false` if it wasn't planned
    pub fn remove(&mut self, course_id: &str) -> bool {
        if let Some(pos) = self.courses.iter().position(|pc| pc.id == course_id) {
            self.courses.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of planned courses
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the plan is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of summer-delivery courses occupying the given window
    ///
    /// The window is keyed by each course's nominal grade; entries whose id is
    /// missing from the catalog are ignored.
    #[must_use]
    pub fn summer_count(&self, window: SummerWindow, catalog: &Catalog) -> usize {
        self.courses
            .iter()
            .filter(|pc| pc.delivery.is_summer())
            .filter_map(|pc| catalog.get(&pc.id))
            .filter(|course| SummerWindow::for_grade(course.grade) == window)
            .count()
    }
}
