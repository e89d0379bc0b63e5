//! Course catalog model

use super::Course;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The immutable set of courses a school offers, indexed by course id
///
/// Plans reference catalog courses by id and never own them; many plans can
/// be checked against the same catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Courses indexed by id
    courses: HashMap<String, Course>,
}

impl Catalog {
    /// Create a new empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
        }
    }

    /// Build a catalog from a list of courses
    ///
    /// Later duplicates of an id are ignored; the first occurrence wins.
    #[must_use]
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if its id was already present
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(&course.id) {
            return false;
        }
        self.courses.insert(course.id.clone(), course);
        true
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// Whether a course id exists in the catalog
    #[must_use]
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterate over all courses in unspecified order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }
}
