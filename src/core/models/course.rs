//! Course model and prerequisite conditions

use serde::{Deserialize, Serialize};

/// Credit value at or above which a course spans both semesters
pub const FULL_YEAR_CREDITS: f32 = 10.0;

/// A single prerequisite condition attached to a course
///
/// A condition is either one specific course, or a group of alternatives where
/// completing any one satisfies the condition. Catalog files may still spell a
/// group in the legacy `"MATH10C|MATH10-3"` form; [`PrereqCondition::parse`]
/// handles that once at the load boundary so planner logic never sees
/// delimited strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrereqCondition {
    /// A single required course id
    Single(String),
    /// Alternative course ids; any one satisfies the condition
    AnyOf(Vec<String>),
}

impl PrereqCondition {
    /// Parse a condition from its legacy string form
    ///
    /// `"MATH10C"` becomes [`PrereqCondition::Single`];
    /// `"MATH10C|MATH10-3"` becomes [`PrereqCondition::AnyOf`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.contains('|') {
            Self::AnyOf(raw.split('|').map(str::to_string).collect())
        } else {
            Self::Single(raw.to_string())
        }
    }

    /// The alternative course ids for this condition
    ///
    /// A [`PrereqCondition::Single`] condition is a one-element slice.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::AnyOf(ids) => ids,
        }
    }

    /// The first listed alternative
    ///
    /// Preset generation always expands this option when walking a
    /// prerequisite chain; the order in the catalog is therefore meaningful.
    #[must_use]
    pub fn first_option(&self) -> Option<&str> {
        self.options().first().map(String::as_str)
    }
}

/// Represents a course in the school catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course id (e.g., "MATH10C")
    pub id: String,

    /// Display name (e.g., "Mathematics 10C")
    pub name: String,

    /// Grade level the course is normally offered in (10, 11, or 12)
    pub grade: u8,

    /// Credit value
    pub credits: f32,

    /// Subject classification used for exclusion and requirement matching
    pub category: String,

    /// Prerequisite conditions; all must be satisfied
    #[serde(default)]
    pub prerequisites: Vec<PrereqCondition>,

    /// Whether the course explicitly spans both semesters
    #[serde(default)]
    pub is_full_year: bool,
}

impl Course {
    /// Create a new course with no prerequisites
    ///
    /// # Arguments
    /// * `id` - Course id
    /// * `name` - Display name
    /// * `grade` - Nominal grade level
    /// * `credits` - Credit value
    /// * `category` - Subject classification
    #[must_use]
    pub const fn new(id: String, name: String, grade: u8, credits: f32, category: String) -> Self {
        Self {
            id,
            name,
            grade,
            credits,
            category,
            prerequisites: Vec::new(),
            is_full_year: false,
        }
    }

    /// Add a prerequisite condition
    pub fn add_prerequisite(&mut self, condition: PrereqCondition) {
        if !self.prerequisites.contains(&condition) {
            self.prerequisites.push(condition);
        }
    }

    /// Whether this course occupies both semesters of its grade year
    ///
    /// High-credit courses count as full-year even without the explicit flag.
    #[must_use]
    pub fn spans_full_year(&self) -> bool {
        self.is_full_year || self.credits >= FULL_YEAR_CREDITS
    }

    /// Exclusion key for mutual-exclusion checks
    ///
    /// Two distinct courses sharing a key cannot coexist in one schedule.
    /// Categories carrying a `-30` level suffix normalize to their base
    /// subject, so the diploma-level tracks of a subject exclude each other.
    #[must_use]
    pub fn exclusion_key(&self) -> (&str, u8) {
        let category = self.category.strip_suffix("-30").unwrap_or(&self.category);
        (category, self.grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "MATH10C".to_string(),
            "Mathematics 10C".to_string(),
            10,
            5.0,
            "Math".to_string(),
        );

        assert_eq!(course.id, "MATH10C");
        assert_eq!(course.grade, 10);
        assert!((course.credits - 5.0).abs() < f32::EPSILON);
        assert!(course.prerequisites.is_empty());
        assert!(!course.spans_full_year());
    }

    #[test]
    fn test_full_year_by_credits() {
        let mut course = Course::new(
            "MATH10-FY".to_string(),
            "Mathematics 10 (Full Year)".to_string(),
            10,
            10.0,
            "Math".to_string(),
        );
        assert!(course.spans_full_year());

        course.credits = 5.0;
        assert!(!course.spans_full_year());
        course.is_full_year = true;
        assert!(course.spans_full_year());
    }

    #[test]
    fn test_add_prerequisite_deduplicates() {
        let mut course = Course::new(
            "MATH20-1".to_string(),
            "Mathematics 20-1".to_string(),
            11,
            5.0,
            "Math".to_string(),
        );

        course.add_prerequisite(PrereqCondition::parse("MATH10C"));
        course.add_prerequisite(PrereqCondition::parse("MATH10C"));
        assert_eq!(course.prerequisites.len(), 1);
    }

    #[test]
    fn test_parse_single_and_group() {
        assert_eq!(
            PrereqCondition::parse("MATH10C"),
            PrereqCondition::Single("MATH10C".to_string())
        );
        assert_eq!(
            PrereqCondition::parse("MATH10C|MATH10-3"),
            PrereqCondition::AnyOf(vec!["MATH10C".to_string(), "MATH10-3".to_string()])
        );
    }

    #[test]
    fn test_options_and_first_option() {
        let single = PrereqCondition::parse("SCI10");
        assert_eq!(single.options(), ["SCI10".to_string()]);
        assert_eq!(single.first_option(), Some("SCI10"));

        let group = PrereqCondition::parse("BIO20|CHEM20");
        assert_eq!(group.options().len(), 2);
        assert_eq!(group.first_option(), Some("BIO20"));
    }

    #[test]
    fn test_exclusion_key_strips_diploma_suffix() {
        let ela30 = Course::new(
            "ELA30-1".to_string(),
            "English Language Arts 30-1".to_string(),
            12,
            5.0,
            "ELA-30".to_string(),
        );
        assert_eq!(ela30.exclusion_key(), ("ELA", 12));

        let ela10 = Course::new(
            "ELA10-1".to_string(),
            "English Language Arts 10-1".to_string(),
            10,
            5.0,
            "ELA".to_string(),
        );
        assert_eq!(ela10.exclusion_key(), ("ELA", 10));
    }

    #[test]
    fn test_condition_deserializes_from_mixed_array() {
        let course: Course = toml::from_str(
            r#"
id = "MATH30-1"
name = "Mathematics 30-1"
grade = 12
credits = 5.0
category = "Math"
prerequisites = [["MATH20-1", "MATH20-2"], "MATH10C"]
"#,
        )
        .unwrap();

        assert_eq!(course.prerequisites.len(), 2);
        assert_eq!(
            course.prerequisites[0],
            PrereqCondition::AnyOf(vec!["MATH20-1".to_string(), "MATH20-2".to_string()])
        );
        assert_eq!(
            course.prerequisites[1],
            PrereqCondition::Single("MATH10C".to_string())
        );
    }
}
