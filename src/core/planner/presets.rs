//! Preset plan generation from program requirements
//!
//! Expands a program's required courses (and the first option of each group
//! requirement) through their prerequisite chains, adds a baseline of
//! mandatory diploma courses, then assigns everything to terms with a simple
//! greedy balancer: four courses per semester, prerequisites decide the
//! earliest semester, full-year courses always start in semester 1.

use crate::core::models::{Catalog, Delivery, Plan, PlannedCourse, Semester};
use crate::core::planner::program::ProgramRequirements;
use crate::core::planner::resolver::{transitive_closure, ResolveError};
use crate::core::planner::timeline::{self, SEMESTER_1_OFFSET};
use std::collections::HashMap;

/// Settings controlling preset generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSettings {
    /// Allow moving the summer candidate into a summer window
    pub allow_summer: bool,

    /// Course that may be taken in summer school to free a semester slot
    pub summer_candidate: String,

    /// Diploma courses every preset includes even when the program does not
    /// name them. A baseline course is skipped when the expanded set already
    /// carries a course sharing its subject prefix.
    pub baseline_courses: Vec<String>,

    /// Maximum regular courses per semester
    pub semester_capacity: usize,
}

impl Default for PresetSettings {
    fn default() -> Self {
        Self {
            allow_summer: false,
            summer_candidate: "CALM".to_string(),
            baseline_courses: vec![
                "ELA30-1".to_string(),
                "SS30-1".to_string(),
                "PE10".to_string(),
                "CALM".to_string(),
                "SCI10".to_string(),
                "MATH10C".to_string(),
            ],
            semester_capacity: 4,
        }
    }
}

/// Length of the id prefix used to match baseline courses against the
/// already-expanded set (e.g., "ELA3" matches any ELA 30-level pick)
const BASELINE_PREFIX_LEN: usize = 4;

/// Generate a plan covering a program's requirements
///
/// # Arguments
/// * `program` - Admission requirements to cover
/// * `catalog` - Course catalog
/// * `settings` - Generation settings
///
/// # Errors
/// Returns [`ResolveError::CycleDetected`] when a prerequisite chain in the
/// catalog loops.
pub fn generate_plan(
    program: &ProgramRequirements,
    catalog: &Catalog,
    settings: &PresetSettings,
) -> Result<Plan, ResolveError> {
    let mut wanted: Vec<String> = Vec::new();

    for id in &program.required_courses {
        merge_closure(id, catalog, &mut wanted)?;
    }
    for group in &program.group_requirements {
        if let Some(best_option) = group.courses.first() {
            merge_closure(best_option, catalog, &mut wanted)?;
        }
    }

    for id in &settings.baseline_courses {
        let prefix = &id[..BASELINE_PREFIX_LEN.min(id.len())];
        if !wanted.iter().any(|cid| cid.contains(prefix)) {
            merge_closure(id, catalog, &mut wanted)?;
        }
    }

    let mut courses: Vec<_> = wanted
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect();
    courses.sort_by_key(|course| course.grade);

    let mut plan = Plan::new();
    let mut semester_load: HashMap<(u8, Semester), usize> = HashMap::new();

    for course in courses {
        if settings.allow_summer && course.id == settings.summer_candidate {
            plan.add(PlannedCourse {
                id: course.id.clone(),
                delivery: Delivery::Summer,
                placed_in_grade: 10,
                semester: None,
            });
            continue;
        }

        // Latest prerequisite completion decides the earliest semester.
        let mut earliest_start = 0.0_f64;
        for condition in &course.prerequisites {
            let Some(first) = condition.first_option() else {
                continue;
            };
            if let (Some(placed), Some(prereq)) = (plan.get(first), catalog.get(first)) {
                let finish = timeline::completion_time(prereq, placed);
                if finish > earliest_start {
                    earliest_start = finish;
                }
            }
        }

        let mut target = if earliest_start >= f64::from(course.grade) + SEMESTER_1_OFFSET {
            Semester::Second
        } else {
            Semester::First
        };
        if semester_load
            .get(&(course.grade, target))
            .copied()
            .unwrap_or(0)
            >= settings.semester_capacity
        {
            target = Semester::Second;
        }

        let semester = if course.spans_full_year() {
            *semester_load.entry((course.grade, Semester::First)).or_insert(0) += 1;
            Semester::First
        } else {
            *semester_load.entry((course.grade, target)).or_insert(0) += 1;
            target
        };

        plan.add(PlannedCourse {
            id: course.id.clone(),
            delivery: Delivery::Regular,
            placed_in_grade: course.grade,
            semester: Some(semester),
        });
    }

    Ok(plan)
}

fn merge_closure(
    course_id: &str,
    catalog: &Catalog,
    wanted: &mut Vec<String>,
) -> Result<(), ResolveError> {
    for id in transitive_closure(course_id, catalog)? {
        if !wanted.contains(&id) {
            wanted.push(id);
        }
    }
    Ok(())
}
