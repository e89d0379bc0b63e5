//! Prerequisite satisfaction, transitive closure, and exclusion checks

use crate::core::models::{Catalog, Course, Delivery, Plan, Semester};
use crate::core::planner::timeline;

/// Error from prerequisite-chain resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The prerequisite graph loops back through the named course
    ///
    /// A well-formed catalog is acyclic; this guards against malformed data
    /// instead of recursing forever.
    CycleDetected {
        /// A course on the detected cycle
        course_id: String,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleDetected { course_id } => {
                write!(f, "prerequisite cycle detected through course '{course_id}'")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Check whether a course's prerequisites are satisfied for a placement
///
/// Each condition must be met (AND); within a condition any option suffices
/// (OR). An option counts only when it is planned and finishes strictly
/// before the target slot starts. Options whose id is missing from the
/// catalog are unsatisfiable rather than an error, so a partially
/// inconsistent catalog degrades instead of crashing.
///
/// # Arguments
/// * `course` - Candidate course
/// * `target_grade` - Grade year of the candidate placement
/// * `target_semester` - Semester of the candidate placement (`None` for summer)
/// * `target_delivery` - Delivery method of the candidate placement
/// * `plan` - The schedule being checked against
/// * `catalog` - Course catalog
#[must_use]
pub fn prerequisites_satisfied(
    course: &Course,
    target_grade: u8,
    target_semester: Option<Semester>,
    target_delivery: Delivery,
    plan: &Plan,
    catalog: &Catalog,
) -> bool {
    if course.prerequisites.is_empty() {
        return true;
    }

    let target = timeline::target_time(target_grade, target_semester, target_delivery);

    course.prerequisites.iter().all(|condition| {
        condition.options().iter().any(|option_id| {
            let Some(placed) = plan.get(option_id) else {
                return false;
            };
            let Some(option) = catalog.get(option_id) else {
                return false;
            };
            timeline::completion_time(option, placed) < target
        })
    })
}

/// Resolve the full prerequisite chain needed for a course
///
/// Depth-first expansion that always follows the *first* option of an
/// OR-group, a deterministic tie-break that decides which of two equivalent
/// chains preset generation builds. The result is in dependency order
/// (prerequisites before dependents) and ends with the course itself.
/// Ids missing from the catalog are skipped.
///
/// # Errors
/// Returns [`ResolveError::CycleDetected`] when the catalog's prerequisite
/// graph contains a cycle reachable from `course_id`.
pub fn transitive_closure(course_id: &str, catalog: &Catalog) -> Result<Vec<String>, ResolveError> {
    let mut resolved = Vec::new();
    let mut in_progress = Vec::new();
    resolve_into(course_id, catalog, &mut resolved, &mut in_progress)?;
    Ok(resolved)
}

fn resolve_into(
    course_id: &str,
    catalog: &Catalog,
    resolved: &mut Vec<String>,
    in_progress: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if resolved.iter().any(|id| id == course_id) {
        return Ok(());
    }
    if in_progress.iter().any(|id| id == course_id) {
        return Err(ResolveError::CycleDetected {
            course_id: course_id.to_string(),
        });
    }
    let Some(course) = catalog.get(course_id) else {
        return Ok(());
    };

    in_progress.push(course_id.to_string());
    for condition in &course.prerequisites {
        if let Some(first) = condition.first_option() {
            resolve_into(first, catalog, resolved, in_progress)?;
        }
    }
    in_progress.pop();

    resolved.push(course_id.to_string());
    Ok(())
}

/// Find a planned course that is mutually exclusive with the candidate
///
/// Two distinct courses conflict when they share an exclusion key: the same
/// normalized category at the same grade, which covers the difficulty tracks
/// of one subject. Planned entries missing from the catalog are ignored.
///
/// # Returns
/// The conflicting catalog course, or `None` when the candidate is clear
#[must_use]
pub fn exclusion_conflict<'a>(
    course: &Course,
    plan: &Plan,
    catalog: &'a Catalog,
) -> Option<&'a Course> {
    plan.courses()
        .iter()
        .filter(|pc| pc.id != course.id)
        .filter_map(|pc| catalog.get(&pc.id))
        .find(|existing| existing.exclusion_key() == course.exclusion_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PlannedCourse, PrereqCondition};

    fn course(id: &str, grade: u8) -> Course {
        Course::new(
            id.to_string(),
            id.to_string(),
            grade,
            5.0,
            "Math".to_string(),
        )
    }

    fn with_prereq(mut c: Course, raw: &str) -> Course {
        c.add_prerequisite(PrereqCondition::parse(raw));
        c
    }

    fn placed(id: &str, grade: u8, semester: Semester) -> PlannedCourse {
        PlannedCourse {
            id: id.to_string(),
            delivery: Delivery::Regular,
            placed_in_grade: grade,
            semester: Some(semester),
        }
    }

    #[test]
    fn test_no_prerequisites_is_trivially_satisfied() {
        let catalog = Catalog::new();
        let plan = Plan::new();
        let c = course("MATH10C", 10);

        assert!(prerequisites_satisfied(
            &c,
            10,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_prior_semester_satisfies() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));
        let candidate = with_prereq(course("MATH20-1", 11), "MATH10C");

        let mut plan = Plan::new();
        plan.add(placed("MATH10C", 10, Semester::Second));

        // 10.2 < 11.1
        assert!(prerequisites_satisfied(
            &candidate,
            11,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_same_term_does_not_satisfy() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));
        let candidate = with_prereq(course("MATH20-1", 11), "MATH10C");

        let mut plan = Plan::new();
        plan.add(placed("MATH10C", 11, Semester::First));

        // 11.1 is not < 11.1
        assert!(!prerequisites_satisfied(
            &candidate,
            11,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_full_year_prerequisite_not_done_mid_year() {
        let mut catalog = Catalog::new();
        let mut fy = course("MATH10-FY", 10);
        fy.credits = 10.0;
        catalog.add_course(fy);
        let candidate = with_prereq(course("MATH20-1", 11), "MATH10-FY");

        let mut plan = Plan::new();
        plan.add(placed("MATH10-FY", 11, Semester::First));

        // Full-year completion is 11.2, not < 11.1
        assert!(!prerequisites_satisfied(
            &candidate,
            11,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_or_group_any_option_counts() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));
        catalog.add_course(course("MATH10-3", 10));
        let candidate = with_prereq(course("MATH20-3", 11), "MATH10C|MATH10-3");

        let mut plan = Plan::new();
        plan.add(placed("MATH10-3", 10, Semester::First));

        assert!(prerequisites_satisfied(
            &candidate,
            11,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_unknown_prerequisite_id_is_unsatisfiable() {
        let catalog = Catalog::new();
        let candidate = with_prereq(course("MATH20-1", 11), "GHOST10");

        let mut plan = Plan::new();
        plan.add(placed("GHOST10", 10, Semester::First));

        assert!(!prerequisites_satisfied(
            &candidate,
            11,
            Some(Semester::First),
            Delivery::Regular,
            &plan,
            &catalog
        ));
    }

    #[test]
    fn test_closure_of_leaf_is_itself() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));

        let closure = transitive_closure("MATH10C", &catalog).unwrap();
        assert_eq!(closure, vec!["MATH10C".to_string()]);
    }

    #[test]
    fn test_closure_is_in_dependency_order() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));
        catalog.add_course(with_prereq(course("MATH20-1", 11), "MATH10C"));
        catalog.add_course(with_prereq(course("MATH30-1", 12), "MATH20-1"));

        let closure = transitive_closure("MATH30-1", &catalog).unwrap();
        assert_eq!(
            closure,
            vec![
                "MATH10C".to_string(),
                "MATH20-1".to_string(),
                "MATH30-1".to_string()
            ]
        );
    }

    #[test]
    fn test_closure_follows_first_or_option() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("SCI10", 10));
        catalog.add_course(course("SCI14", 10));
        catalog.add_course(with_prereq(course("BIO20", 11), "SCI10|SCI14"));

        let closure = transitive_closure("BIO20", &catalog).unwrap();
        assert!(closure.contains(&"SCI10".to_string()));
        assert!(!closure.contains(&"SCI14".to_string()));
    }

    #[test]
    fn test_closure_detects_cycle() {
        let mut catalog = Catalog::new();
        catalog.add_course(with_prereq(course("A", 10), "B"));
        catalog.add_course(with_prereq(course("B", 10), "A"));

        let err = transitive_closure("A", &catalog).unwrap_err();
        let ResolveError::CycleDetected { course_id } = err;
        assert_eq!(course_id, "A");
    }

    #[test]
    fn test_closure_skips_unknown_ids() {
        let mut catalog = Catalog::new();
        catalog.add_course(with_prereq(course("MATH20-1", 11), "GHOST10"));

        let closure = transitive_closure("MATH20-1", &catalog).unwrap();
        assert_eq!(closure, vec!["MATH20-1".to_string()]);
    }

    #[test]
    fn test_exclusion_conflict_same_track() {
        let mut catalog = Catalog::new();
        let mut m1 = course("MATH20-1", 11);
        m1.category = "Math".to_string();
        let mut m2 = course("MATH20-2", 11);
        m2.category = "Math".to_string();
        catalog.add_course(m1.clone());
        catalog.add_course(m2.clone());

        let mut plan = Plan::new();
        plan.add(placed("MATH20-1", 11, Semester::First));

        let conflict = exclusion_conflict(&m2, &plan, &catalog).unwrap();
        assert_eq!(conflict.id, "MATH20-1");
    }

    #[test]
    fn test_no_conflict_across_grades() {
        let mut catalog = Catalog::new();
        catalog.add_course(course("MATH10C", 10));
        let m20 = course("MATH20-1", 11);
        catalog.add_course(m20.clone());

        let mut plan = Plan::new();
        plan.add(placed("MATH10C", 10, Semester::First));

        assert!(exclusion_conflict(&m20, &plan, &catalog).is_none());
    }

    #[test]
    fn test_diploma_tracks_conflict_via_normalized_category() {
        let mut catalog = Catalog::new();
        let mut e1 = course("ELA30-1", 12);
        e1.category = "ELA-30".to_string();
        let mut e2 = course("ELA30-2", 12);
        e2.category = "ELA-30".to_string();
        catalog.add_course(e1.clone());
        catalog.add_course(e2.clone());

        let mut plan = Plan::new();
        plan.add(placed("ELA30-1", 12, Semester::First));

        assert!(exclusion_conflict(&e2, &plan, &catalog).is_some());
    }
}
