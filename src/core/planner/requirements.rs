//! Credit bookkeeping and graduation-requirement evaluation
//!
//! Everything here is a pure recomputation over (plan, catalog); there is no
//! hidden state, so callers rerun it after every schedule change.

use crate::core::models::{Catalog, Plan};

/// Default per-grade credit load above which a year is flagged as overloaded
pub const DEFAULT_GRADE_CREDIT_CAP: f32 = 45.0;

/// Credits needed for a high-school diploma
pub const GRADUATION_CREDIT_TARGET: f32 = 100.0;

/// Grade-level math courses satisfying the 20-level math requirement
const MATH_20_IDS: [&str; 3] = ["MATH20-1", "MATH20-2", "MATH20-3"];

/// 20-level science courses satisfying the science requirement
const SCIENCE_20_IDS: [&str; 4] = ["SCI20", "BIO20", "CHEM20", "PHY20"];

/// Core categories that do not count toward elective credits
const CORE_CATEGORIES: [&str; 8] = [
    "ELA", "Social", "Math", "Science", "PE", "CALM", "ELA-30", "Social-30",
];

/// Total credits across every planned course
///
/// Entries missing from the catalog contribute nothing.
#[must_use]
pub fn total_credits(plan: &Plan, catalog: &Catalog) -> f32 {
    plan.courses()
        .iter()
        .filter_map(|pc| catalog.get(&pc.id))
        .map(|course| course.credits)
        .sum()
}

/// Credits carried during a specific grade year
///
/// Summer-delivery courses sit between years and are excluded from the
/// year's load.
#[must_use]
pub fn credits_for_grade(plan: &Plan, catalog: &Catalog, grade: u8) -> f32 {
    plan.courses()
        .iter()
        .filter(|pc| !pc.delivery.is_summer())
        .filter(|pc| pc.placed_in_grade == grade)
        .filter_map(|pc| catalog.get(&pc.id))
        .map(|course| course.credits)
        .sum()
}

/// Credit load for one grade year
#[derive(Debug, Clone, PartialEq)]
pub struct GradeLoad {
    /// Grade year (10, 11, or 12)
    pub grade: u8,
    /// Credits carried during the year
    pub credits: f32,
    /// Whether the load exceeds the configured cap
    pub overloaded: bool,
}

/// Credit loads for grades 10 through 12
///
/// # Arguments
/// * `plan` - The schedule to total up
/// * `catalog` - Course catalog
/// * `cap` - Credit load above which a year is flagged
#[must_use]
pub fn grade_loads(plan: &Plan, catalog: &Catalog, cap: f32) -> Vec<GradeLoad> {
    [10, 11, 12]
        .iter()
        .map(|&grade| {
            let credits = credits_for_grade(plan, catalog, grade);
            GradeLoad {
                grade,
                credits,
                overloaded: credits > cap,
            }
        })
        .collect()
}

/// One row of the graduation checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementStatus {
    /// Student-facing requirement label
    pub label: String,
    /// Whether the plan satisfies the requirement
    pub met: bool,
}

/// Evaluate the diploma requirement checklist against a plan
///
/// The eight rows mirror the provincial diploma rules: a 30-level ELA and
/// social studies, 20-level math and science, PE 10, CALM, ten elective
/// credits, and ten 30-level credits outside ELA/Social.
#[must_use]
pub fn graduation_checklist(plan: &Plan, catalog: &Catalog) -> Vec<RequirementStatus> {
    let planned: Vec<_> = plan
        .courses()
        .iter()
        .filter_map(|pc| catalog.get(&pc.id))
        .collect();

    let elective_credits: f32 = planned
        .iter()
        .filter(|c| !CORE_CATEGORIES.contains(&c.category.as_str()))
        .map(|c| c.credits)
        .sum();

    let thirty_level_credits: f32 = planned
        .iter()
        .filter(|c| c.name.contains("30") || c.id.contains("31"))
        .map(|c| c.credits)
        .sum();

    vec![
        RequirementStatus {
            label: "ELA 30-1 or 30-2".to_string(),
            met: planned.iter().any(|c| c.category == "ELA-30"),
        },
        RequirementStatus {
            label: "Social 30-1 or 30-2".to_string(),
            met: planned.iter().any(|c| c.category == "Social-30"),
        },
        RequirementStatus {
            label: "Math 20-level".to_string(),
            met: planned
                .iter()
                .any(|c| c.category == "Math" && MATH_20_IDS.contains(&c.id.as_str())),
        },
        RequirementStatus {
            label: "Science 20-level".to_string(),
            met: planned
                .iter()
                .any(|c| c.category == "Science" && SCIENCE_20_IDS.contains(&c.id.as_str())),
        },
        RequirementStatus {
            label: "Physical Education 10".to_string(),
            met: planned.iter().any(|c| c.id == "PE10"),
        },
        RequirementStatus {
            label: "CALM (Career and Life Management)".to_string(),
            met: planned.iter().any(|c| c.id == "CALM"),
        },
        RequirementStatus {
            label: "10 Credits (Any combination of electives)".to_string(),
            met: elective_credits >= 10.0,
        },
        RequirementStatus {
            label: "10 Credits (30-level other than ELA 30 & Social Studies 30)".to_string(),
            met: thirty_level_credits >= 10.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Delivery, PlannedCourse, Semester};

    fn course(id: &str, name: &str, grade: u8, credits: f32, category: &str) -> Course {
        Course::new(
            id.to_string(),
            name.to_string(),
            grade,
            credits,
            category.to_string(),
        )
    }

    fn placed(id: &str, delivery: Delivery, grade: u8) -> PlannedCourse {
        PlannedCourse {
            id: id.to_string(),
            delivery,
            placed_in_grade: grade,
            semester: if delivery.is_summer() {
                None
            } else {
                Some(Semester::First)
            },
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_courses(vec![
            course("MATH10C", "Mathematics 10C", 10, 5.0, "Math"),
            course("MATH20-1", "Mathematics 20-1", 11, 5.0, "Math"),
            course("PE10", "Physical Education 10", 10, 5.0, "PE"),
            course("CALM", "Career and Life Management", 11, 3.0, "CALM"),
            course("ELA30-1", "English Language Arts 30-1", 12, 5.0, "ELA-30"),
            course("SS30-1", "Social Studies 30-1", 12, 5.0, "Social-30"),
            course("BIO20", "Biology 20", 11, 5.0, "Science"),
            course("ART10", "Art 10", 10, 5.0, "FineArts"),
            course("COMP10", "Computing Science 10", 10, 5.0, "CTS"),
        ])
    }

    #[test]
    fn test_total_and_grade_credits() {
        let catalog = sample_catalog();
        let mut plan = Plan::new();
        plan.add(placed("MATH10C", Delivery::Regular, 10));
        plan.add(placed("PE10", Delivery::Regular, 10));
        plan.add(placed("CALM", Delivery::Summer, 11));

        assert!((total_credits(&plan, &catalog) - 13.0).abs() < f32::EPSILON);
        // Summer CALM is not part of the grade-11 load
        assert!((credits_for_grade(&plan, &catalog, 10) - 10.0).abs() < f32::EPSILON);
        assert!((credits_for_grade(&plan, &catalog, 11) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_ids_contribute_nothing() {
        let catalog = sample_catalog();
        let mut plan = Plan::new();
        plan.add(placed("GHOST10", Delivery::Regular, 10));

        assert!((total_credits(&plan, &catalog) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_grade_loads_flag_overload() {
        let catalog = sample_catalog();
        let mut plan = Plan::new();
        plan.add(placed("MATH10C", Delivery::Regular, 10));
        plan.add(placed("PE10", Delivery::Regular, 10));

        let loads = grade_loads(&plan, &catalog, 8.0);
        assert_eq!(loads.len(), 3);
        assert_eq!(loads[0].grade, 10);
        assert!(loads[0].overloaded);
        assert!(!loads[1].overloaded);
    }

    #[test]
    fn test_checklist_core_rows() {
        let catalog = sample_catalog();
        let mut plan = Plan::new();
        plan.add(placed("ELA30-1", Delivery::Regular, 12));
        plan.add(placed("MATH20-1", Delivery::Regular, 11));
        plan.add(placed("BIO20", Delivery::Regular, 11));
        plan.add(placed("PE10", Delivery::Regular, 10));
        plan.add(placed("CALM", Delivery::Summer, 11));

        let checklist = graduation_checklist(&plan, &catalog);
        let met = |label: &str| {
            checklist
                .iter()
                .find(|r| r.label.starts_with(label))
                .unwrap()
                .met
        };

        assert!(met("ELA 30-1"));
        assert!(!met("Social 30-1"));
        assert!(met("Math 20-level"));
        assert!(met("Science 20-level"));
        assert!(met("Physical Education 10"));
        assert!(met("CALM"));
    }

    #[test]
    fn test_elective_and_thirty_level_credits() {
        let catalog = sample_catalog();
        let mut plan = Plan::new();
        plan.add(placed("ART10", Delivery::Regular, 10));
        plan.add(placed("COMP10", Delivery::Regular, 10));
        plan.add(placed("ELA30-1", Delivery::Regular, 12));
        plan.add(placed("SS30-1", Delivery::Regular, 12));

        let checklist = graduation_checklist(&plan, &catalog);
        let elective = checklist
            .iter()
            .find(|r| r.label.starts_with("10 Credits (Any"))
            .unwrap();
        // ART10 + COMP10 = 10 elective credits
        assert!(elective.met);

        let thirty = checklist
            .iter()
            .find(|r| r.label.starts_with("10 Credits (30-level"))
            .unwrap();
        // ELA30-1 + SS30-1 names contain "30"
        assert!(thirty.met);
    }
}
