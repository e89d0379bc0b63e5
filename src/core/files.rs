//! On-disk file formats for catalogs, plans, decks, and program requirements
//!
//! Everything the CLI reads or writes is TOML. Record migration happens here,
//! once, at the load boundary, so planner and scheduler logic only ever see
//! fully populated models.

use crate::core::models::{Catalog, Course, Deck, Delivery, Plan, PlannedCourse, Semester};
use crate::core::planner::program::RequirementsFile;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Catalog file: a list of `[[courses]]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Courses in file order
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Planned-course record as stored on disk
///
/// Plans saved by older versions may omit `semester` (added later) and
/// `placed_in_grade`; [`load_plan`] defaults them once: semester 1 for
/// non-summer entries, the course's nominal grade for the placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourseRecord {
    /// Referenced course id
    pub id: String,
    /// Delivery method
    pub delivery: Delivery,
    /// Grade year of the placement, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_in_grade: Option<u8>,
    /// Semester of the placement, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
}

/// Plan file: a list of `[[courses]]` records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFile {
    /// Planned-course records in file order
    #[serde(default)]
    pub courses: Vec<PlannedCourseRecord>,
}

/// A plan loaded from disk, plus the record ids that could not be placed
#[derive(Debug, Clone, Default)]
pub struct LoadedPlan {
    /// The migrated plan
    pub plan: Plan,
    /// Ids of records referencing unknown courses with no recorded grade;
    /// these cannot be located anywhere on the timeline and are dropped
    pub skipped: Vec<String>,
}

/// Load a course catalog from a TOML file
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read catalog {}: {e}", path.display()))?;
    let file: CatalogFile = toml::from_str(&content)
        .map_err(|e| format!("failed to parse catalog {}: {e}", path.display()))?;
    Ok(Catalog::from_courses(file.courses))
}

/// Load a plan from a TOML file, migrating older records
///
/// Migration rules: non-summer records without a semester get semester 1;
/// records without a grade get the course's nominal grade; full-year courses
/// are forced to start in semester 1. Records whose course is missing from
/// the catalog are kept when they carry their own grade (bookkeeping ignores
/// them gracefully) and dropped otherwise.
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_plan(path: &Path, catalog: &Catalog) -> Result<LoadedPlan, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read plan {}: {e}", path.display()))?;
    let file: PlanFile = toml::from_str(&content)
        .map_err(|e| format!("failed to parse plan {}: {e}", path.display()))?;

    let mut loaded = LoadedPlan::default();
    for record in file.courses {
        let course = catalog.get(&record.id);
        let Some(placed_in_grade) = record.placed_in_grade.or(course.map(|c| c.grade)) else {
            loaded.skipped.push(record.id);
            continue;
        };

        let semester = if record.delivery.is_summer() {
            None
        } else if course.is_some_and(Course::spans_full_year) {
            Some(Semester::First)
        } else {
            Some(record.semester.unwrap_or(Semester::First))
        };

        loaded.plan.add(PlannedCourse {
            id: record.id,
            delivery: record.delivery,
            placed_in_grade,
            semester,
        });
    }
    Ok(loaded)
}

/// Save a plan to a TOML file
///
/// # Errors
/// Returns an error when serialization or the write fails.
pub fn save_plan(path: &Path, plan: &Plan) -> Result<(), Box<dyn Error>> {
    let file = PlanFile {
        courses: plan
            .courses()
            .iter()
            .map(|pc| PlannedCourseRecord {
                id: pc.id.clone(),
                delivery: pc.delivery,
                placed_in_grade: Some(pc.placed_in_grade),
                semester: pc.semester,
            })
            .collect(),
    };
    let toml_str = toml::to_string_pretty(&file)?;
    fs::write(path, toml_str)
        .map_err(|e| format!("failed to write plan {}: {e}", path.display()))?;
    Ok(())
}

/// Load a deck from a TOML file
///
/// Scheduling-state migration is separate ([`Deck::migrate`]) because it
/// needs the caller's clock.
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_deck(path: &Path) -> Result<Deck, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read deck {}: {e}", path.display()))?;
    let deck: Deck = toml::from_str(&content)
        .map_err(|e| format!("failed to parse deck {}: {e}", path.display()))?;
    Ok(deck)
}

/// Save a deck to a TOML file
///
/// # Errors
/// Returns an error when serialization or the write fails.
pub fn save_deck(path: &Path, deck: &Deck) -> Result<(), Box<dyn Error>> {
    let toml_str = toml::to_string_pretty(deck)?;
    fs::write(path, toml_str)
        .map_err(|e| format!("failed to write deck {}: {e}", path.display()))?;
    Ok(())
}

/// Load a program-requirements file from TOML
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_requirements(path: &Path) -> Result<RequirementsFile, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read requirements {}: {e}", path.display()))?;
    let file: RequirementsFile = toml::from_str(&content)
        .map_err(|e| format!("failed to parse requirements {}: {e}", path.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut fy = Course::new(
            "MATH10-FY".to_string(),
            "Mathematics 10 (Full Year)".to_string(),
            10,
            10.0,
            "Math".to_string(),
        );
        fy.is_full_year = true;
        Catalog::from_courses(vec![
            Course::new(
                "MATH10C".to_string(),
                "Mathematics 10C".to_string(),
                10,
                5.0,
                "Math".to_string(),
            ),
            fy,
        ])
    }

    #[test]
    fn test_plan_migration_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        fs::write(
            &path,
            r#"
[[courses]]
id = "MATH10C"
delivery = "regular"

[[courses]]
id = "MATH10-FY"
delivery = "regular"
semester = 2
"#,
        )
        .unwrap();

        let loaded = load_plan(&path, &catalog()).unwrap();
        assert!(loaded.skipped.is_empty());

        // Missing semester and grade default to semester 1 at the nominal grade
        let migrated = loaded.plan.get("MATH10C").unwrap();
        assert_eq!(migrated.placed_in_grade, 10);
        assert_eq!(migrated.semester, Some(Semester::First));

        // Full-year courses start in semester 1 even when the record says otherwise
        assert_eq!(
            loaded.plan.get("MATH10-FY").unwrap().semester,
            Some(Semester::First)
        );
    }

    #[test]
    fn test_unlocatable_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        fs::write(
            &path,
            r#"
[[courses]]
id = "GHOST10"
delivery = "regular"

[[courses]]
id = "GHOST11"
delivery = "regular"
placed_in_grade = 11
"#,
        )
        .unwrap();

        let loaded = load_plan(&path, &catalog()).unwrap();
        // No grade anywhere: dropped. Grade recorded: kept.
        assert_eq!(loaded.skipped, vec!["GHOST10".to_string()]);
        assert!(loaded.plan.contains("GHOST11"));
    }

    #[test]
    fn test_plan_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");

        let mut plan = Plan::new();
        plan.add(PlannedCourse {
            id: "MATH10C".to_string(),
            delivery: Delivery::Regular,
            placed_in_grade: 10,
            semester: Some(Semester::Second),
        });
        save_plan(&path, &plan).unwrap();

        let loaded = load_plan(&path, &catalog()).unwrap();
        assert_eq!(loaded.plan, plan);
    }

    #[test]
    fn test_catalog_and_deck_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let catalog_path = dir.path().join("catalog.toml");
        fs::write(
            &catalog_path,
            r#"
[[courses]]
id = "MATH10C"
name = "Mathematics 10C"
grade = 10
credits = 5.0
category = "Math"

[[courses]]
id = "MATH20-1"
name = "Mathematics 20-1"
grade = 11
credits = 5.0
category = "Math"
prerequisites = ["MATH10C"]
"#,
        )
        .unwrap();
        let catalog = load_catalog(&catalog_path).unwrap();
        assert_eq!(catalog.course_count(), 2);
        assert_eq!(catalog.get("MATH20-1").unwrap().prerequisites.len(), 1);

        let deck_path = dir.path().join("deck.toml");
        let mut deck = Deck::new("d1".to_string(), "Chem 30".to_string(), String::new());
        let now = "2024-09-01T08:00:00Z".parse().unwrap();
        deck.cards.push(crate::core::models::Card::new(
            "c1".to_string(),
            "Q".to_string(),
            "A".to_string(),
            now,
        ));
        save_deck(&deck_path, &deck).unwrap();
        let reloaded = load_deck(&deck_path).unwrap();
        assert_eq!(reloaded, deck);
    }
}
