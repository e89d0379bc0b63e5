//! Check command handler: validate a plan against a catalog

use std::path::Path;
use study_tools::config::Config;
use study_tools::core::files;
use study_tools::core::models::{Catalog, Plan, PlannedCourse};
use study_tools::core::planner::program::{check_program, RequirementResult};
use study_tools::core::planner::requirements;
use study_tools::core::planner::timeline;
use study_tools::core::planner::{place_course, PlacementRejection};
use study_tools::{error, info, warn};

/// Run the check command
///
/// # Arguments
/// * `catalog_path` - Course catalog TOML file
/// * `plan_path` - Plan TOML file
/// * `requirements_path` - Optional program-requirements TOML file
/// * `university` - University name for the admission check
/// * `program` - Program name for the admission check
/// * `config` - Loaded configuration (credit cap and target)
/// * `verbose` - Whether to print load details
pub fn run(
    catalog_path: &Path,
    plan_path: &Path,
    requirements_path: Option<&Path>,
    university: Option<&str>,
    program: Option<&str>,
    config: &Config,
    verbose: bool,
) {
    let catalog = match files::load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };
    let loaded = match files::load_plan(plan_path, &catalog) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load plan: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    if verbose {
        println!(
            "✓ Loaded {} courses, plan with {} entries",
            catalog.course_count(),
            loaded.plan.course_count()
        );
    } else {
        info!(
            "Loaded catalog {} and plan {}",
            catalog_path.display(),
            plan_path.display()
        );
    }
    for id in &loaded.skipped {
        warn!("Plan entry '{id}' could not be located and was dropped");
    }

    report_placements(&loaded.plan, &catalog);
    report_credits(&loaded.plan, &catalog, config);
    report_graduation(&loaded.plan, &catalog);

    if let (Some(reqs_path), Some(uni), Some(prog)) = (requirements_path, university, program) {
        report_program(&loaded.plan, reqs_path, uni, prog);
    }
}

/// Replay every placement in timeline order against a fresh plan
///
/// Entries referencing unknown courses cannot be replayed and are returned
/// separately.
fn replay(plan: &Plan, catalog: &Catalog) -> (Vec<(String, PlacementRejection)>, Vec<String>) {
    let mut entries: Vec<&PlannedCourse> = plan.courses().iter().collect();
    entries.sort_by(|a, b| {
        let time = |pc: &PlannedCourse| {
            catalog
                .get(&pc.id)
                .map_or(f64::MAX, |course| timeline::completion_time(course, pc))
        };
        time(a).partial_cmp(&time(b)).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut fresh = Plan::new();
    let mut rejections = Vec::new();
    let mut unknown = Vec::new();
    for pc in entries {
        match catalog.get(&pc.id) {
            None => unknown.push(pc.id.clone()),
            Some(course) => {
                if let Err(rejection) = place_course(
                    &mut fresh,
                    course,
                    pc.delivery,
                    pc.placed_in_grade,
                    pc.semester,
                    catalog,
                ) {
                    rejections.push((pc.id.clone(), rejection));
                }
            }
        }
    }
    (rejections, unknown)
}

fn report_placements(plan: &Plan, catalog: &Catalog) {
    let (rejections, unknown) = replay(plan, catalog);

    println!("\n=== Placements ===\n");
    if rejections.is_empty() && unknown.is_empty() {
        println!("✓ All {} placements are valid", plan.course_count());
    }
    for id in &unknown {
        println!("✗ {id}: not in the catalog");
    }
    for (id, rejection) in &rejections {
        println!("✗ {id}: {rejection} [{}]", rejection.code());
    }
}

fn report_credits(plan: &Plan, catalog: &Catalog, config: &Config) {
    let total = requirements::total_credits(plan, catalog);
    println!("\n=== Credits ===\n");
    println!(
        "Total: {total:.0} / {:.0}",
        config.planner.target_credits
    );
    for load in requirements::grade_loads(plan, catalog, config.planner.grade_credit_cap) {
        let marker = if load.overloaded { "  (over cap)" } else { "" };
        println!("  Grade {}: {:.0} credits{marker}", load.grade, load.credits);
    }
}

fn report_graduation(plan: &Plan, catalog: &Catalog) {
    println!("\n=== Graduation requirements ===\n");
    for req in requirements::graduation_checklist(plan, catalog) {
        let mark = if req.met { "✓" } else { "✗" };
        println!("  {mark} {}", req.label);
    }
}

fn report_program(plan: &Plan, reqs_path: &Path, university: &str, program_name: &str) {
    let file = match files::load_requirements(reqs_path) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to load requirements: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };
    let Some(program) = file.program(university, program_name) else {
        eprintln!("✗ No requirements found for '{program_name}' at '{university}'");
        return;
    };

    let check = check_program(program, plan);
    println!("\n=== {university}: {program_name} ===\n");
    for result in &check.met {
        match result {
            RequirementResult::Course { id } => println!("  ✓ {id}"),
            RequirementResult::Group { description, satisfied, .. } => {
                println!("  ✓ {description} (met with: {})", satisfied.join(", "));
            }
        }
    }
    for result in &check.missing {
        match result {
            RequirementResult::Course { id } => println!("  ✗ {id}"),
            RequirementResult::Group { description, needed, .. } => {
                println!("  ✗ {description} (need {needed} more)");
            }
        }
    }
    if !program.notes.is_empty() {
        println!("\nNotes: {}", program.notes);
    }
    if !program.min_avg_range.is_empty() {
        println!("Competitive average: {}", program.min_avg_range);
    }
    if check.is_complete() {
        println!("\n✓ Plan covers all listed requirements for this program");
    }
}
