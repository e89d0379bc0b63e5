//! Preset command handler: generate a plan from program requirements

use std::path::Path;
use study_tools::core::files;
use study_tools::core::planner::presets::{generate_plan, PresetSettings};
use study_tools::core::planner::requirements;
use study_tools::{error, info};

/// Run the preset command
///
/// # Arguments
/// * `catalog_path` - Course catalog TOML file
/// * `requirements_path` - Program-requirements TOML file
/// * `university` - University offering the program
/// * `program_name` - Program to plan for
/// * `output` - Where to write the generated plan
/// * `allow_summer` - Allow moving CALM into a summer window
pub fn run(
    catalog_path: &Path,
    requirements_path: &Path,
    university: &str,
    program_name: &str,
    output: &Path,
    allow_summer: bool,
) {
    let catalog = match files::load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };
    let file = match files::load_requirements(requirements_path) {
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

    let settings = PresetSettings {
        allow_summer,
        ..Default::default()
    };
    let plan = match generate_plan(program, &catalog, &settings) {
        Ok(plan) => plan,
        Err(e) => {
            error!("Preset generation failed: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    if let Err(e) = files::save_plan(output, &plan) {
        error!("Failed to save generated plan: {e}");
        eprintln!("✗ {e}");
        return;
    }

    info!("Preset plan written to {}", output.display());
    println!(
        "✓ Generated {} courses ({:.0} credits) for {program_name} at {university}",
        plan.course_count(),
        requirements::total_credits(&plan, &catalog)
    );
    println!("✓ Plan written to {}", output.display());
}
