//! University program requirement matching
//!
//! Compares a saved plan against a post-secondary program's admission
//! requirements: individually required courses plus "choose N of" groups.

use crate::core::models::Plan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A "choose N of these" admission requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequirement {
    /// Student-facing description (e.g., "Two of Biology 30, Chemistry 30, Physics 30")
    pub description: String,

    /// Eligible course ids
    pub courses: Vec<String>,

    /// How many of the eligible courses are required
    pub how_many: usize,
}

/// Admission requirements for one program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequirements {
    /// Courses that are individually required
    #[serde(default)]
    pub required_courses: Vec<String>,

    /// Choose-N group requirements
    #[serde(default)]
    pub group_requirements: Vec<GroupRequirement>,

    /// Free-form admission notes
    #[serde(default)]
    pub notes: String,

    /// Published competitive-average range
    #[serde(default)]
    pub min_avg_range: String,

    /// Official program page
    #[serde(default)]
    pub url: String,
}

/// A university and the programs it offers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct University {
    /// Programs keyed by program name
    #[serde(default)]
    pub programs: HashMap<String, ProgramRequirements>,
}

/// The full program-requirements file: universities keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementsFile {
    /// Universities keyed by display name
    #[serde(default)]
    pub universities: HashMap<String, University>,
}

impl RequirementsFile {
    /// Look up one program's requirements
    #[must_use]
    pub fn program(&self, university: &str, program: &str) -> Option<&ProgramRequirements> {
        self.universities
            .get(university)
            .and_then(|u| u.programs.get(program))
    }
}

/// Outcome of one requirement row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementResult {
    /// An individually required course
    Course {
        /// The required course id
        id: String,
    },
    /// A choose-N group
    Group {
        /// Group description
        description: String,
        /// Planned course ids counting toward the group
        satisfied: Vec<String>,
        /// How many more courses are needed (zero when met)
        needed: usize,
    },
}

/// Met and missing requirement rows for one program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramCheck {
    /// Requirements the plan satisfies
    pub met: Vec<RequirementResult>,
    /// Requirements the plan does not satisfy
    pub missing: Vec<RequirementResult>,
}

impl ProgramCheck {
    /// Whether every requirement is met
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check a plan against a program's admission requirements
///
/// Required courses only need to appear somewhere in the plan; admission
/// matching ignores term placement. Group rows count how many eligible
/// options are planned against the group's `how_many`.
#[must_use]
pub fn check_program(program: &ProgramRequirements, plan: &Plan) -> ProgramCheck {
    let mut check = ProgramCheck::default();

    for id in &program.required_courses {
        let result = RequirementResult::Course { id: id.clone() };
        if plan.contains(id) {
            check.met.push(result);
        } else {
            check.missing.push(result);
        }
    }

    for group in &program.group_requirements {
        let satisfied: Vec<String> = group
            .courses
            .iter()
            .filter(|id| plan.contains(id))
            .cloned()
            .collect();
        let needed = group.how_many.saturating_sub(satisfied.len());
        let result = RequirementResult::Group {
            description: group.description.clone(),
            satisfied,
            needed,
        };
        if needed == 0 {
            check.met.push(result);
        } else {
            check.missing.push(result);
        }
    }

    check
}
