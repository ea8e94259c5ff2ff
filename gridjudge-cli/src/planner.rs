//! Run Planner
//!
//! Builds the run plan by filtering and ordering test cases.
//!
//! Filtering options:
//! - Regex pattern matching on case ID
//!
//! Ordering: Cases are sorted alphabetically by ID for deterministic execution.

use gridjudge_core::{CompilerProfile, TestCase};

/// Execution plan for one harness run
pub struct RunPlan {
    /// Ordered list of cases to run
    pub cases: Vec<TestCase>,
    /// Compiler profiles applied to every case
    pub profiles: Vec<CompilerProfile>,
}

impl RunPlan {
    /// Total number of case/compiler/level combinations
    pub fn combination_count(&self) -> usize {
        let levels: usize = self.profiles.iter().map(|p| p.levels.len()).sum();
        self.cases.len() * levels
    }
}

/// Build the run plan from configured cases and profiles
///
/// Filters cases by the CLI pattern and returns them in deterministic order.
pub fn build_plan(
    cases: Vec<TestCase>,
    profiles: Vec<CompilerProfile>,
    filter: Option<&regex::Regex>,
) -> RunPlan {
    let mut selected: Vec<_> = cases
        .into_iter()
        .filter(|case| {
            if let Some(re) = filter {
                if !re.is_match(&case.id) {
                    return false;
                }
            }
            true
        })
        .collect();

    // Sort alphabetically for deterministic execution order
    selected.sort();

    RunPlan {
        cases: selected,
        profiles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridjudge_core::default_cases;

    fn cases(ids: &[&str]) -> Vec<TestCase> {
        ids.iter().map(|id| TestCase::new(*id)).collect()
    }

    #[test]
    fn test_no_filter() {
        let plan = build_plan(
            cases(&["optim/pi", "optim/dijkstra", "optim/sha_1"]),
            vec![CompilerProfile::gcc()],
            None,
        );

        // Should be sorted alphabetically
        assert_eq!(plan.cases.len(), 3);
        assert_eq!(plan.cases[0].id, "optim/dijkstra");
        assert_eq!(plan.cases[1].id, "optim/pi");
        assert_eq!(plan.cases[2].id, "optim/sha_1");
    }

    #[test]
    fn test_regex_filter() {
        let re = regex::Regex::new("pi|lca").unwrap();
        let plan = build_plan(default_cases(), vec![CompilerProfile::gcc()], Some(&re));

        assert_eq!(plan.cases.len(), 2);
        assert_eq!(plan.cases[0].id, "optim/lca");
        assert_eq!(plan.cases[1].id, "optim/pi");
    }

    #[test]
    fn test_combination_count() {
        let plan = build_plan(default_cases(), vec![CompilerProfile::gcc()], None);
        assert_eq!(plan.combination_count(), 30);

        let two = build_plan(
            cases(&["optim/pi"]),
            vec![
                CompilerProfile::gcc(),
                CompilerProfile::new("clang", vec!["clang".to_string()], vec![0, 2]),
            ],
            None,
        );
        assert_eq!(two.combination_count(), 5);
    }

    #[test]
    fn test_filter_can_empty_the_plan() {
        let re = regex::Regex::new("nothing-matches").unwrap();
        let plan = build_plan(default_cases(), vec![CompilerProfile::gcc()], Some(&re));
        assert!(plan.cases.is_empty());
        assert_eq!(plan.combination_count(), 0);
    }
}
