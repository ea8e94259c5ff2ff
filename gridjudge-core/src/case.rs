//! Test case registry and fixture resolution.
//!
//! A test case is identified by a relative path without extension
//! (e.g. `optim/pi`). Its three fixture files are found by appending
//! fixed extensions to the identifier under a fixtures root.

use std::path::{Path, PathBuf};

/// Extension of the C source fixture.
pub const SOURCE_EXT: &str = "c";
/// Extension of the input fixture.
pub const INPUT_EXT: &str = "in";
/// Extension of the golden answer fixture.
pub const ANSWER_EXT: &str = "ans";

/// A single test case, identified by a relative path without extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestCase {
    /// Unique identifier, e.g. `optim/pi`.
    pub id: String,
}

impl TestCase {
    /// Create a test case from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Path of the source fixture under `root`.
    pub fn source(&self, root: &Path) -> PathBuf {
        self.fixture(root, SOURCE_EXT)
    }

    /// Path of the input fixture under `root`.
    pub fn input(&self, root: &Path) -> PathBuf {
        self.fixture(root, INPUT_EXT)
    }

    /// Path of the golden answer fixture under `root`.
    pub fn answer(&self, root: &Path) -> PathBuf {
        self.fixture(root, ANSWER_EXT)
    }

    fn fixture(&self, root: &Path, ext: &str) -> PathBuf {
        root.join(format!("{}.{}", self.id, ext))
    }
}

impl std::fmt::Display for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// The built-in case registry, sorted by identifier.
pub fn default_cases() -> Vec<TestCase> {
    let mut cases: Vec<TestCase> = [
        "optim/sha_1",
        "optim/pi",
        "optim/humble",
        "optim/segtree",
        "optim/lunatic",
        "optim/maxflow",
        "optim/dijkstra",
        "optim/lca",
        "optim/binary_tree",
        "optim/kruskal",
    ]
    .into_iter()
    .map(TestCase::new)
    .collect();
    cases.sort();
    cases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_sorted() {
        let cases = default_cases();
        assert_eq!(cases.len(), 10);
        assert_eq!(cases.first().map(|c| c.id.as_str()), Some("optim/binary_tree"));
        assert_eq!(cases.last().map(|c| c.id.as_str()), Some("optim/sha_1"));
        let mut sorted = cases.clone();
        sorted.sort();
        assert_eq!(cases, sorted);
    }

    #[test]
    fn test_fixture_paths() {
        let case = TestCase::new("optim/pi");
        let root = Path::new("/fixtures");
        assert_eq!(case.source(root), Path::new("/fixtures/optim/pi.c"));
        assert_eq!(case.input(root), Path::new("/fixtures/optim/pi.in"));
        assert_eq!(case.answer(root), Path::new("/fixtures/optim/pi.ans"));
    }

    #[test]
    fn test_display_is_identifier() {
        assert_eq!(TestCase::new("optim/lca").to_string(), "optim/lca");
    }
}
