//! Shared test utilities for the prerender-plan test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = load_fixture_config(tmp.path());
//! let resolution = block_on(get_routes(&config, tmp.path())).unwrap();
//! assert_routes(&resolution, &["/", "/about"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{self, PrerenderConfig};
use crate::routes::Resolution;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/app/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/app");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Load `prerender.toml` from a fixture copy. Panics on invalid config.
pub fn load_fixture_config(root: &Path) -> PrerenderConfig {
    config::load_config(&root.join(config::CONFIG_FILENAME))
        .unwrap_or_else(|e| panic!("fixture config invalid: {e}"))
}

// =========================================================================
// Builders and assertions
// =========================================================================

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Assert the exact resolved route list, with a readable diff on failure.
pub fn assert_routes(resolution: &Resolution, expected: &[&str]) {
    let actual: Vec<&str> = resolution
        .routes
        .routes
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        actual, expected,
        "resolved routes differ (diagnostics: {:?})",
        resolution.diagnostics
    );
}
