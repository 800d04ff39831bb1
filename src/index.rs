//! Index output file lookup.
//!
//! The browser build names its index document either with a plain path
//! (`index = "src/index.html"`) or with an input/output pair when the emitted
//! file is renamed. Workers need the emitted name to know which file to
//! render each route into.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback name when a detailed index omits `output`.
pub const DEFAULT_INDEX_OUTPUT: &str = "index.html";

/// The `index` option of the browser build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexOption {
    /// Source path; the output keeps the same file name.
    Path(String),
    /// Source path with an optional renamed output.
    Detailed {
        input: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
}

impl Default for IndexOption {
    fn default() -> Self {
        IndexOption::Path("src/index.html".to_string())
    }
}

/// Returns the file name of the index document emitted by the browser build.
///
/// - `Path("src/index.html")` → `"index.html"`
/// - `Detailed { output: Some("main.html"), .. }` → `"main.html"`
/// - `Detailed { output: None, .. }` → `"index.html"`
pub fn index_output_file(index: &IndexOption) -> String {
    match index {
        IndexOption::Path(path) => Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone()),
        IndexOption::Detailed { output, .. } => match output.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_INDEX_OUTPUT.to_string(),
        },
    }
}
