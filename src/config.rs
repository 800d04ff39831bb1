//! Prerender configuration module.
//!
//! Handles loading, validating, and merging `prerender.toml`. User values are
//! layered on top of stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! my-app/
//! ├── prerender.toml     # Prerender config (optional)
//! ├── routes.txt         # Extra routes, one per line (optional)
//! ├── routes.json        # Routing table used for route guessing
//! └── src/index.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! routes = []                    # Routes to prerender, always included
//! # routes_file = "routes.txt"   # File with one route per line
//! guess_routes = false           # Discover routes from the routing table
//! router_config = "routes.json"  # Routing table read when guessing
//! index = "src/index.html"       # Or: [index] input = "...", output = "..."
//!
//! [processing]
//! # max_processes = 4            # Number of shards (omit for cores - 1)
//! ```
//!
//! Relative paths are resolved against the workspace root. Unknown keys are
//! rejected to catch typos early.

use crate::index::IndexOption;
use crate::shard;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the workspace root.
pub const CONFIG_FILENAME: &str = "prerender.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Prerender configuration loaded from `prerender.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrerenderConfig {
    /// Routes that are always prerendered, in this order.
    pub routes: Vec<String>,
    /// Plain-text file listing additional routes, one per line.
    pub routes_file: Option<PathBuf>,
    /// Whether to discover routes from the routing table.
    pub guess_routes: bool,
    /// Routing table consulted when `guess_routes` is on.
    pub router_config: PathBuf,
    /// Index document of the browser build.
    pub index: IndexOption,
    /// Sharding settings.
    pub processing: ProcessingConfig,
}

impl Default for PrerenderConfig {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            routes_file: None,
            guess_routes: false,
            router_config: PathBuf::from("routes.json"),
            index: IndexOption::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl PrerenderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        if let Some(file) = &self.routes_file
            && file.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "routes_file must not be empty".into(),
            ));
        }
        if self.guess_routes && self.router_config.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "router_config is required when guess_routes is enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Parallelism settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Number of shards the route list is split into.
    /// When absent, defaults to one less than the number of CPU cores (at least 1).
    pub max_processes: Option<usize>,
}

/// Resolve the shard count from config.
///
/// - `None` → [`shard::default_shard_count`]
/// - `Some(n)` → `n`, with `0` clamped to `1`
pub fn effective_shards(config: &ProcessingConfig) -> NonZeroUsize {
    match config.max_processes {
        Some(n) => NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN),
        None => shard::default_shard_count(),
    }
}

/// Resolve the writer thread count for a given shard count.
///
/// Never more threads than shards or cores.
pub fn effective_threads(shards: NonZeroUsize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    shards.get().min(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PrerenderConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PrerenderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PrerenderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(config_path: &Path) -> Result<PrerenderConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(config_path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `prerender.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Prerender Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Relative paths are resolved against the workspace root.

# Routes that are always prerendered, in this order.
routes = []

# Plain-text file with one route per line (LF or CRLF). Blank lines are
# ignored. A configured file that cannot be read fails the build.
# routes_file = "routes.txt"

# Discover routes from the routing table. Wildcard routes are skipped,
# parameterized routes are expanded from their "prerender" entries.
guess_routes = false

# Routing table read when guess_routes is enabled.
router_config = "routes.json"

# Index document of the browser build. Either a path (its file name is
# used) or a table with an explicit output name:
#   [index]
#   input = "src/index.html"
#   output = "main.html"
index = "src/index.html"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Number of shards the route list is split into.
# Omit or comment out to auto-detect (= CPU cores - 1, at least 1).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = PrerenderConfig::default();
        assert!(config.routes.is_empty());
        assert_eq!(config.routes_file, None);
        assert!(!config.guess_routes);
        assert_eq!(config.router_config, PathBuf::from("routes.json"));
        assert_eq!(config.index, IndexOption::Path("src/index.html".into()));
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
routes = ["/", "/about"]
guess_routes = true
"#;
        let config: PrerenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routes, vec!["/", "/about"]);
        assert!(config.guess_routes);
        // Default values preserved
        assert_eq!(config.router_config, PathBuf::from("routes.json"));
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn parse_detailed_index() {
        let toml = r#"
[index]
input = "src/index.html"
output = "main.html"
"#;
        let config: PrerenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.index,
            IndexOption::Detailed {
                input: "src/index.html".into(),
                output: Some("main.html".into()),
            }
        );
    }

    #[test]
    fn parse_processing_config() {
        let toml = r#"
[processing]
max_processes = 4
"#;
        let config: PrerenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.processing.max_processes, Some(4));
    }

    #[test]
    fn effective_shards_auto_matches_default() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        assert_eq!(effective_shards(&config), shard::default_shard_count());
    }

    #[test]
    fn effective_shards_is_not_capped_by_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        assert_eq!(effective_shards(&config).get(), 99999);
    }

    #[test]
    fn effective_shards_zero_clamps_to_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_shards(&config).get(), 1);
    }

    #[test]
    fn effective_threads_capped_by_shards() {
        assert_eq!(effective_threads(NonZeroUsize::MIN), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"guess_routes = false"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"guess_routes = true"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("guess_routes").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str(r#"routes = ["/a", "/b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"routes = ["/c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("routes").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn merge_toml_index_table_replaces_string() {
        let merged = merge_toml(
            stock_defaults_value(),
            toml::from_str(
                r#"
[index]
input = "web/index.html"
"#,
            )
            .unwrap(),
        );
        let config: PrerenderConfig = merged.try_into().unwrap();
        assert_eq!(
            config.index,
            IndexOption::Detailed {
                input: "web/index.html".into(),
                output: None,
            }
        );
    }

    // =========================================================================
    // Unknown key rejection and validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<PrerenderConfig, _> = toml::from_str(r#"guess_route = true"#);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r#"
[processing]
max_process = 2
"#;
        let result: Result<PrerenderConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn validate_zero_processes() {
        let mut config = PrerenderConfig::default();
        config.processing.max_processes = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_empty_routes_file() {
        let config = PrerenderConfig {
            routes_file: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(PrerenderConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Loading from disk
    // =========================================================================

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, PrerenderConfig::default());
    }

    #[test]
    fn load_config_merges_user_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
routes_file = "routes.txt"

[processing]
max_processes = 3
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.routes_file, Some(PathBuf::from("routes.txt")));
        assert_eq!(config.processing.max_processes, Some(3));
        assert_eq!(config.index, IndexOption::default());
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[processing]\nmax_processes = 0\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_reports_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "routes = [").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: PrerenderConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, PrerenderConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value();
        assert!(value.is_table());
        assert!(value.get("processing").is_some());
        assert!(value.get("routes_file").is_none());
    }
}
