//! JSON routing table, the production [`RouteSource`].
//!
//! The table mirrors a nested client-side router configuration. Child paths
//! are joined onto their parent's path and every entry, parents included,
//! becomes one flat [`RouteSpec`]:
//!
//! ```json
//! [
//!   { "path": "" },
//!   { "path": "user/:id", "prerender": [{ "params": { "id": "1" }, "props": { "name": "Ada" } }] },
//!   { "path": "docs", "children": [{ "path": "intro" }, { "path": "**" }] }
//! ]
//! ```
//!
//! flattens to `""`, `/user/:id`, `/docs`, `/docs/intro`, `/docs/**`. Non-empty
//! paths are given a leading `/`; the empty root path is left for the resolver
//! to map to `/`.

use super::source::{DiscoveryError, ParamResult, RouteSource, RouteSpec, StaticParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableEntry {
    #[serde(default)]
    path: String,
    #[serde(default)]
    prerender: Option<Vec<ParamResult>>,
    #[serde(default)]
    children: Vec<TableEntry>,
}

/// Routing table stored as a JSON file.
#[derive(Debug, Clone)]
pub struct RouteTable {
    path: PathBuf,
}

impl RouteTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse table JSON into flat route specs.
    pub fn parse_str(json: &str) -> Result<Vec<RouteSpec>, serde_json::Error> {
        let entries: Vec<TableEntry> = serde_json::from_str(json)?;
        let mut specs = Vec::new();
        flatten(entries, "", &mut specs);
        Ok(specs)
    }
}

impl RouteSource for RouteTable {
    fn parse_routes(&self) -> Result<Vec<RouteSpec>, DiscoveryError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| DiscoveryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let specs = Self::parse_str(&json).map_err(|source| DiscoveryError::Json {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = ?self.path, routes = specs.len(), "Parsed routing table");
        Ok(specs)
    }
}

fn flatten(entries: Vec<TableEntry>, parent: &str, out: &mut Vec<RouteSpec>) {
    for entry in entries {
        let path = join_path(parent, &entry.path);
        let mut spec = RouteSpec::new(path.clone());
        if let Some(list) = entry.prerender {
            spec = spec.with_prerender(StaticParams(list));
        }
        out.push(spec);
        flatten(entry.children, &path, out);
    }
}

fn join_path(parent: &str, child: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let child = child.trim_matches('/');
    match (parent.is_empty(), child.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("/{child}"),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}/{child}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use tempfile::TempDir;

    fn paths(specs: &[RouteSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.path.as_str()).collect()
    }

    #[test]
    fn join_path_cases() {
        assert_eq!(join_path("", ""), "");
        assert_eq!(join_path("", "about"), "/about");
        assert_eq!(join_path("", "/about/"), "/about");
        assert_eq!(join_path("/docs", ""), "/docs");
        assert_eq!(join_path("/docs/", "intro"), "/docs/intro");
    }

    #[test]
    fn flattens_children() {
        let specs = RouteTable::parse_str(
            r#"[
                { "path": "" },
                { "path": "docs", "children": [
                    { "path": "intro" },
                    { "path": "guides", "children": [{ "path": ":slug" }] }
                ]}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            paths(&specs),
            vec!["", "/docs", "/docs/intro", "/docs/guides", "/docs/guides/:slug"]
        );
    }

    #[test]
    fn prerender_list_becomes_producer() {
        let specs = RouteTable::parse_str(
            r#"[{ "path": "user/:id", "prerender": [{ "params": { "id": "7" } }] }]"#,
        )
        .unwrap();
        let producer = specs[0].prerender.as_ref().unwrap();
        let results = block_on(producer.params()).unwrap();
        assert_eq!(results, vec![ParamResult::with_params([("id", "7")])]);
    }

    #[test]
    fn entries_without_prerender_have_no_producer() {
        let specs = RouteTable::parse_str(r#"[{ "path": "user/:id" }]"#).unwrap();
        assert!(specs[0].prerender.is_none());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(RouteTable::parse_str(r#"[{ "path": "a", "component": "X" }]"#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let table = RouteTable::new(tmp.path().join("routes.json"));
        assert!(matches!(table.parse_routes(), Err(DiscoveryError::Io { .. })));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("routes.json");
        std::fs::write(&file, "{ not json").unwrap();
        let table = RouteTable::new(&file);
        assert_eq!(table.path(), file.as_path());
        assert!(matches!(table.parse_routes(), Err(DiscoveryError::Json { .. })));
    }

    #[test]
    fn reads_table_from_disk() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("routes.json");
        std::fs::write(&file, r#"[{ "path": "a" }, { "path": "b/*" }]"#).unwrap();
        let specs = RouteTable::new(&file).parse_routes().unwrap();
        assert_eq!(paths(&specs), vec!["/a", "/b/*"]);
    }
}
