//! Prerender plan: resolved routes split into shards, written for workers.
//!
//! ## Output Structure
//!
//! ```text
//! .prerender/
//! ├── routes.json     # Plan manifest: index file, routes, props, shard list
//! ├── shard-001.txt   # Routes for worker 1, one per line
//! ├── shard-002.txt
//! └── ...
//! ```
//!
//! Shard files use the routes-file format, so a worker can be pointed at its
//! shard as its `routes_file` and resolve exactly those routes. Props stay in
//! `routes.json`, keyed by path.
//!
//! Shard files are independent and written in parallel with
//! [rayon](https://docs.rs/rayon). Shard files left over from a previous plan
//! with more shards are removed first.

use crate::index::{IndexOption, index_output_file};
use crate::shard::shard;
use crate::types::{ResolvedRouteSet, RouteProps};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

/// Name of the plan manifest within the output directory.
pub const MANIFEST_FILENAME: &str = "routes.json";

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contents of `routes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanManifest {
    /// File name each route's HTML is written to, e.g. `index.html`.
    pub index: String,
    pub routes: Vec<String>,
    #[serde(default, skip_serializing_if = "RouteProps::is_empty")]
    pub props: RouteProps,
    pub shards: Vec<ShardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardEntry {
    pub file: String,
    pub routes: usize,
}

/// A computed plan, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub manifest: PlanManifest,
    pub shards: Vec<Vec<String>>,
}

/// `shard-001.txt` for shard index 0.
pub fn shard_file_name(index: usize) -> String {
    format!("shard-{:03}.txt", index + 1)
}

/// Shard the resolved routes and describe the result.
pub fn build_plan(
    resolved: &ResolvedRouteSet,
    shard_count: NonZeroUsize,
    index: &IndexOption,
) -> Plan {
    let shards = shard(&resolved.routes, shard_count);
    let entries = shards
        .iter()
        .enumerate()
        .map(|(i, routes)| ShardEntry {
            file: shard_file_name(i),
            routes: routes.len(),
        })
        .collect();
    Plan {
        manifest: PlanManifest {
            index: index_output_file(index),
            routes: resolved.routes.clone(),
            props: resolved.props.clone(),
            shards: entries,
        },
        shards,
    }
}

/// Write the manifest and all shard files into `out_dir`.
pub fn write_plan(plan: &Plan, out_dir: &Path) -> Result<(), PlanError> {
    fs::create_dir_all(out_dir)?;
    remove_stale_shards(out_dir)?;

    plan.shards
        .par_iter()
        .enumerate()
        .try_for_each(|(i, routes)| {
            let file = out_dir.join(shard_file_name(i));
            tracing::debug!(file = ?file, routes = routes.len(), "Writing shard");
            fs::write(file, shard_contents(routes))
        })?;

    let json = serde_json::to_string_pretty(&plan.manifest)?;
    fs::write(out_dir.join(MANIFEST_FILENAME), json)?;
    Ok(())
}

/// Read a previously written plan manifest.
pub fn load_manifest(out_dir: &Path) -> Result<PlanManifest, PlanError> {
    let content = fs::read_to_string(out_dir.join(MANIFEST_FILENAME))?;
    Ok(serde_json::from_str(&content)?)
}

fn shard_contents(routes: &[String]) -> String {
    let mut contents = routes.join("\n");
    contents.push('\n');
    contents
}

fn remove_stale_shards(out_dir: &Path) -> Result<(), PlanError> {
    for entry in fs::read_dir(out_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("shard-") && name.ends_with(".txt") && entry.path().is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
