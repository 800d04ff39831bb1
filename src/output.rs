//! CLI output formatting for all commands.
//!
//! # Output Format
//!
//! ## Routes
//!
//! ```text
//! Routes
//! 001 /
//! 002 /about
//! 003 /user/1 (props)
//!
//! Warnings
//!     The route /user/:id could not be prerendered because ...
//!
//! 3 routes, 1 with props
//! ```
//!
//! ## Shards
//!
//! ```text
//! Shard 001 (2 routes)
//!     /
//!     /user/1
//! Shard 002 (1 route)
//!     /about
//! ```
//!
//! ## Plan
//!
//! ```text
//! Index: index.html
//! shard-001.txt (2 routes)
//! shard-002.txt (1 route)
//!
//! Planned 3 routes in 2 shards → .prerender/routes.json
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::plan::{MANIFEST_FILENAME, Plan};
use crate::routes::{Diagnostic, Resolution};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Warnings and errors, grouped under their own headers. Empty when clean.
fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut lines = Vec::new();
    for (header, errors) in [("Errors", true), ("Warnings", false)] {
        let group: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.is_error() == errors)
            .collect();
        if group.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(header.to_string());
        for diagnostic in group {
            lines.push(format!("{}{}", indent(1), diagnostic));
        }
    }
    lines
}

// ============================================================================
// routes
// ============================================================================

/// Format the resolved route list, marking routes that carry props.
pub fn format_routes_output(resolution: &Resolution) -> Vec<String> {
    let routes = &resolution.routes;
    let mut lines = vec!["Routes".to_string()];
    for (i, route) in routes.routes.iter().enumerate() {
        if routes.props_for(route).is_some() {
            lines.push(format!("{} {} (props)", format_index(i + 1), route));
        } else {
            lines.push(format!("{} {}", format_index(i + 1), route));
        }
    }
    lines.extend(format_diagnostics(&resolution.diagnostics));
    lines.push(String::new());
    lines.push(format!(
        "{}, {} with props",
        plural(routes.len(), "route"),
        routes.props.len()
    ));
    lines
}

pub fn print_routes_output(resolution: &Resolution) {
    for line in format_routes_output(resolution) {
        println!("{}", line);
    }
}

// ============================================================================
// shard
// ============================================================================

/// Format each shard with its routes indented beneath it.
pub fn format_shards_output(shards: &[Vec<String>]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, shard) in shards.iter().enumerate() {
        lines.push(format!(
            "Shard {} ({})",
            format_index(i + 1),
            plural(shard.len(), "route")
        ));
        for route in shard {
            lines.push(format!("{}{}", indent(1), route));
        }
    }
    if shards.is_empty() {
        lines.push("No routes to shard".to_string());
    }
    lines
}

pub fn print_shards_output(shards: &[Vec<String>]) {
    for line in format_shards_output(shards) {
        println!("{}", line);
    }
}

// ============================================================================
// plan
// ============================================================================

/// Format a written plan: index file, shard files, and a summary line.
pub fn format_plan_output(plan: &Plan, out_dir: &Path) -> Vec<String> {
    let manifest = &plan.manifest;
    let mut lines = vec![format!("Index: {}", manifest.index)];
    for entry in &manifest.shards {
        lines.push(format!("{} ({})", entry.file, plural(entry.routes, "route")));
    }
    lines.push(String::new());
    lines.push(format!(
        "Planned {} in {} → {}",
        plural(manifest.routes.len(), "route"),
        plural(manifest.shards.len(), "shard"),
        out_dir.join(MANIFEST_FILENAME).display()
    ));
    lines
}

pub fn print_plan_output(plan: &Plan, out_dir: &Path) {
    for line in format_plan_output(plan, out_dir) {
        println!("{}", line);
    }
}
