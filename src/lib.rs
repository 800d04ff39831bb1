//! # Prerender Plan
//!
//! Works out which routes of a single-page application to prerender, and
//! splits them into balanced shards for parallel render workers.
//!
//! # Pipeline
//!
//! ```text
//! 1. Resolve  prerender.toml + routes.txt + routes.json  →  ResolvedRouteSet
//! 2. Shard    ResolvedRouteSet                           →  N route lists
//! 3. Plan     shards                                     →  .prerender/{routes.json, shard-NNN.txt}
//! ```
//!
//! Rendering itself is out of scope: workers pick up a shard file and render
//! each route into the index file named in the plan manifest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`routes`] | Merges explicit, file-listed, and guessed routes; expands parameterized routes |
//! | [`shard`] | Round-robin partition of the route list |
//! | [`plan`] | Builds and writes the plan manifest and shard files |
//! | [`config`] | `prerender.toml` loading, merging, and validation |
//! | [`index`] | Index output file name lookup |
//! | [`types`] | [`ResolvedRouteSet`](types::ResolvedRouteSet) and route props |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Guessing Never Fails the Build
//!
//! Routes listed explicitly or in a routes file are what the user asked for,
//! so failing to read a configured routes file is an error. Guessed routes are
//! best effort: any failure while discovering them drops all guessed routes,
//! logs an error, and resolution carries on with the rest.
//!
//! ## Props Travel With the Routes
//!
//! Per-route props produced while expanding parameterized routes are returned
//! inside [`ResolvedRouteSet`](types::ResolvedRouteSet) and written to the plan
//! manifest, rather than kept in process-wide state for the renderer to find.
//!
//! ## Interleaved Shards
//!
//! Route `i` goes to shard `i % n`. Shard sizes never differ by more than one,
//! and the assignment depends only on the route list and shard count, so the
//! same build always produces the same shards.

pub mod config;
pub mod index;
pub mod output;
pub mod plan;
pub mod routes;
pub mod shard;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
