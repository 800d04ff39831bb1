//! Shared types passed from route resolution to sharding and plan output.
//!
//! [`ResolvedRouteSet`] is serialized into the plan manifest (`routes.json`),
//! so its shape is part of the contract with render workers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Static data per route, keyed by the concrete path. Opaque to this crate.
pub type RouteProps = BTreeMap<String, serde_json::Value>;

/// The final list of routes to prerender.
///
/// Invariants: no duplicate paths, first occurrence wins, and the empty path
/// is stored as `/`. Build it with [`ResolvedRouteSet::new`] to get them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRouteSet {
    pub routes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: RouteProps,
}

impl ResolvedRouteSet {
    /// Normalize and deduplicate `routes`, keeping first-occurrence order.
    pub fn new(routes: impl IntoIterator<Item = String>, props: RouteProps) -> Self {
        let mut seen = HashSet::new();
        let routes = routes
            .into_iter()
            .map(normalize_route)
            .filter(|route| seen.insert(route.clone()))
            .collect();
        Self { routes, props }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Props recorded for `route`, if any.
    pub fn props_for(&self, route: &str) -> Option<&serde_json::Value> {
        self.props.get(route)
    }
}

/// The empty route is the application root.
pub fn normalize_route(route: String) -> String {
    if route.is_empty() {
        "/".to_string()
    } else {
        route
    }
}
