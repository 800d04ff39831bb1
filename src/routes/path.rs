//! Pure functions over route path patterns.
//!
//! A path is split on `/` into segments. A segment containing `*` is a
//! wildcard, a segment starting with `:` is a named placeholder
//! (`/user/:id` has the placeholder `id`), anything else is literal text.

use super::source::Params;

/// How a route path can be prerendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Contains a wildcard segment. Cannot be enumerated.
    Wildcard,
    /// Contains at least one `:name` placeholder.
    Parameterized,
    /// Plain path, prerendered as is.
    Literal,
}

/// Classify a route path. Wildcards take precedence over placeholders.
pub fn classify(path: &str) -> RouteKind {
    if path.split('/').any(|segment| segment.contains('*')) {
        RouteKind::Wildcard
    } else if path.split('/').any(is_placeholder) {
        RouteKind::Parameterized
    } else {
        RouteKind::Literal
    }
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() > 1 && segment.starts_with(':')
}

/// Placeholder names in path order, without the leading `:`.
pub fn placeholders(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| is_placeholder(segment))
        .map(|segment| &segment[1..])
        .collect()
}

/// Outcome of filling a path's placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Every placeholder was filled.
    Complete(String),
    /// Some placeholders had no value; the path still contains them.
    Incomplete(String),
}

/// Fill the placeholders of `path` from `params`.
///
/// Params naming no placeholder are ignored. Placeholders without a param are
/// left in place and reported as [`Substitution::Incomplete`].
pub fn substitute(path: &str, params: &Params) -> Substitution {
    let mut incomplete = false;
    let filled: Vec<&str> = path
        .split('/')
        .map(|segment| {
            if !is_placeholder(segment) {
                return segment;
            }
            match params.get(&segment[1..]) {
                Some(value) => value.as_str(),
                None => {
                    incomplete = true;
                    segment
                }
            }
        })
        .collect();

    let filled = filled.join("/");
    if incomplete {
        Substitution::Incomplete(filled)
    } else {
        Substitution::Complete(filled)
    }
}
