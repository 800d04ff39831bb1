//! Route resolution: merge explicit, file-listed, and guessed routes.
//!
//! ```text
//! explicit routes  ──┐
//! routes file      ──┼──► concat ──► "" → "/" ──► dedup ──► ResolvedRouteSet
//! guessed routes   ──┘
//! ```
//!
//! ## Guessing
//!
//! Guessing asks a [`RouteSource`] for its route specs and expands them:
//! wildcard routes are skipped, literal routes are taken as is, and
//! parameterized routes are expanded from their `prerender` producer. All
//! producers run concurrently and are joined once; each route's results keep
//! the producer's order.
//!
//! The guess phase is all-or-nothing. Any [`GuessError`] (an unparseable
//! routing configuration, a failing producer, or a result carrying props but
//! no params) discards every guessed route and is reported as a
//! [`Diagnostic::DiscoveryFailed`]. Explicit and file routes are always kept.
//! A result whose path still has an unfilled placeholder only drops that
//! result, with a [`Diagnostic::IncompletePath`] warning. Params that name no
//! placeholder are ignored.

use super::path::{self, RouteKind, Substitution};
use super::source::{DiscoveryError, ParamResult, Params, RouteSource, RouteSpec};
use super::table::RouteTable;
use crate::config::PrerenderConfig;
use crate::types::{ResolvedRouteSet, RouteProps};
use futures::future::try_join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Routes file {path} could not be read: {source}")]
    ConfigMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort the guess phase.
#[derive(Error, Debug)]
pub enum GuessError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("Route {route}: {source}")]
    Prerender {
        route: String,
        #[source]
        source: DiscoveryError,
    },
    #[error("Route {route}: prerender result has props but no params")]
    UnresolvedPlaceholder { route: String },
}

/// Non-fatal problems found while resolving.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A prerender result left placeholders unfilled and was dropped.
    IncompletePath { route: String, params: Params },
    /// Route guessing failed; no guessed routes were used.
    DiscoveryFailed { message: String },
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::DiscoveryFailed { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::IncompletePath { route, params } => write!(
                f,
                "The route {route} could not be prerendered because not all of its parameters were provided: {params:?}"
            ),
            Diagnostic::DiscoveryFailed { message } => {
                write!(f, "Unable to extract routes from application: {message}")
            }
        }
    }
}

/// Resolved routes plus everything worth telling the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub routes: ResolvedRouteSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Routes and props produced by a successful guess phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guessed {
    pub routes: Vec<String>,
    pub props: RouteProps,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse routes-file contents: one route per line, LF or CRLF, blank lines dropped.
pub fn parse_routes_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse a routes file. An unreadable file is fatal.
pub fn read_routes_file(path: &Path) -> Result<Vec<String>, ResolveError> {
    Ok(parse_routes_file(&read_routes_contents(path)?))
}

fn read_routes_contents(path: &Path) -> Result<String, ResolveError> {
    std::fs::read_to_string(path).map_err(|source| ResolveError::ConfigMissing {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge the three route sources into the final route set.
///
/// `source` is `None` when guessing is disabled. Never fails: guess-phase
/// errors become diagnostics.
pub async fn resolve(
    explicit: &[String],
    routes_file_contents: Option<&str>,
    source: Option<&dyn RouteSource>,
) -> Resolution {
    let mut routes: Vec<String> = explicit.to_vec();
    if let Some(contents) = routes_file_contents {
        routes.extend(parse_routes_file(contents));
    }

    let mut props = RouteProps::new();
    let mut diagnostics = Vec::new();
    if let Some(source) = source {
        match guess_routes(source).await {
            Ok(guessed) => {
                tracing::debug!(count = guessed.routes.len(), "Guessed routes");
                routes.extend(guessed.routes);
                props = guessed.props;
                diagnostics.extend(guessed.diagnostics);
            }
            Err(e) => {
                tracing::error!(error = %e, "Unable to extract routes from application");
                diagnostics.push(Diagnostic::DiscoveryFailed {
                    message: e.to_string(),
                });
            }
        }
    }

    Resolution {
        routes: ResolvedRouteSet::new(routes, props),
        diagnostics,
    }
}

/// Resolve routes as configured in `prerender.toml`.
///
/// Relative paths in `config` are resolved against `root`. Fails only when a
/// configured routes file cannot be read.
pub async fn get_routes(config: &PrerenderConfig, root: &Path) -> Result<Resolution, ResolveError> {
    let file_contents = match &config.routes_file {
        Some(file) => Some(read_routes_contents(&root.join(file))?),
        None => None,
    };

    let table = config
        .guess_routes
        .then(|| RouteTable::new(root.join(&config.router_config)));

    Ok(resolve(
        &config.routes,
        file_contents.as_deref(),
        table.as_ref().map(|t| t as &dyn RouteSource),
    )
    .await)
}

/// What a spec contributes once its producer (if any) has run.
enum Enumerated {
    Skip,
    Literal,
    Results(Vec<ParamResult>),
}

/// Run the guess phase against `source`.
pub async fn guess_routes(source: &dyn RouteSource) -> Result<Guessed, GuessError> {
    let specs = source.parse_routes()?;

    let enumerations = try_join_all(specs.iter().map(|spec| enumerate(spec))).await?;

    let mut guessed = Guessed::default();
    for (spec, enumerated) in specs.iter().zip(enumerations) {
        match enumerated {
            Enumerated::Skip => {}
            Enumerated::Literal => guessed.routes.push(spec.path.clone()),
            Enumerated::Results(results) => expand(spec, results, &mut guessed)?,
        }
    }
    Ok(guessed)
}

async fn enumerate(spec: &RouteSpec) -> Result<Enumerated, GuessError> {
    match path::classify(&spec.path) {
        RouteKind::Wildcard => {
            tracing::debug!(route = %spec.path, "Skipping wildcard route");
            Ok(Enumerated::Skip)
        }
        RouteKind::Literal => Ok(Enumerated::Literal),
        RouteKind::Parameterized => match &spec.prerender {
            None => {
                tracing::debug!(route = %spec.path, "Skipping parameterized route without prerender");
                Ok(Enumerated::Skip)
            }
            Some(producer) => {
                let results = producer
                    .params()
                    .await
                    .map_err(|source| GuessError::Prerender {
                        route: spec.path.clone(),
                        source,
                    })?;
                Ok(Enumerated::Results(results))
            }
        },
    }
}

fn expand(
    spec: &RouteSpec,
    results: Vec<ParamResult>,
    guessed: &mut Guessed,
) -> Result<(), GuessError> {
    for result in results {
        if result.is_empty() {
            continue;
        }
        let Some(params) = result.params else {
            return Err(GuessError::UnresolvedPlaceholder {
                route: spec.path.clone(),
            });
        };
        match path::substitute(&spec.path, &params) {
            Substitution::Incomplete(_) => {
                let diagnostic = Diagnostic::IncompletePath {
                    route: spec.path.clone(),
                    params,
                };
                tracing::warn!("{diagnostic}");
                guessed.diagnostics.push(diagnostic);
            }
            Substitution::Complete(route) => {
                if let Some(props) = result.props {
                    guessed.props.entry(route.clone()).or_insert(props);
                }
                guessed.routes.push(route);
            }
        }
    }
    Ok(())
}
