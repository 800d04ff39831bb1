//! Routing-configuration sources and parameter producers.
//!
//! A [`RouteSource`] parses the application's routing configuration into a flat
//! list of [`RouteSpec`]s. Parameterized specs may carry a [`ParamsProducer`]
//! that enumerates the concrete parameter sets to prerender. Both are traits so
//! the resolver does not depend on any particular routing format; the
//! production source is [`RouteTable`](super::table::RouteTable).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Parameter name → value, e.g. `{"id": "42"}` for `/user/:id`.
pub type Params = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid routing table {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Parameter enumeration failed: {0}")]
    Producer(String),
}

/// One entry produced by a route's `prerender` capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

impl ParamResult {
    /// A result carrying only params.
    pub fn with_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: Some(
                params
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            props: None,
        }
    }

    pub fn props(mut self, props: serde_json::Value) -> Self {
        self.props = Some(props);
        self
    }

    /// Neither params nor props: nothing to prerender.
    pub fn is_empty(&self) -> bool {
        self.params.is_none() && self.props.is_none()
    }
}

/// Enumerates the concrete instances of a parameterized route.
///
/// Called at most once per resolution; calls for different routes may run
/// concurrently.
#[async_trait]
pub trait ParamsProducer: Send + Sync {
    async fn params(&self) -> Result<Vec<ParamResult>, DiscoveryError>;
}

/// Parses a routing configuration into route specs.
pub trait RouteSource: Send + Sync {
    fn parse_routes(&self) -> Result<Vec<RouteSpec>, DiscoveryError>;
}

/// A single route from the routing configuration.
#[derive(Clone)]
pub struct RouteSpec {
    pub path: String,
    pub prerender: Option<Arc<dyn ParamsProducer>>,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prerender: None,
        }
    }

    pub fn with_prerender(mut self, producer: impl ParamsProducer + 'static) -> Self {
        self.prerender = Some(Arc::new(producer));
        self
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("path", &self.path)
            .field("prerender", &self.prerender.is_some())
            .finish()
    }
}

/// Producer over a fixed list, as declared inline in a routing table.
#[derive(Debug, Clone, Default)]
pub struct StaticParams(pub Vec<ParamResult>);

#[async_trait]
impl ParamsProducer for StaticParams {
    async fn params(&self) -> Result<Vec<ParamResult>, DiscoveryError> {
        Ok(self.0.clone())
    }
}
