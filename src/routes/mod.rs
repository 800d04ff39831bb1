//! Route discovery and resolution.
//!
//! The module is split into:
//! - **Source**: [`RouteSource`] / [`ParamsProducer`] traits and the route spec types
//! - **Path**: pure functions classifying paths and filling placeholders
//! - **Table**: [`RouteTable`], the JSON routing-table source
//! - **Resolve**: merging explicit, file, and guessed routes into a [`ResolvedRouteSet`](crate::types::ResolvedRouteSet)

pub mod path;
pub mod resolve;
pub mod source;
pub mod table;

pub use resolve::{
    Diagnostic, GuessError, Resolution, ResolveError, get_routes, guess_routes,
    parse_routes_file, read_routes_file, resolve,
};
pub use source::{
    DiscoveryError, ParamResult, Params, ParamsProducer, RouteSource, RouteSpec, StaticParams,
};
pub use table::RouteTable;
