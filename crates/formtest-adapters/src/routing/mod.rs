//! Route table adapters.

mod static_table;

pub use static_table::{RouteDefinition, RoutingError, StaticRouteTable};
