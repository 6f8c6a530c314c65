//! Maximum flow between a source and a sink in a capacitated directed network.
//!
//! Raw `(from, to, capacity)` triples are summed per ordered pair, turned into
//! a residual network, and saturated by augmenting along shortest paths. The
//! result carries the flow value, the flow on every declared edge and the
//! minimum cut that proves the value optimal.
//!
//! ```
//! use network_flow::solve_max_flow;
//!
//! let edges = vec![("s", "a", 3.0), ("a", "t", 2.0), ("s", "t", 1.0)];
//! let result = solve_max_flow(edges, &"s", &"t").unwrap();
//!
//! assert_eq!(result.value(), 3.0);
//! assert_eq!(result.flows().get(&"a", &"t"), 2.0);
//! ```

mod aggregate;
mod capacity;
mod config;
mod cut;
mod edge;
mod engine;
mod error;
mod extract;
mod graph;
mod node;
mod search;
mod solver;

pub use aggregate::CapacityTable;
pub use capacity::Capacity;
pub use config::*;
pub use cut::MinCut;
pub use edge::*;
pub use engine::*;
pub use error::*;
pub use extract::{EdgeFlow, FlowAssignment};
pub use graph::*;
pub use node::*;
pub use search::*;
pub use solver::*;
