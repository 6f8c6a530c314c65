use std::fmt;

use thiserror::Error;

/// Which end of the flow problem a node was requested as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terminal {
    Source,
    Sink,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Source => f.write_str("source"),
            Terminal::Sink => f.write_str("sink"),
        }
    }
}

/// Failures of a max-flow solve. All input problems are reported before the
/// residual network is touched.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FlowError<N, C> {
    #[error("edge {from:?} -> {to:?} has invalid capacity {capacity:?}")]
    InvalidCapacity { from: N, to: N, capacity: C },

    #[error("{terminal} node {node:?} does not appear in any edge")]
    UnknownNode { node: N, terminal: Terminal },

    #[error("total capacity of edge {from:?} -> {to:?} does not fit the capacity type")]
    CapacityOverflow { from: N, to: N },

    #[error("source reaches sink through edges of unbounded capacity")]
    UnboundedFlow,

    #[error("flow total does not fit the capacity type")]
    FlowOverflow,

    #[error("residual capacities along an augmenting path are not comparable")]
    IncomparableResidual,

    #[error(
        "edge {from:?} -> {to:?} ended with residual {residual:?} outside its capacity {capacity:?}"
    )]
    FlowOutOfRange {
        from: N,
        to: N,
        capacity: C,
        residual: C,
    },
}

impl<N, C> FlowError<N, C> {
    /// Whether the failure was caused by the caller's input rather than by the solver.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidCapacity { .. }
                | FlowError::UnknownNode { .. }
                | FlowError::CapacityOverflow { .. }
                | FlowError::UnboundedFlow
                | FlowError::FlowOverflow
        )
    }
}
