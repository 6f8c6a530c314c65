use crate::{Capacity, NodeHandle};

/// One arc of the residual network.
///
/// Every declared edge produces a forward arc carrying its capacity and a
/// backward arc that starts empty; both share the same `edge_id` and the same
/// epsilon, derived from the declared capacity.
#[derive(Clone, Debug)]
pub(crate) struct FlowEdge<C>
where
    C: Capacity,
{
    pub(crate) from: NodeHandle,
    pub(crate) to: NodeHandle,
    pub(crate) residual: C,
    pub(crate) capacity: C, // declared capacity, zero on backward arcs
    pub(crate) epsilon: C,
    pub(crate) edge_id: usize,
    pub(crate) forward: bool,
}

impl<C> FlowEdge<C>
where
    C: Capacity,
{
    pub(crate) fn residual_capacity(&self) -> C {
        self.residual
    }

    pub(crate) fn has_residual_capacity(&self) -> bool {
        self.is_positive(self.residual)
    }

    pub(crate) fn is_positive(&self, amount: C) -> bool {
        amount > self.epsilon
    }

    pub(crate) fn handle(&self) -> EdgeHandle {
        EdgeHandle {
            from: self.from,
            to: self.to,
            edge_id: self.edge_id,
            forward: self.forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    pub(crate) from: NodeHandle,
    pub(crate) to: NodeHandle,
    pub(crate) edge_id: usize,
    pub(crate) forward: bool,
}

impl EdgeHandle {
    pub fn from(&self) -> NodeHandle {
        self.from
    }

    pub fn to(&self) -> NodeHandle {
        self.to
    }

    /// Position of the declared edge this arc belongs to.
    pub fn edge_id(&self) -> usize {
        self.edge_id
    }

    /// Whether this is the declared direction rather than its cancellation arc.
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn reverse(&self) -> EdgeHandle {
        EdgeHandle {
            from: self.to,
            to: self.from,
            edge_id: self.edge_id,
            forward: !self.forward,
        }
    }
}
