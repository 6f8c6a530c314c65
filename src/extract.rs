use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Capacity, FlowError, FlowNetwork, NodeId};

/// Realized flow per declared edge. Edges without flow are left out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowAssignment<N, C>
where
    N: NodeId,
    C: Capacity,
{
    flows: IndexMap<(N, N), C>,
}

impl<N, C> FlowAssignment<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// Flow on `from -> to`; zero for pairs that carry none or were never declared.
    pub fn get(&self, from: &N, to: &N) -> C {
        self.flows
            .get(&(from.clone(), to.clone()))
            .copied()
            .unwrap_or_else(C::zero)
    }

    /// Positive flows in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &N, C)> {
        self.flows.iter().map(|((from, to), flow)| (from, to, *flow))
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Total flow leaving `node`.
    pub fn outflow(&self, node: &N) -> C {
        self.iter()
            .filter(|(from, _, _)| *from == node)
            .map(|(_, _, flow)| flow)
            .sum()
    }

    /// Total flow entering `node`.
    pub fn inflow(&self, node: &N) -> C {
        self.iter()
            .filter(|(_, to, _)| *to == node)
            .map(|(_, _, flow)| flow)
            .sum()
    }

    pub fn into_map(self) -> IndexMap<(N, N), C> {
        self.flows
    }
}

impl<N, C> Default for FlowAssignment<N, C>
where
    N: NodeId,
    C: Capacity,
{
    fn default() -> Self {
        FlowAssignment {
            flows: IndexMap::new(),
        }
    }
}

/// Flow and capacity of one declared edge, whether or not it carries flow.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeFlow<N, C> {
    pub from: N,
    pub to: N,
    pub flow: C,
    pub capacity: C,
}

impl<N, C> EdgeFlow<N, C>
where
    C: Capacity,
{
    /// Share of the capacity in use, in `[0, 1]`. Zero-capacity edges report zero.
    pub fn utilization(&self) -> f64 {
        match (self.flow.to_f64(), self.capacity.to_f64()) {
            (Some(flow), Some(capacity)) if capacity > 0.0 => flow / capacity,
            _ => 0.0,
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.capacity > C::zero() && self.flow >= self.capacity
    }
}

/// Reads the realized flow of every declared edge off the residual network.
///
/// The flow on an edge is what its backward arc can cancel. For a bounded edge
/// it must also equal the declared capacity minus the residual left on the
/// forward arc; any disagreement beyond the edge's epsilon means augmentation
/// went wrong and is reported, not clamped.
pub(crate) fn extract_flows<N, C>(
    network: &FlowNetwork<N, C>,
) -> Result<(FlowAssignment<N, C>, Vec<EdgeFlow<N, C>>), FlowError<N, C>>
where
    N: NodeId,
    C: Capacity,
{
    let mut assignment = FlowAssignment::default();
    let mut edges = Vec::with_capacity(network.edge_count());

    for arc in network.declared_arcs() {
        let from = network.label(arc.from);
        let to = network.label(arc.to);
        let capacity = arc.capacity;
        let residual = arc.residual_capacity();
        let flow = network.arc(arc.handle().reverse()).residual_capacity();

        if !is_consistent(capacity, residual, flow, arc.epsilon) {
            return Err(FlowError::FlowOutOfRange {
                from: from.clone(),
                to: to.clone(),
                capacity,
                residual,
            });
        }

        let flow = if flow > capacity {
            capacity
        } else if arc.is_positive(flow) {
            flow
        } else {
            C::zero()
        };

        if flow > C::zero() {
            assignment.flows.insert((from.clone(), to.clone()), flow);
        }
        edges.push(EdgeFlow {
            from: from.clone(),
            to: to.clone(),
            flow,
            capacity,
        });
    }

    Ok((assignment, edges))
}

/// `residual + flow == capacity` and `0 <= flow <= capacity`, both within `epsilon`.
/// Unbounded edges only need a finite, non-negative flow.
fn is_consistent<C>(capacity: C, residual: C, flow: C, epsilon: C) -> bool
where
    C: Capacity,
{
    let non_negative = |amount: C| amount + epsilon >= C::zero();

    if capacity.is_unbounded() {
        return non_negative(flow) && !flow.is_unbounded();
    }

    let Some(total) = residual.checked_total(flow) else {
        return false;
    };
    non_negative(residual)
        && non_negative(flow)
        && flow <= capacity + epsilon
        && total <= capacity + epsilon
        && total + epsilon >= capacity
}
