use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Capacity, FlowError, FlowNetwork, NodeHandle, NodeId, capacity::checked_sum};

/// Source/sink partition certified by a saturated network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinCut<N, C> {
    source_side: Vec<N>,
    sink_side: Vec<N>,
    edges: Vec<(N, N)>,
    capacity: C,
}

impl<N, C> MinCut<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// Nodes still reachable from the source through positive residuals.
    pub fn source_side(&self) -> &[N] {
        &self.source_side
    }

    pub fn sink_side(&self) -> &[N] {
        &self.sink_side
    }

    /// Declared edges crossing from the source side to the sink side.
    pub fn edges(&self) -> &[(N, N)] {
        &self.edges
    }

    /// Sum of the declared capacities of the crossing edges.
    pub fn capacity(&self) -> C {
        self.capacity
    }

    pub fn is_on_source_side(&self, node: &N) -> bool {
        self.source_side.contains(node)
    }
}

/// Fails with `FlowOverflow` when the crossing capacities do not fit in `C`.
pub(crate) fn minimum_cut<N, C>(
    network: &FlowNetwork<N, C>,
    source: NodeHandle,
) -> Result<MinCut<N, C>, FlowError<N, C>>
where
    N: NodeId,
    C: Capacity,
{
    let mut reachable = vec![false; network.node_count()];
    if let Some(flag) = reachable.get_mut(source.index) {
        *flag = true;
    }

    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        for (edge, _) in network.residual_arcs(node) {
            if !reachable[edge.to.index] {
                reachable[edge.to.index] = true;
                queue.push_back(edge.to);
            }
        }
    }

    let (source_side, sink_side): (Vec<_>, Vec<_>) = network
        .nodes()
        .enumerate()
        .partition(|(index, _)| reachable[*index]);

    let crossing: Vec<_> = network
        .declared_arcs()
        .filter(|arc| reachable[arc.from.index] && !reachable[arc.to.index])
        .collect();

    let capacity =
        checked_sum(crossing.iter().map(|arc| arc.capacity)).ok_or(FlowError::FlowOverflow)?;

    Ok(MinCut {
        source_side: source_side.into_iter().map(|(_, node)| node.clone()).collect(),
        sink_side: sink_side.into_iter().map(|(_, node)| node.clone()).collect(),
        edges: crossing
            .iter()
            .map(|arc| (network.label(arc.from).clone(), network.label(arc.to).clone()))
            .collect(),
        capacity,
    })
}
