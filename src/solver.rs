use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Capacity, CapacityTable, EdgeFlow, FlowAssignment, FlowError, FlowNetwork, MaxFlowEngine,
    MinCut, NodeId, SolverConfig, Terminal, cut::minimum_cut, extract::extract_flows,
};

/// How a solve finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// Augmented until no path was left.
    Saturated,
    /// Source and sink were the same node; nothing was augmented.
    SourceIsSink,
}

/// Outcome of a successful solve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaxFlow<N, C>
where
    N: NodeId,
    C: Capacity,
{
    value: C,
    flows: FlowAssignment<N, C>,
    edges: Vec<EdgeFlow<N, C>>,
    min_cut: Option<MinCut<N, C>>,
    status: SolveStatus,
    augmentations: usize,
}

impl<N, C> MaxFlow<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// Total flow from source to sink.
    pub fn value(&self) -> C {
        self.value
    }

    /// Positive flow per declared edge.
    pub fn flows(&self) -> &FlowAssignment<N, C> {
        &self.flows
    }

    /// Every declared edge with its flow and capacity, in declaration order.
    pub fn edges(&self) -> &[EdgeFlow<N, C>] {
        &self.edges
    }

    /// `None` when source and sink coincide.
    pub fn min_cut(&self) -> Option<&MinCut<N, C>> {
        self.min_cut.as_ref()
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn into_parts(self) -> (C, FlowAssignment<N, C>) {
        (self.value, self.flows)
    }
}

/// Entry point: edges in, maximum flow out.
///
/// Every call builds its own network, so one solver can be shared freely.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        MaxFlowSolver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Aggregates `edges` and solves from `source` to `sink`.
    ///
    /// Input is checked in this order: capacities, then whether source and
    /// sink coincide (a zero result, not an error), then whether both appear
    /// in some edge.
    pub fn solve<N, C, I>(
        &self,
        edges: I,
        source: &N,
        sink: &N,
    ) -> Result<MaxFlow<N, C>, FlowError<N, C>>
    where
        N: NodeId,
        C: Capacity,
        I: IntoIterator<Item = (N, N, C)>,
    {
        let table = CapacityTable::aggregate(edges)?;
        self.solve_table(&table, source, sink)
    }

    pub fn solve_table<N, C>(
        &self,
        table: &CapacityTable<N, C>,
        source: &N,
        sink: &N,
    ) -> Result<MaxFlow<N, C>, FlowError<N, C>>
    where
        N: NodeId,
        C: Capacity,
    {
        let network = FlowNetwork::new(table, &self.config);

        if source == sink {
            debug!("source and sink are both {:?}; flow is zero", source);
            let (flows, edges) = extract_flows(&network)?;
            return Ok(MaxFlow {
                value: C::zero(),
                flows,
                edges,
                min_cut: None,
                status: SolveStatus::SourceIsSink,
                augmentations: 0,
            });
        }

        let source_handle = network
            .handle_of(source)
            .ok_or_else(|| FlowError::UnknownNode {
                node: source.clone(),
                terminal: Terminal::Source,
            })?;
        let sink_handle = network
            .handle_of(sink)
            .ok_or_else(|| FlowError::UnknownNode {
                node: sink.clone(),
                terminal: Terminal::Sink,
            })?;

        debug!(
            "solving {:?} -> {:?} over {} nodes and {} edges",
            source,
            sink,
            network.node_count(),
            network.edge_count()
        );

        let engine = MaxFlowEngine::new(network, source_handle, sink_handle).run()?;
        let value = engine.value();
        let augmentations = engine.augmentations();
        let network = engine.into_network();

        let (flows, edges) = extract_flows(&network)?;
        let min_cut = minimum_cut(&network, source_handle)?;

        debug!(
            "maximum flow {:?} after {} augmentations, {} edges carry flow",
            value,
            augmentations,
            flows.len()
        );

        Ok(MaxFlow {
            value,
            flows,
            edges,
            min_cut: Some(min_cut),
            status: SolveStatus::Saturated,
            augmentations,
        })
    }
}

/// Solves with the default configuration.
pub fn solve_max_flow<N, C, I>(
    edges: I,
    source: &N,
    sink: &N,
) -> Result<MaxFlow<N, C>, FlowError<N, C>>
where
    N: NodeId,
    C: Capacity,
    I: IntoIterator<Item = (N, N, C)>,
{
    MaxFlowSolver::new().solve(edges, source, sink)
}
