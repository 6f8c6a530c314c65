use log::{debug, trace};

use crate::{
    AugmentingPath, Capacity, FlowError, FlowNetwork, NodeHandle, NodeId,
    shortest_augmenting_path,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Still searching for augmenting paths.
    Augmenting,
    /// No augmenting path is left; the flow is maximal.
    Saturated,
}

/// Drives shortest-path augmentation over a residual network it owns.
///
/// Always augmenting along a path with the fewest arcs bounds the number of
/// augmentations by a polynomial in the node and edge counts, whatever the
/// capacities are.
#[derive(Clone, Debug)]
pub struct MaxFlowEngine<N, C>
where
    N: NodeId,
    C: Capacity,
{
    network: FlowNetwork<N, C>,
    source: NodeHandle,
    sink: NodeHandle,
    state: EngineState,
    value: C,
    augmentations: usize,
}

impl<N, C> MaxFlowEngine<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// An engine whose source and sink coincide starts out saturated.
    pub fn new(network: FlowNetwork<N, C>, source: NodeHandle, sink: NodeHandle) -> Self {
        let state = if source == sink {
            EngineState::Saturated
        } else {
            EngineState::Augmenting
        };

        MaxFlowEngine {
            network,
            source,
            sink,
            state,
            value: C::zero(),
            augmentations: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Flow pushed from source to sink so far.
    pub fn value(&self) -> C {
        self.value
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn network(&self) -> &FlowNetwork<N, C> {
        &self.network
    }

    pub fn into_network(self) -> FlowNetwork<N, C> {
        self.network
    }

    /// Applies at most one augmentation and reports the resulting state.
    ///
    /// Fails without touching the residuals when the next path has unbounded
    /// capacity or would push the total past what the capacity type holds.
    pub fn step(&mut self) -> Result<EngineState, FlowError<N, C>> {
        if self.state == EngineState::Saturated {
            return Ok(self.state);
        }

        match shortest_augmenting_path(&self.network, self.source, self.sink)? {
            Some(path) => {
                if path.bottleneck().is_unbounded() {
                    return Err(FlowError::UnboundedFlow);
                }
                let value = self
                    .value
                    .checked_total(path.bottleneck())
                    .ok_or(FlowError::FlowOverflow)?;

                self.augment_flow_along_path(&path);
                self.value = value;
                self.augmentations += 1;
                trace!(
                    "augmentation {}: {} arcs, bottleneck {:?}, total {:?}",
                    self.augmentations,
                    path.len(),
                    path.bottleneck(),
                    self.value
                );
            }
            None => {
                self.state = EngineState::Saturated;
                debug!(
                    "saturated after {} augmentations with flow {:?}",
                    self.augmentations, self.value
                );
            }
        }

        Ok(self.state)
    }

    /// Augments until no path from source to sink remains.
    pub fn run(mut self) -> Result<Self, FlowError<N, C>> {
        while self.step()? == EngineState::Augmenting {}
        Ok(self)
    }

    fn augment_flow_along_path(&mut self, path: &AugmentingPath<C>) {
        for edge in path.edges() {
            self.network.push_flow(*edge, path.bottleneck());
        }
    }
}
