use indexmap::{IndexMap, IndexSet, map::Entry};
use log::trace;

use crate::{Capacity, FlowError, NodeId};

/// Declared edges collapsed to one total capacity per ordered node pair.
///
/// Pairs and nodes keep the order of their first mention, which fixes the
/// iteration order of everything built from the table.
#[derive(Clone, Debug)]
pub struct CapacityTable<N, C>
where
    N: NodeId,
    C: Capacity,
{
    nodes: IndexSet<N>,
    capacities: IndexMap<(N, N), C>,
}

impl<N, C> CapacityTable<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// Sums the capacities declared for each ordered pair.
    ///
    /// Fails on the first negative (or NaN) capacity, or on a pair whose total
    /// overflows the capacity type, without returning any partially built table.
    pub fn aggregate<I>(edges: I) -> Result<Self, FlowError<N, C>>
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        let mut nodes = IndexSet::new();
        let mut capacities: IndexMap<(N, N), C> = IndexMap::new();

        for (from, to, capacity) in edges {
            if !capacity.is_valid_capacity() {
                return Err(FlowError::InvalidCapacity { from, to, capacity });
            }

            nodes.insert(from.clone());
            nodes.insert(to.clone());

            match capacities.entry((from, to)) {
                Entry::Occupied(mut entry) => {
                    let Some(total) = entry.get().checked_total(capacity) else {
                        let (from, to) = entry.key().clone();
                        return Err(FlowError::CapacityOverflow { from, to });
                    };
                    trace!("merging duplicate edge {:?}: total {:?}", entry.key(), total);
                    *entry.get_mut() = total;
                }
                Entry::Vacant(entry) => {
                    entry.insert(capacity);
                }
            }
        }

        Ok(CapacityTable { nodes, capacities })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Total capacity declared for `from -> to`, if the pair was declared at all.
    pub fn capacity(&self, from: &N, to: &N) -> Option<C> {
        self.capacities.get(&(from.clone(), to.clone())).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, C)> {
        self.capacities
            .iter()
            .map(|((from, to), capacity)| (from, to, *capacity))
    }

    /// Number of distinct ordered pairs.
    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }
}
