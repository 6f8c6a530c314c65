use std::collections::VecDeque;

use try_partialord::TryMinMax;

use crate::{Capacity, EdgeHandle, FlowError, FlowNetwork, NodeHandle, NodeId};

/// Source-to-sink path through arcs with positive residual capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentingPath<C>
where
    C: Capacity,
{
    edges: Vec<EdgeHandle>,
    bottleneck: C,
}

impl<C> AugmentingPath<C>
where
    C: Capacity,
{
    /// `None` for a path without arcs, which cannot carry flow.
    fn new<N>(
        edges: Vec<EdgeHandle>,
        network: &FlowNetwork<N, C>,
    ) -> Result<Option<Self>, FlowError<N, C>>
    where
        N: NodeId,
    {
        let bottleneck = edges
            .iter()
            .map(|edge| network.arc(*edge).residual_capacity())
            .try_min()
            .map_err(|_| FlowError::IncomparableResidual)?;

        Ok(bottleneck.map(|bottleneck| AugmentingPath { edges, bottleneck }))
    }

    /// Arcs from source to sink.
    pub fn edges(&self) -> &[EdgeHandle] {
        &self.edges
    }

    /// Smallest residual along the path.
    pub fn bottleneck(&self) -> C {
        self.bottleneck
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Breadth-first search for an augmenting path with the fewest arcs.
///
/// Arcs are explored in the network's enumeration order and the search stops
/// as soon as the sink is discovered, so repeated calls on the same residual
/// state return the same path. `Ok(None)` means the network is saturated.
pub fn shortest_augmenting_path<N, C>(
    network: &FlowNetwork<N, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<Option<AugmentingPath<C>>, FlowError<N, C>>
where
    N: NodeId,
    C: Capacity,
{
    let node_count = network.node_count();
    if source == sink || source.index >= node_count || sink.index >= node_count {
        return Ok(None);
    }

    let mut discovered_by: Vec<Option<EdgeHandle>> = vec![None; node_count];
    let mut visited = vec![false; node_count];
    visited[source.index] = true;

    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        for (edge, _) in network.residual_arcs(node) {
            let next = edge.to;
            if visited[next.index] {
                continue;
            }
            visited[next.index] = true;
            discovered_by[next.index] = Some(edge);

            if next == sink {
                return AugmentingPath::new(trace(&discovered_by, source, sink), network);
            }
            queue.push_back(next);
        }
    }

    Ok(None)
}

fn trace(
    discovered_by: &[Option<EdgeHandle>],
    source: NodeHandle,
    sink: NodeHandle,
) -> Vec<EdgeHandle> {
    let mut path = Vec::new();
    let mut current = sink;
    while current != source
        && let Some(edge) = discovered_by[current.index]
    {
        path.push(edge);
        current = edge.from;
    }
    debug_assert_eq!(current, source, "discovery chain must lead back to the source");
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CapacityTable, SolverConfig};

    fn network(
        edges: Vec<(&'static str, &'static str, f64)>,
    ) -> FlowNetwork<&'static str, f64> {
        let table = CapacityTable::aggregate(edges).unwrap();
        FlowNetwork::new(&table, &SolverConfig::default())
    }

    fn labels(
        graph: &FlowNetwork<&'static str, f64>,
        path: &AugmentingPath<f64>,
    ) -> Vec<&'static str> {
        let mut nodes = vec![*graph.node(path.edges()[0].from()).unwrap()];
        nodes.extend(path.edges().iter().map(|edge| *graph.node(edge.to()).unwrap()));
        nodes
    }

    fn endpoints(graph: &FlowNetwork<&'static str, f64>) -> (NodeHandle, NodeHandle) {
        (graph.handle_of(&"s").unwrap(), graph.handle_of(&"t").unwrap())
    }

    #[test]
    fn test_bfs_finds_path() {
        let graph = network(vec![("s", "a", 10.0), ("a", "b", 5.0), ("b", "t", 10.0)]);
        let (s, t) = endpoints(&graph);

        let path = shortest_augmenting_path(&graph, s, t).unwrap().unwrap();
        assert_eq!(labels(&graph, &path), vec!["s", "a", "b", "t"]);
        assert_eq!(path.bottleneck(), 5.0);
    }

    #[test]
    fn test_trace_follows_discovery_chain() {
        let graph = network(vec![("s", "a", 1.0), ("a", "t", 1.0)]);
        let (s, t) = endpoints(&graph);
        let a = graph.handle_of(&"a").unwrap();
        let edges: Vec<_> = graph.declared_edges().collect();

        let mut discovered_by = vec![None; graph.node_count()];
        discovered_by[a.index] = Some(edges[0]);
        discovered_by[t.index] = Some(edges[1]);

        assert_eq!(trace(&discovered_by, s, t), edges);
    }

    #[test]
    fn test_bfs_prefers_fewest_edges() {
        let graph = network(vec![
            ("s", "a", 10.0),
            ("a", "b", 10.0),
            ("b", "t", 10.0),
            ("s", "t", 1.0),
        ]);
        let (s, t) = endpoints(&graph);

        let path = shortest_augmenting_path(&graph, s, t).unwrap().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.bottleneck(), 1.0);
    }

    #[test]
    fn test_bfs_ties_follow_declaration_order() {
        let graph = network(vec![
            ("s", "b", 1.0),
            ("s", "a", 1.0),
            ("a", "t", 1.0),
            ("b", "t", 1.0),
        ]);
        let (s, t) = endpoints(&graph);

        let path = shortest_augmenting_path(&graph, s, t).unwrap().unwrap();
        assert_eq!(labels(&graph, &path), vec!["s", "b", "t"]);
    }

    #[test]
    fn test_bfs_with_no_capacity() {
        let graph = network(vec![("s", "a", 10.0), ("a", "b", 0.0), ("b", "t", 10.0)]);
        let (s, t) = endpoints(&graph);

        assert!(shortest_augmenting_path(&graph, s, t).unwrap().is_none());
    }

    #[test]
    fn test_bfs_respects_direction() {
        let graph = network(vec![("t", "a", 10.0), ("a", "s", 10.0)]);
        let (s, t) = endpoints(&graph);

        assert!(shortest_augmenting_path(&graph, s, t).unwrap().is_none());
    }

    #[test]
    fn test_bfs_uses_cancellation_arcs() {
        let mut graph = network(vec![
            ("s", "a", 1.0),
            ("a", "b", 1.0),
            ("b", "t", 1.0),
            ("s", "b", 1.0),
            ("a", "t", 1.0),
        ]);
        let (s, t) = endpoints(&graph);

        // push one unit along s -> a -> b -> t by hand
        let declared: Vec<_> = graph.declared_edges().take(3).collect();
        for edge in declared {
            graph.set_residual(edge, 0.0);
            graph.set_residual(edge.reverse(), 1.0);
        }

        let path = shortest_augmenting_path(&graph, s, t).unwrap().unwrap();
        assert_eq!(labels(&graph, &path), vec!["s", "b", "a", "t"]);
        assert!(!path.edges()[1].is_forward());
        assert_eq!(path.bottleneck(), 1.0);
    }

    #[test]
    fn test_source_equal_to_sink_has_no_path() {
        let graph = network(vec![("s", "t", 1.0)]);
        let (s, _) = endpoints(&graph);

        assert!(shortest_augmenting_path(&graph, s, s).unwrap().is_none());
    }
}
