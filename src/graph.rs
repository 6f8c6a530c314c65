use indexmap::{IndexMap, IndexSet};

use crate::{
    Capacity, CapacityTable, EdgeHandle, FlowEdge, NodeHandle, NodeId, SolverConfig,
    capacity::checked_sum,
};

/// Residual network built from a [`CapacityTable`].
///
/// Arcs live in one vector: the forward arc of declared edge `i` sits at `2 * i`
/// and its backward arc at `2 * i + 1`, so an [`EdgeHandle`] addresses its arc
/// directly. Outgoing arcs of a node are enumerated in creation order.
///
/// Each arc counts as exhausted once its residual drops to the epsilon of its
/// own declared capacity, so edges of very different magnitudes do not mask
/// each other.
#[derive(Clone, Debug)]
pub struct FlowNetwork<N, C>
where
    N: NodeId,
    C: Capacity,
{
    nodes: IndexSet<N>,
    arcs: Vec<FlowEdge<C>>,
    pairs: IndexMap<(NodeHandle, NodeHandle), Vec<usize>>,
    outgoing: Vec<Vec<usize>>,
}

impl<N, C> FlowNetwork<N, C>
where
    N: NodeId,
    C: Capacity,
{
    pub fn new(table: &CapacityTable<N, C>, config: &SolverConfig) -> Self {
        let mut network = FlowNetwork {
            nodes: IndexSet::with_capacity(table.node_count()),
            arcs: Vec::with_capacity(2 * table.len()),
            pairs: IndexMap::new(),
            outgoing: Vec::with_capacity(table.node_count()),
        };

        for node in table.nodes() {
            network.add_node(node.clone());
        }

        for (from, to, capacity) in table.edges() {
            let from = network.add_node(from.clone());
            let to = network.add_node(to.clone());
            let epsilon = C::epsilon(capacity, config.relative_tolerance);
            network.add_edge(from, to, capacity, epsilon);
        }

        network
    }

    fn add_node(&mut self, node: N) -> NodeHandle {
        let (index, inserted) = self.nodes.insert_full(node);
        if inserted {
            self.outgoing.push(Vec::new());
        }
        NodeHandle { index }
    }

    fn add_edge(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        capacity: C,
        epsilon: C,
    ) -> EdgeHandle {
        let edge_id = self.arcs.len() / 2;

        let forward_edge = FlowEdge {
            from,
            to,
            residual: capacity,
            capacity,
            epsilon,
            edge_id,
            forward: true,
        };
        let handle = forward_edge.handle();

        let backward_edge = FlowEdge {
            from: to,
            to: from,
            residual: C::zero(), // nothing to cancel yet
            capacity: C::zero(),
            epsilon,
            edge_id,
            forward: false,
        };

        self.push_arc(forward_edge);
        self.push_arc(backward_edge);

        handle
    }

    fn push_arc(&mut self, arc: FlowEdge<C>) {
        let position = self.arcs.len();
        self.pairs.entry((arc.from, arc.to)).or_default().push(position);
        self.outgoing[arc.from.index].push(position);
        self.arcs.push(arc);
    }

    fn arc_index(edge: EdgeHandle) -> usize {
        2 * edge.edge_id + usize::from(!edge.forward)
    }

    fn get_edge(&self, edge: EdgeHandle) -> Option<&FlowEdge<C>> {
        self.arcs
            .get(Self::arc_index(edge))
            .filter(|arc| arc.handle() == edge)
    }

    fn get_edge_mut(&mut self, edge: EdgeHandle) -> Option<&mut FlowEdge<C>> {
        self.arcs
            .get_mut(Self::arc_index(edge))
            .filter(|arc| arc.handle() == edge)
    }

    /// Arc behind a handle produced by this network's own traversal.
    pub(crate) fn arc(&self, edge: EdgeHandle) -> &FlowEdge<C> {
        &self.arcs[Self::arc_index(edge)]
    }

    /// Moves `amount` from an arc's residual to its reverse arc.
    pub(crate) fn push_flow(&mut self, edge: EdgeHandle, amount: C) {
        let forward = &mut self.arcs[Self::arc_index(edge)];
        forward.residual = forward.residual - amount;

        let backward = &mut self.arcs[Self::arc_index(edge.reverse())];
        backward.residual = backward.residual + amount;
    }

    fn get_edges(&self, from: NodeHandle, to: NodeHandle) -> impl Iterator<Item = &FlowEdge<C>> {
        self.pairs
            .get(&(from, to))
            .into_iter()
            .flatten()
            .map(|position| &self.arcs[*position])
    }

    pub(crate) fn declared_arcs(&self) -> impl Iterator<Item = &FlowEdge<C>> {
        self.arcs.iter().step_by(2)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared edges, not counting cancellation arcs.
    pub fn edge_count(&self) -> usize {
        self.arcs.len() / 2
    }

    pub fn handle_of(&self, node: &N) -> Option<NodeHandle> {
        self.nodes
            .get_index_of(node)
            .map(|index| NodeHandle { index })
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&N> {
        self.nodes.get_index(handle.index)
    }

    pub(crate) fn label(&self, handle: NodeHandle) -> &N {
        &self.nodes[handle.index]
    }

    /// Residuals on `edge` at or below this value are treated as exhausted.
    pub fn epsilon(&self, edge: EdgeHandle) -> Option<C> {
        self.get_edge(edge).map(|arc| arc.epsilon)
    }

    /// Handles of the declared edges, in declaration order.
    pub fn declared_edges(&self) -> impl Iterator<Item = EdgeHandle> {
        self.declared_arcs().map(|arc| arc.handle())
    }

    /// Outgoing arcs of `from` that can still carry flow, with their residuals.
    pub fn residual_arcs(&self, from: NodeHandle) -> impl Iterator<Item = (EdgeHandle, C)> {
        self.outgoing
            .get(from.index)
            .into_iter()
            .flatten()
            .map(|position| &self.arcs[*position])
            .filter(|arc| arc.has_residual_capacity())
            .map(|arc| (arc.handle(), arc.residual_capacity()))
    }

    /// `None` if `edge` was not issued by this network.
    pub fn residual(&self, edge: EdgeHandle) -> Option<C> {
        self.get_edge(edge).map(|arc| arc.residual_capacity())
    }

    /// Replaces the residual of one arc and returns the previous value, or
    /// `None` if `edge` was not issued by this network.
    pub fn set_residual(&mut self, edge: EdgeHandle, residual: C) -> Option<C> {
        self.get_edge_mut(edge)
            .map(|arc| std::mem::replace(&mut arc.residual, residual))
    }

    /// Total residual over every arc from `from` to `to`, including cancellation
    /// arcs. `None` if the total overflows the capacity type.
    pub fn residual_between(&self, from: NodeHandle, to: NodeHandle) -> Option<C> {
        checked_sum(self.get_edges(from, to).map(|arc| arc.residual_capacity()))
    }

    /// Declared capacity of `from -> to`; zero when the pair was never declared.
    pub fn capacity(&self, from: NodeHandle, to: NodeHandle) -> C {
        self.get_edges(from, to)
            .find(|arc| arc.forward)
            .map_or_else(C::zero, |arc| arc.capacity)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn network<N: NodeId>(edges: Vec<(N, N, f64)>) -> FlowNetwork<N, f64> {
        let table = CapacityTable::aggregate(edges).unwrap();
        FlowNetwork::new(&table, &SolverConfig::default())
    }

    #[test]
    fn test_network_creation() {
        let graph = network(vec![("s", "a", 3.0), ("a", "t", 2.0)]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let nodes: Vec<_> = graph.nodes().copied().collect();
        assert_eq!(nodes, vec!["s", "a", "t"]);
    }

    #[test]
    fn test_reverse_arc_starts_empty() {
        let graph = network(vec![("s", "t", 4.0)]);
        let s = graph.handle_of(&"s").unwrap();
        let t = graph.handle_of(&"t").unwrap();

        assert_eq!(graph.residual_between(s, t), Some(4.0));
        assert_eq!(graph.residual_between(t, s), Some(0.0));
        assert_eq!(graph.capacity(s, t), 4.0);
        assert_eq!(graph.capacity(t, s), 0.0);
    }

    #[test]
    fn test_antiparallel_edges_stay_independent() {
        let graph = network(vec![("a", "b", 3.0), ("b", "a", 5.0)]);
        let a = graph.handle_of(&"a").unwrap();
        let b = graph.handle_of(&"b").unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.capacity(a, b), 3.0);
        assert_eq!(graph.capacity(b, a), 5.0);
        // each pair holds one declared arc and the other edge's cancellation arc
        assert_eq!(graph.get_edges(a, b).count(), 2);
        assert_eq!(graph.residual_between(a, b), Some(3.0));
    }

    #[test]
    fn test_residual_arcs_skip_exhausted_arcs() {
        let graph = network(vec![("s", "a", 1.0), ("s", "b", 0.0), ("s", "c", 2.0)]);
        let s = graph.handle_of(&"s").unwrap();

        let targets: Vec<_> = graph
            .residual_arcs(s)
            .map(|(edge, residual)| (*graph.node(edge.to()).unwrap(), residual))
            .collect();
        assert_eq!(targets, vec![("a", 1.0), ("c", 2.0)]);
    }

    #[test]
    fn test_set_residual() {
        let mut graph = network(vec![("s", "t", 4.0)]);
        let edge = graph.declared_edges().next().unwrap();

        let previous = graph.set_residual(edge, 1.5);
        graph.set_residual(edge.reverse(), 2.5);

        assert_eq!(previous, Some(4.0));
        assert_eq!(graph.residual(edge), Some(1.5));
        assert_eq!(graph.residual(edge.reverse()), Some(2.5));

        let t = graph.handle_of(&"t").unwrap();
        let arcs: Vec<_> = graph.residual_arcs(t).collect();
        assert_eq!(arcs, vec![(edge.reverse(), 2.5)]);
    }

    #[test]
    fn test_rounding_noise_is_not_residual() {
        let mut graph = network(vec![("s", "t", 1000.0)]);
        let edge = graph.declared_edges().next().unwrap();
        graph.set_residual(edge, 1e-10);

        let s = graph.handle_of(&"s").unwrap();
        assert_eq!(graph.residual_arcs(s).count(), 0);
        assert_eq!(graph.epsilon(edge), Some(1e-6));
    }

    #[test]
    fn test_epsilon_follows_each_edge() {
        let graph = network(vec![
            ("s", "a", 2e9),
            ("a", "x", 2e9),
            ("s", "b", 0.5),
            ("b", "t", 0.5),
        ]);
        let edges: Vec<_> = graph.declared_edges().collect();

        assert_relative_eq!(graph.epsilon(edges[0]).unwrap(), 2.0);
        assert_eq!(graph.epsilon(edges[2]), Some(1e-9));
        assert_eq!(graph.epsilon(edges[2].reverse()), Some(1e-9));

        let b = graph.handle_of(&"b").unwrap();
        let arcs: Vec<_> = graph.residual_arcs(b).map(|(_, residual)| residual).collect();
        assert_eq!(arcs, vec![0.5]);
    }

    #[test]
    fn test_infinite_edge_stays_usable() {
        let graph = network(vec![("s", "a", f64::INFINITY), ("a", "t", 5.0)]);
        let edge = graph.declared_edges().next().unwrap();
        let s = graph.handle_of(&"s").unwrap();

        assert_eq!(graph.epsilon(edge), Some(1e-9));
        assert_eq!(graph.residual_arcs(s).count(), 1);
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let mut small = network(vec![("s", "t", 1.0)]);
        let large = network(vec![("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0)]);
        let foreign = large.declared_edges().last().unwrap();

        assert_eq!(small.residual(foreign), None);
        assert_eq!(small.set_residual(foreign, 3.0), None);
        assert_eq!(small.epsilon(foreign), None);
    }

    #[test]
    fn test_residual_between_overflow() {
        let table = CapacityTable::aggregate(vec![("a", "b", 200u8), ("b", "a", 100u8)]).unwrap();
        let mut graph = FlowNetwork::new(&table, &SolverConfig::default());
        let a = graph.handle_of(&"a").unwrap();
        let b = graph.handle_of(&"b").unwrap();
        let back = graph.declared_edges().nth(1).unwrap();

        graph.set_residual(back.reverse(), 100);
        assert_eq!(graph.residual_between(a, b), None);
        assert_eq!(graph.capacity(a, b), 200);
    }

    #[test]
    fn test_unknown_node() {
        let graph = network(vec![("s", "t", 1.0)]);
        assert!(graph.handle_of(&"x").is_none());
        assert!(graph.node(NodeHandle { index: 9 }).is_none());
        assert_eq!(graph.residual_arcs(NodeHandle { index: 9 }).count(), 0);
    }
}
