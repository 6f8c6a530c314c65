use std::{fmt::Debug, hash::Hash};

/// Opaque node label. Equality defines node identity.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Debug {}

/// Dense index of a node inside one [`FlowNetwork`](crate::FlowNetwork).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    pub(crate) index: usize,
}

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}
