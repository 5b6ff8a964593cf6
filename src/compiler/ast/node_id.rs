
/// Node id defines the unique id associated with every decoration carrying
/// node regardless of position in the ast tree. The analysis passes key
/// their side tables on it, so ids must be unique within a single tree.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct NodeId {
    id: u64
}

impl NodeId {
    pub(crate) fn new(id: u64) -> Self {
        NodeId {
            id
        }
    }
}

/// Generator will generate unique NodeIds for one abstract syntax tree
pub struct NodeIdGenerator {
    current: u64
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        NodeIdGenerator {
            current: 0
        }
    }
}

impl Iterator for NodeIdGenerator {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = NodeId::new(self.current);
        self.current += 1;
        Some(id)
    }
}
