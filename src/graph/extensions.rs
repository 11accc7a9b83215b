use crate::graph::{amplify::Amplify, node::GraphNode};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<C: GraphNode>(self, control: C) -> Amplify<Self, C> {
        Amplify::new(self, control)
    }
}

impl<T: GraphNode> NodeExt for T {}
