use crate::*;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use tabletop_core::Seat;

/// A lightweight handle to a node in the search tree.
///
/// Stores only an index and a reference to the underlying graph,
/// making nodes cheap to copy and pass around. Provides navigation
/// methods for tree traversal (parent, children, slots per action).
///
/// # Iterator Implementation
///
/// Implements `Iterator` for upward traversal: each `next()` yields
/// the parent node and incoming edge, enabling path reconstruction
/// from any node back to the root.
pub struct Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    index: NodeIndex,
    graph: &'tree DiGraph<Vertex<G, E>, E>,
}

impl<'tree, G, E> Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    /// Creates a node handle from an index and graph reference.
    pub fn from(index: NodeIndex, graph: &'tree DiGraph<Vertex<G, E>, E>) -> Self {
        Self { index, graph }
    }
    /// The petgraph index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }
    /// Statistics stored at this node.
    pub fn vertex(&self) -> &'tree Vertex<G, E> {
        let graph: &'tree DiGraph<Vertex<G, E>, E> = self.graph;
        &graph[self.index]
    }
    pub fn seat(&self) -> Seat {
        self.vertex().seat()
    }
    pub fn visits(&self) -> u32 {
        self.vertex().visits()
    }
    /// Creates a node handle at a different index in the same tree.
    pub fn at(&self, index: NodeIndex) -> Node<'tree, G, E> {
        Self::from(index, self.graph)
    }
    /// Returns parent node and incoming edge, if not at root.
    pub fn up(&self) -> Option<(Node<'tree, G, E>, &'tree E)> {
        self.graph
            .edges_directed(self.index, petgraph::Direction::Incoming)
            .next()
            .map(|edge| {
                use petgraph::visit::EdgeRef;
                (self.at(edge.source()), edge.weight())
            })
    }
    /// Parent node (None if this is the root).
    pub fn parent(&self) -> Option<Node<'tree, G, E>> {
        self.up().map(|(parent, _)| parent)
    }
    /// The edge taken to reach this node from its parent.
    pub fn incoming(&self) -> Option<&'tree E> {
        self.up().map(|(_, edge)| edge)
    }
    /// First child reached by taking a specific edge.
    pub fn follow(&self, edge: &E) -> Option<Node<'tree, G, E>> {
        self.slots(edge).into_iter().next()
    }
    /// Every child reached by taking a specific edge.
    pub fn slots(&self, edge: &E) -> Vec<Node<'tree, G, E>> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edges_directed(self.index, petgraph::Direction::Outgoing)
            .filter(|arc| arc.weight() == edge)
            .map(|arc| self.at(arc.target()))
            .collect()
    }
    /// All outgoing edges from this node.
    pub fn outgoing(&self) -> Vec<&'tree E> {
        self.graph
            .edges_directed(self.index, petgraph::Direction::Outgoing)
            .map(|edge| edge.weight())
            .collect()
    }
    /// All direct child nodes.
    pub fn children(&self) -> Vec<Node<'tree, G, E>> {
        self.graph
            .neighbors_directed(self.index, petgraph::Direction::Outgoing)
            .map(|index| self.at(index))
            .collect()
    }
    /// Count of direct child nodes (no allocation).
    pub fn width(&self) -> usize {
        self.graph
            .neighbors_directed(self.index, petgraph::Direction::Outgoing)
            .count()
    }
    /// Number of edges between this node and the root.
    pub fn depth(&self) -> usize {
        let walker = *self;
        walker.count()
    }
}

impl<'tree, G, E> Clone for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn clone(&self) -> Self {
        *self
    }
}
impl<'tree, G, E> Copy for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
}

/// Node naturally implements Iterator by recursing upward through its tree.
/// Each iteration yields a tuple of (Node, Edge) representing the parent node
/// and the edge taken to reach the current node.
impl<'tree, G, E> Iterator for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    type Item = (Self, E);
    fn next(&mut self) -> Option<Self::Item> {
        let (parent, edge) = self.up()?;
        *self = parent;
        Some((parent, *edge))
    }
}

impl<'tree, G, E> std::fmt::Debug for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{})",
            self.vertex(),
            self.index.index(),
            self.graph.node_count()
        )
    }
}

/// Eq implementation will assume that any two
/// Nodes being compared to one another belong
/// to the same tree/graph. such that, we only
/// care about comparing indices.
impl<'tree, G, E> PartialEq for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && std::ptr::eq(self.graph, other.graph)
    }
}
impl<'tree, G, E> Eq for Node<'tree, G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
}
