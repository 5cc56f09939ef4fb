//! Read-only view over a tree of navigation destinations.
//!
//! The synchronizer never walks the controller's graph directly. It goes through
//! [`DestinationTree`], which only answers the questions the app bar needs:
//! who is the parent of a node, what is its label, and, for graphs, which child
//! is the designated start destination.
//!
//! [`NavGraph`] is a small in-memory implementation that hosts can use when
//! their controller does not already expose a tree of its own.
//!
//! ```txt
//!   root (graph, start = home)
//!   ├── home
//!   ├── library (graph, start = shelf)
//!   │   ├── shelf
//!   │   └── book
//!   └── settings
//! ```

use indexmap::IndexMap;
use std::fmt;

/// Identifier of a destination, unique within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationId(pub u32);

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while building a [`NavGraph`] or resolving its start chain.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A destination with this id is already part of the graph
    #[error("destination {0} is already part of the graph")]
    DuplicateDestination(DestinationId),

    /// The requested parent does not exist
    #[error("parent destination {0} does not exist")]
    UnknownParent(DestinationId),

    /// Children can only be attached to graphs
    #[error("destination {0} is not a graph and can't own children")]
    ParentNotGraph(DestinationId),

    /// A graph's declared start destination is not one of its children
    #[error("start destination {start} of graph {graph} is not a child of that graph")]
    MissingStartDestination {
        graph: DestinationId,
        start: DestinationId,
    },
}

/// Read-only access to a tree of destinations.
///
/// Implementations must describe a tree: following [`parent`](Self::parent)
/// from any node ends at the root after a finite number of steps.
pub trait DestinationTree {
    /// The outermost graph.
    fn root(&self) -> DestinationId;

    /// Returns true if the destination is part of the tree.
    fn contains(&self, id: DestinationId) -> bool;

    /// Returns the parent graph, if any.
    fn parent(&self, id: DestinationId) -> Option<DestinationId>;

    /// Returns the label template of the destination.
    fn label(&self, id: DestinationId) -> Option<&str>;

    /// Returns the designated start child when `id` is a graph.
    fn start_destination(&self, id: DestinationId) -> Option<DestinationId>;

    /// Returns true if `child` is a direct child of `graph`.
    fn is_child_of(&self, graph: DestinationId, child: DestinationId) -> bool {
        self.parent(child) == Some(graph)
    }

    /// Returns true if the destination is itself a graph.
    fn is_graph(&self, id: DestinationId) -> bool {
        self.start_destination(id).is_some()
    }
}

/// A node of a [`NavGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    pub label: Option<String>,
    pub parent: Option<DestinationId>,
    /// Start child, present only for graphs.
    pub start: Option<DestinationId>,
    pub children: Vec<DestinationId>,
}

impl Destination {
    fn new(id: DestinationId, label: Option<&str>, parent: Option<DestinationId>) -> Self {
        Destination {
            id,
            label: label.map(str::to_string),
            parent,
            start: None,
            children: Vec::new(),
        }
    }

    pub fn is_graph(&self) -> bool {
        self.start.is_some()
    }
}

/// In-memory [`DestinationTree`].
///
/// Nodes are attached one at a time under a graph that is already present, so
/// the structure is a tree by construction. The start child of a graph is only
/// checked when it is resolved, which lets callers declare a graph before its
/// children.
///
/// # Example
///
/// ```
/// use appbar_core::navigation::graph::{DestinationId, DestinationTree, NavGraph};
///
/// let root = DestinationId(1);
/// let home = DestinationId(2);
///
/// let mut graph = NavGraph::new(root, home, None);
/// graph.add_screen(root, home, Some("Home"))?;
///
/// assert_eq!(graph.parent(home), Some(root));
/// assert_eq!(graph.label(home), Some("Home"));
/// # Ok::<(), appbar_core::navigation::graph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NavGraph {
    root: DestinationId,
    nodes: IndexMap<DestinationId, Destination>,
}

impl NavGraph {
    /// Creates a graph made of a single root graph whose start child is `start`.
    pub fn new(root: DestinationId, start: DestinationId, label: Option<&str>) -> Self {
        let mut node = Destination::new(root, label, None);
        node.start = Some(start);

        let mut nodes = IndexMap::new();
        nodes.insert(root, node);

        NavGraph { root, nodes }
    }

    /// Attaches a leaf destination under `parent`.
    pub fn add_screen(
        &mut self,
        parent: DestinationId,
        id: DestinationId,
        label: Option<&str>,
    ) -> Result<&mut Self, GraphError> {
        self.attach(parent, Destination::new(id, label, Some(parent)))?;
        Ok(self)
    }

    /// Attaches a nested graph under `parent`.
    pub fn add_graph(
        &mut self,
        parent: DestinationId,
        id: DestinationId,
        start: DestinationId,
        label: Option<&str>,
    ) -> Result<&mut Self, GraphError> {
        let mut node = Destination::new(id, label, Some(parent));
        node.start = Some(start);
        self.attach(parent, node)?;
        Ok(self)
    }

    pub fn destination(&self, id: DestinationId) -> Option<&Destination> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn attach(&mut self, parent: DestinationId, node: Destination) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateDestination(node.id));
        }

        let Some(owner) = self.nodes.get_mut(&parent) else {
            return Err(GraphError::UnknownParent(parent));
        };

        if !owner.is_graph() {
            return Err(GraphError::ParentNotGraph(parent));
        }

        owner.children.push(node.id);
        self.nodes.insert(node.id, node);

        Ok(())
    }
}

impl DestinationTree for NavGraph {
    fn root(&self) -> DestinationId {
        self.root
    }

    fn contains(&self, id: DestinationId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn parent(&self, id: DestinationId) -> Option<DestinationId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    fn label(&self, id: DestinationId) -> Option<&str> {
        self.nodes.get(&id).and_then(|node| node.label.as_deref())
    }

    fn start_destination(&self, id: DestinationId) -> Option<DestinationId> {
        self.nodes.get(&id).and_then(|node| node.start)
    }

    fn is_child_of(&self, graph: DestinationId, child: DestinationId) -> bool {
        self.nodes
            .get(&graph)
            .is_some_and(|node| node.children.contains(&child))
    }
}
