//! Hierarchy queries over a [`DestinationTree`].

use super::graph::{DestinationId, DestinationTree, GraphError};
use fxhash::FxHashSet;

/// Walks from a destination up to the root, yielding the destination itself first.
pub struct Ancestors<'a, T: DestinationTree + ?Sized> {
    tree: &'a T,
    next: Option<DestinationId>,
}

impl<T: DestinationTree + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = DestinationId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Returns `id` followed by every graph enclosing it, innermost first.
pub fn ancestors<T: DestinationTree + ?Sized>(tree: &T, id: DestinationId) -> Ancestors<'_, T> {
    Ancestors {
        tree,
        next: Some(id),
    }
}

/// Determines whether `destination` or one of its enclosing graphs is in `ids`.
///
/// This covers both the plain case (the destination itself is listed) and the
/// nested case where a parent or grandparent graph is listed, in which case
/// every destination inside that graph counts as a match.
pub fn matches_destinations<T: DestinationTree + ?Sized>(
    tree: &T,
    destination: DestinationId,
    ids: &FxHashSet<DestinationId>,
) -> bool {
    ancestors(tree, destination).any(|id| ids.contains(&id))
}

/// Finds the destination actually shown when navigating to `graph`.
///
/// A graph's start destination may itself be a graph, so this keeps descending
/// through start children until it reaches a destination that isn't a graph.
/// Calling it on a non-graph returns that destination unchanged.
///
/// # Errors
///
/// Returns [`GraphError::MissingStartDestination`] when a graph declares a start
/// id that is not one of its children.
pub fn find_start_destination<T: DestinationTree + ?Sized>(
    tree: &T,
    graph: DestinationId,
) -> Result<DestinationId, GraphError> {
    let mut current = graph;

    while let Some(start) = tree.start_destination(current) {
        if !tree.is_child_of(current, start) {
            return Err(GraphError::MissingStartDestination {
                graph: current,
                start,
            });
        }

        current = start;
    }

    Ok(current)
}
