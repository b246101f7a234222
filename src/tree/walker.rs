//! Traversal of the finished generation tree

use crate::error::GenError;
use crate::tree::node::{NodeId, NodeRegistry};
use std::collections::VecDeque;

/// Visit every node reachable from every registry root exactly once.
///
/// Breadth-first with a deterministic sibling order (children maps are
/// ordered by key). The visitor runs for a node before any of its children
/// are enqueued; nodes without entries are still visited. A visitor error
/// aborts the walk immediately.
pub fn walk<F>(registry: &NodeRegistry, mut visit: F) -> Result<(), GenError>
where
    F: FnMut(&NodeRegistry, NodeId) -> Result<(), GenError>,
{
    let mut queue: VecDeque<NodeId> = registry.roots().collect();
    while let Some(node_id) = queue.pop_front() {
        visit(registry, node_id)?;
        queue.extend(registry.node(node_id).children.values().copied());
    }
    Ok(())
}
