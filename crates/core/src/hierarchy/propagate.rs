use super::graph::InheritanceGraph;
use crate::model::NameRecord;
use std::collections::VecDeque;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropagationStats {
    pub roots: usize,
    pub processed: usize,
    pub inherited_methods: usize,
    pub inherited_fields: usize,
    /// Origin names of classes never reached, i.e. sitting on an inheritance cycle.
    pub unreachable: Vec<String>,
}

/// Copies inherited member names down the graph.
///
/// Nodes are processed breadth-first from the roots (in node order) and a
/// node is only processed once every parent is final, so a child sees the
/// complete set of names each ancestor ends up with. Entries are inserted if
/// absent: a name the child declares itself is never replaced. When two
/// parents carry different names for the same member, the superclass wins,
/// then interfaces in declaration order.
///
/// `records` must be the slice `graph` was built from.
pub fn propagate(records: &mut [NameRecord], graph: &InheritanceGraph) -> PropagationStats {
    let mut stats = PropagationStats::default();
    let mut pending: Vec<usize> = vec![0; graph.node_count()];
    let mut queue = VecDeque::new();

    for node in graph.nodes() {
        pending[node.index()] = graph.parents(node).len();
        if pending[node.index()] == 0 {
            queue.push_back(node);
        }
    }
    stats.roots = queue.len();

    while let Some(node) = queue.pop_front() {
        let child = graph.position(node);
        for parent in graph.parents(node) {
            let (from, to) = pair_mut(records, graph.position(parent), child);
            let (methods, fields) = inherit(from, to);
            stats.inherited_methods += methods;
            stats.inherited_fields += fields;
        }
        stats.processed += 1;

        for next in graph.children(node) {
            let remaining = &mut pending[next.index()];
            *remaining -= 1;
            if *remaining == 0 {
                queue.push_back(next);
            }
        }
    }

    if stats.processed < graph.node_count() {
        stats.unreachable = graph
            .nodes()
            .filter(|node| pending[node.index()] > 0)
            .map(|node| records[graph.position(node)].origin_name.clone())
            .collect();
        tracing::warn!(
            "{} classes sit on an inheritance cycle and inherit nothing: {:?}",
            stats.unreachable.len(),
            stats.unreachable
        );
    }

    tracing::info!(
        "Propagated {} method and {} field names from {} roots through {} classes",
        stats.inherited_methods,
        stats.inherited_fields,
        stats.roots,
        stats.processed
    );
    stats
}

fn inherit(parent: &NameRecord, child: &mut NameRecord) -> (usize, usize) {
    let mut methods = 0;
    for (key, name) in &parent.methods {
        if !child.methods.contains_key(key) {
            child.methods.insert(key.clone(), name.clone());
            methods += 1;
        }
    }

    let mut fields = 0;
    for (key, name) in &parent.fields {
        if !child.fields.contains_key(key) {
            child.fields.insert(key.clone(), name.clone());
            fields += 1;
        }
    }
    (methods, fields)
}

fn pair_mut<T>(items: &mut [T], shared: usize, exclusive: usize) -> (&T, &mut T) {
    assert_ne!(shared, exclusive, "a class cannot inherit from itself");
    if shared < exclusive {
        let (head, tail) = items.split_at_mut(exclusive);
        (&head[shared], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(shared);
        (&tail[0], &mut head[exclusive])
    }
}
