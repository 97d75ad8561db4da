use crate::error::{MappingError, Result};
use crate::metadata::{ClassMetadataReader, internal_name};
use crate::model::NameRecord;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Parent -> child links between records of one table.
///
/// Node weights are positions in the record slice the graph was built from;
/// the graph never owns or points into the records themselves. Only
/// supertypes that are records too are linked, so a class extending a
/// library type is a root here.
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    topology: DiGraph<usize, ()>,
    index: HashMap<String, NodeIndex>,
}

impl InheritanceGraph {
    pub fn build(records: &[NameRecord], reader: &dyn ClassMetadataReader) -> Result<Self> {
        let mut graph = Self::default();
        for (position, record) in records.iter().enumerate() {
            let node = graph.topology.add_node(position);
            graph.index.insert(record.origin_name.clone(), node);
        }

        let mut external = 0usize;
        for record in records {
            let metadata = reader
                .read_class(&record.origin_name)?
                .ok_or_else(|| MappingError::missing_class(&record.origin_name))?;

            let child = graph.index[&record.origin_name];
            for supertype in metadata.supertypes() {
                match graph.index.get(&internal_name(supertype)) {
                    Some(&parent) if parent != child => {
                        if !graph.topology.contains_edge(parent, child) {
                            graph.topology.add_edge(parent, child, ());
                        }
                    }
                    Some(_) => {}
                    None => external += 1,
                }
            }
        }

        tracing::info!(
            "Linked {} classes with {} inheritance edges ({} external supertypes left unlinked)",
            graph.topology.node_count(),
            graph.topology.edge_count(),
            external
        );
        Ok(graph)
    }

    pub fn node(&self, origin_name: &str) -> Option<NodeIndex> {
        self.index.get(origin_name).copied()
    }

    /// Position of the node's record in the slice the graph was built from.
    pub fn position(&self, node: NodeIndex) -> usize {
        self.topology[node]
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.topology.node_indices()
    }

    pub fn is_root(&self, node: NodeIndex) -> bool {
        self.topology
            .neighbors_directed(node, Direction::Incoming)
            .next()
            .is_none()
    }

    /// Parents in declaration order: superclass first, then interfaces.
    pub fn parents(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .topology
            .edges_directed(node, Direction::Incoming)
            .map(|edge| (edge.id(), edge.source()))
            .collect();
        // Edge ids grow with insertion, and a child's edges are inserted in declaration order
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, parent)| parent).collect()
    }

    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<_> = self
            .topology
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        children.sort();
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ClassMetadata, MemoryClassReader};

    fn class(super_name: Option<&str>, interfaces: &[&str]) -> ClassMetadata {
        ClassMetadata {
            super_name: super_name.map(str::to_string),
            interfaces: interfaces.iter().map(|i| i.to_string()).collect(),
            fields: vec![],
        }
    }

    fn records(names: &[&str]) -> Vec<NameRecord> {
        names
            .iter()
            .map(|n| NameRecord::new(*n, format!("pkg/{n}")))
            .collect()
    }

    #[test]
    fn test_links_only_mapped_supertypes() {
        let reader = MemoryClassReader::new()
            .with_class("a", class(Some("java/lang/Object"), &[]))
            .with_class("b", class(Some("a"), &["i", "java/lang/Runnable"]))
            .with_class("i", class(Some("java/lang/Object"), &[]));
        let recs = records(&["a", "b", "i"]);

        let graph = InheritanceGraph::build(&recs, &reader).unwrap();
        let a = graph.node("a").unwrap();
        let b = graph.node("b").unwrap();
        let i = graph.node("i").unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_root(a));
        assert!(graph.is_root(i));
        assert!(!graph.is_root(b));
        assert_eq!(graph.parents(b), vec![a, i]);
        assert_eq!(graph.children(a), vec![b]);
        assert_eq!(recs[graph.position(b)].origin_name, "b");
    }

    #[test]
    fn test_parent_order_follows_declaration_not_insertion_of_nodes() {
        // Interfaces sort before the superclass by name, precedence must still favour the superclass
        let reader = MemoryClassReader::new()
            .with_class("a", class(None, &[]))
            .with_class("z", class(None, &[]))
            .with_class("c", class(Some("z"), &["a"]));
        let recs = records(&["a", "c", "z"]);

        let graph = InheritanceGraph::build(&recs, &reader).unwrap();
        let c = graph.node("c").unwrap();
        assert_eq!(
            graph.parents(c),
            vec![graph.node("z").unwrap(), graph.node("a").unwrap()]
        );
    }

    #[test]
    fn test_dotted_supertype_names_are_normalised() {
        let reader = MemoryClassReader::new()
            .with_class("pkg/A", class(None, &[]))
            .with_class("pkg/B", class(Some("pkg.A"), &[]));
        let recs = records(&["pkg/A", "pkg/B"]);

        let graph = InheritanceGraph::build(&recs, &reader).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_missing_class_metadata_is_fatal() {
        let reader = MemoryClassReader::new().with_class("a", class(None, &[]));
        let recs = records(&["a", "ghost"]);

        let err = InheritanceGraph::build(&recs, &reader).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingMetadata { ref class, member: None } if class == "ghost"
        ));
    }
}
