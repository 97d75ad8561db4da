//! Inheritance graph and name propagation.

pub mod graph;
pub mod propagate;

pub use graph::InheritanceGraph;
pub use propagate::{PropagationStats, propagate};
