//! Basic graph representations.

pub mod adjacency_graph;

pub use adjacency_graph::AdjacencyGraph;
