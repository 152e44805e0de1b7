// #![warn(missing_docs)]

//! # cluster_planarity
//!
//! C-planarity testing of c-connected clustered graphs, following
//! Cohen, Feng and Eades: clusters are tested bottom-up with a PQ-tree based
//! planarity test and each tested cluster is replaced by a wheel graph that keeps
//! exactly the orders of its boundary edges that are still possible.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! ```
//! use cluster_planarity::{ClusterGraph, EdgeLabel, UnGraph, is_cluster_planar};
//!
//! let mut g = UnGraph::new_undirected();
//! let v: Vec<_> = (0..5).map(|i| g.add_node(i)).collect();
//! for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)] {
//!     g.add_edge(v[a], v[b], EdgeLabel::Real);
//! }
//! let mut cg = ClusterGraph::new(g);
//! cg.create_cluster(cg.root(), &[v[0], v[1], v[2]]).unwrap();
//! assert!(is_cluster_planar(&cg));
//! ```

pub mod block_cut;
pub mod cluster_graph;
pub mod cluster_planarity;
pub mod connectivity;
pub mod flat_planarity;
pub mod pq_tree;
pub mod st_numbering;
pub mod types;

pub(crate) mod cluster_blocks;
pub(crate) mod flat_planarity_blocks;
pub(crate) mod pq_blocks;

#[cfg(test)]
pub(crate) mod testing;

pub use cluster_graph::{ClusterGraph, ClusterGraphError, ClusterId};
pub use cluster_planarity::{ClusterPlanarityTest, is_cluster_planar, is_cluster_planar_destructive};
pub use types::EdgeLabel;
pub use types::ErrorCode;
pub use types::UnGraph;
