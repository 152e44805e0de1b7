/// Enum representing the type of edge in a graph.
///
/// `Real` edges stand for edges of the input graph, `Virtual` edges only
/// exist inside wheel graphs that replace already tested clusters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeLabel {
    Real,
    Virtual,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Real => write!(f, "Real"),
            EdgeLabel::Virtual => write!(f, "Virtual"),
        }
    }
}

/// Wrapper for petgraph's graph type.
pub type UnGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;

/// Terminal classification of a c-planarity run.
///
/// At most one of the failure codes is set per run, by the first check that fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum ErrorCode {
    #[default]
    None,
    /// The underlying graph is not connected.
    NonConnected,
    /// Some cluster induces a disconnected subgraph.
    NonCConnected,
    /// The underlying graph is not planar, regardless of the clustering.
    NonPlanar,
    /// The underlying graph is planar, but no embedding respects the clusters.
    NonCPlanar,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::None => write!(f, "none"),
            ErrorCode::NonConnected => write!(f, "graph is not connected"),
            ErrorCode::NonCConnected => write!(f, "cluster graph is not c-connected"),
            ErrorCode::NonPlanar => write!(f, "graph is not planar"),
            ErrorCode::NonCPlanar => write!(f, "graph is planar but not c-planar"),
        }
    }
}
