pub(crate) mod parallel_edges;
pub(crate) mod structures;
pub(crate) mod wheel;
