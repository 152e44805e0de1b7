pub(crate) mod lr;
pub(crate) mod orientation;
pub(crate) mod structures;
