pub(crate) mod structures;
pub(crate) mod templates;
