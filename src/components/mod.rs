//! Viewer components.

pub mod cfg_graph;
pub mod fold;
