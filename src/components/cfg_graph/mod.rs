//! Control-flow arrows between laid-out basic blocks, with hover highlighting.

mod component;
pub mod dom;
mod layout;
mod render;
mod state;
#[cfg(test)]
mod testing;
mod types;

pub use component::CfgGraph;
pub use layout::plan_arrows;
pub use render::{
	ArrowConfig, ArrowRenderer, BlockElement, BlockLayout, EdgeGeometry, EdgePath, EdgeRequest,
	PathCommand, Surface, to_svg_path,
};
pub use state::{EdgeHighlighter, EdgeIndex, HighlightConfig};
pub use types::{
	BlockKey, CfgBlock, CfgEdge, CfgFunction, DEFAULT_EDGE_COLOR, DEFAULT_EDGE_OPACITY, EdgeKind,
	EdgeStyle, Point, Rect, Size,
};
