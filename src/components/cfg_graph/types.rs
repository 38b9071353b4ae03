use std::fmt;

/// A position on the arrow canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Returns this point shifted by `(dx, dy)`.
	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// Rendered extent of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

/// A laid-out block, relative to its diagram container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Top-left corner.
	pub origin: Point,
	/// Width and height.
	pub size: Size,
}

impl Rect {
	/// Vertical coordinate of the top edge.
	pub fn top(&self) -> f64 {
		self.origin.y
	}

	/// Vertical coordinate of the bottom edge.
	pub fn bottom(&self) -> f64 {
		self.origin.y + self.size.height
	}
}

/// Identifies a block within one function's diagram.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
	/// Function (diagram) namespace.
	pub function: String,
	/// Block label within the function.
	pub label: String,
}

impl BlockKey {
	/// Creates a key from a function name and block label.
	pub fn new(function: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			function: function.into(),
			label: label.into(),
		}
	}
}

impl fmt::Display for BlockKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.function, self.label)
	}
}

/// Stroke attributes of a drawn edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Stroke color.
	pub stroke: String,
	/// Stroke width.
	pub stroke_width: f64,
	/// SVG `stroke-linejoin` value.
	pub line_join: String,
	/// Opacity in `0.0..=1.0`.
	pub opacity: f64,
}

/// Edges are faint until their block is hovered.
pub const DEFAULT_EDGE_OPACITY: f64 = 0.1;
/// Stroke of edges that are not highlighted.
pub const DEFAULT_EDGE_COLOR: &str = "black";

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			stroke: DEFAULT_EDGE_COLOR.into(),
			stroke_width: 2.0,
			line_join: "round".into(),
			opacity: DEFAULT_EDGE_OPACITY,
		}
	}
}

/// How control leaves a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// Fallthrough or unconditional jump.
	Basic,
	/// Taken branch of a condition.
	IfThen,
	/// Not-taken branch of a condition.
	IfElse,
	/// Exceptional control flow.
	Exception,
	/// One case of a switch.
	SwitchCase,
	/// Default target of a switch.
	SwitchDefault,
}

impl EdgeKind {
	/// Branch edges that come from a condition or switch statement.
	pub fn is_structured(self) -> bool {
		matches!(
			self,
			Self::IfThen | Self::IfElse | Self::SwitchCase | Self::SwitchDefault
		)
	}
}

/// A control-flow edge leaving a block.
#[derive(Clone, Debug, PartialEq)]
pub struct CfgEdge {
	/// Label of the block control goes to.
	pub target: String,
	/// How control gets there.
	pub kind: EdgeKind,
}

/// A basic block as shown in the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct CfgBlock {
	/// Label, unique within the function.
	pub label: String,
	/// Source lines shown inside the block.
	pub lines: Vec<String>,
	/// Successors, in the order they are drawn.
	pub out_edges: Vec<CfgEdge>,
}

impl CfgBlock {
	/// An empty block.
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			lines: Vec::new(),
			out_edges: Vec::new(),
		}
	}

	/// Appends a source line.
	pub fn line(mut self, line: impl Into<String>) -> Self {
		self.lines.push(line.into());
		self
	}

	/// Appends a successor.
	pub fn edge(mut self, target: impl Into<String>, kind: EdgeKind) -> Self {
		self.out_edges.push(CfgEdge {
			target: target.into(),
			kind,
		});
		self
	}
}

/// One function's control-flow graph, blocks in natural source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CfgFunction {
	/// Function name, also the diagram namespace.
	pub name: String,
	/// Blocks in source order.
	pub blocks: Vec<CfgBlock>,
}
