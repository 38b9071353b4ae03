use std::fmt::Write as _;

use log::{debug, warn};

use super::state::{EdgeHighlighter, EdgeIndex, HighlightConfig};
use super::types::{BlockKey, EdgeStyle, Point, Rect, Size};
use crate::error::{DrawError, LookupError};

/// A rendered element whose box can be read back.
pub trait BlockElement {
	/// Position of the element's top-left corner.
	fn position(&self) -> Point;
	/// Rendered width and height.
	fn size(&self) -> Size;
}

/// Resolves diagram elements that some external layout already placed.
pub trait BlockLayout {
	/// Element type handed back by the layout.
	type Element: BlockElement;

	/// The element rendering `label` in `function`'s diagram.
	fn resolve_element(&self, function: &str, label: &str) -> Option<Self::Element>;
	/// The element holding all of `function`'s blocks.
	fn resolve_container(&self, function: &str) -> Option<Self::Element>;
}

/// A drawn path that may be restyled after the fact.
pub trait EdgePath {
	/// Whether this handle accepts `set_opacity`/`set_stroke`.
	fn supports_restyle(&self) -> bool {
		true
	}
	/// Sets the path's opacity.
	fn set_opacity(&self, opacity: f64);
	/// Sets the path's stroke color.
	fn set_stroke(&self, color: &str);
}

/// Something paths can be drawn onto.
pub trait Surface {
	/// Handle to a drawn path. Cloned into the edge index.
	type Path: EdgePath + Clone;

	/// Draws `commands` with `style` and returns the new path.
	fn draw_path(&mut self, commands: &[PathCommand], style: &EdgeStyle)
	-> Result<Self::Path, DrawError>;
}

/// One segment of an edge outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
	/// Lift the pen and move.
	MoveTo(Point),
	/// Straight segment.
	LineTo(Point),
	/// Quadratic curve through `control` ending at `to`.
	QuadTo {
		/// Control point.
		control: Point,
		/// End point.
		to: Point,
	},
}

/// Renders commands as an SVG `d` attribute.
pub fn to_svg_path(commands: &[PathCommand]) -> String {
	let mut d = String::new();
	for cmd in commands {
		if !d.is_empty() {
			d.push(' ');
		}
		let _ = match cmd {
			PathCommand::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
			PathCommand::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
			PathCommand::QuadTo { control, to } => {
				write!(d, "Q {} {} {} {}", control.x, control.y, to.x, to.y)
			}
		};
	}
	d
}

/// Arrow geometry constants.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowConfig {
	/// Every edge is drawn on this single horizontal rail.
	pub rail_x: f64,
	/// Vertical distance between stacked edges leaving one block.
	pub stack_line_height: f64,
	/// Horizontal bow added per rank.
	pub rank_depth: f64,
	/// Rank added before scaling by `rank_depth`, so rank 0 still bows.
	pub base_rank: u32,
	/// Leg length of the chevron at the destination.
	pub arrowhead_size: f64,
	/// Quadratic curves when set, elbowed polylines otherwise.
	pub curved: bool,
	/// Style of freshly drawn edges.
	pub style: EdgeStyle,
}

impl Default for ArrowConfig {
	fn default() -> Self {
		Self {
			rail_x: 1.0,
			stack_line_height: 12.0,
			rank_depth: 5.0,
			base_rank: 3,
			arrowhead_size: 3.0,
			curved: true,
			style: EdgeStyle::default(),
		}
	}
}

/// Key points of one edge, in container coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// Where the edge leaves the source block.
	pub start: Point,
	/// Control point of the curve.
	pub control: Point,
	/// Where the edge enters the destination block.
	pub end: Point,
	/// How far right of the rail the edge bows.
	pub offset_x: f64,
	/// Height of the control point.
	pub mid_y: f64,
}

impl ArrowConfig {
	/// Computes the key points of an edge between two container-relative boxes.
	///
	/// Only the vertical placement of the boxes matters; both ends sit on
	/// the rail at `rail_x`.
	pub fn geometry(&self, source: Rect, dest: Rect, rank: u32, stack_offset: i32) -> EdgeGeometry {
		let start = Point::new(
			self.rail_x,
			source.bottom() + f64::from(stack_offset) * self.stack_line_height,
		);
		let end = Point::new(self.rail_x, dest.top());
		let offset_x = f64::from(self.base_rank + rank) * self.rank_depth;
		let mid_y = start.y + (end.y - start.y) / 2.0;

		EdgeGeometry {
			start,
			control: Point::new(start.x + offset_x, mid_y),
			end,
			offset_x,
			mid_y,
		}
	}

	/// Outline of an edge: the body followed by the chevron at `end`.
	pub fn commands(&self, g: &EdgeGeometry) -> Vec<PathCommand> {
		let mut cmds = vec![PathCommand::MoveTo(g.start)];
		if self.curved {
			cmds.push(PathCommand::QuadTo {
				control: g.control,
				to: g.end,
			});
		} else {
			cmds.extend([
				PathCommand::LineTo(g.start.offset(g.offset_x, 0.0)),
				PathCommand::LineTo(g.end.offset(g.offset_x, 0.0)),
				PathCommand::LineTo(g.end),
			]);
		}

		let a = self.arrowhead_size;
		cmds.extend([
			PathCommand::LineTo(g.end.offset(a, -a)),
			PathCommand::MoveTo(g.end),
			PathCommand::LineTo(g.end.offset(a, a)),
		]);
		cmds
	}
}

/// Parameters of one `draw_edge` call.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRequest {
	/// Function (diagram) namespace.
	pub function: String,
	/// Fans out parallel edges; higher ranks bow further right.
	pub rank: u32,
	/// Label of the block the edge leaves.
	pub source: String,
	/// Label of the block the edge enters.
	pub dest: String,
	/// Stack slot below the source block, in line heights.
	pub stack_offset: i32,
}

/// Draws edges between laid-out blocks and indexes them by endpoint.
#[derive(Clone, Debug, Default)]
pub struct ArrowRenderer {
	/// Geometry and style of drawn edges.
	pub config: ArrowConfig,
}

impl ArrowRenderer {
	/// Creates a renderer drawing with `config`.
	pub fn new(config: ArrowConfig) -> Self {
		Self { config }
	}

	/// A highlighter that restores edges to the style this renderer draws.
	pub fn highlighter(&self, config: HighlightConfig) -> EdgeHighlighter {
		EdgeHighlighter::new(config, self.config.style.clone())
	}

	/// Draws every request in order and returns the ones that failed.
	///
	/// A failed edge is logged and skipped; the rest are still drawn.
	pub fn draw_all<'a, S, L>(
		&self,
		surface: &mut S,
		layout: &L,
		index: &mut EdgeIndex<S::Path>,
		requests: impl IntoIterator<Item = &'a EdgeRequest>,
	) -> Vec<DrawError>
	where
		S: Surface,
		L: BlockLayout,
	{
		let mut failed = Vec::new();
		for req in requests {
			if let Err(e) = self.draw_edge(surface, layout, index, req) {
				warn!(
					"{}: skipped arrow {} -> {}: {e}",
					req.function, req.source, req.dest
				);
				failed.push(e);
			}
		}
		failed
	}

	/// Draws one edge and registers it under its source and destination.
	///
	/// All three elements are resolved before anything is drawn, so a
	/// failed lookup leaves both `surface` and `index` untouched.
	pub fn draw_edge<S, L>(
		&self,
		surface: &mut S,
		layout: &L,
		index: &mut EdgeIndex<S::Path>,
		req: &EdgeRequest,
	) -> Result<S::Path, DrawError>
	where
		S: Surface,
		L: BlockLayout,
	{
		let block = |label: &str| {
			layout
				.resolve_element(&req.function, label)
				.ok_or_else(|| LookupError::Block {
					function: req.function.clone(),
					label: label.to_owned(),
				})
		};
		let source = block(&req.source)?;
		let dest = block(&req.dest)?;
		let container = layout
			.resolve_container(&req.function)
			.ok_or_else(|| LookupError::Container {
				function: req.function.clone(),
			})?;

		let origin_y = container.position().y;
		let relative = |el: &L::Element| Rect {
			origin: Point::new(self.config.rail_x, el.position().y - origin_y),
			size: el.size(),
		};
		let geometry = self.config.geometry(
			relative(&source),
			relative(&dest),
			req.rank,
			req.stack_offset,
		);
		let path = surface.draw_path(&self.config.commands(&geometry), &self.config.style)?;

		let from = BlockKey::new(&req.function, &req.source);
		let to = BlockKey::new(&req.function, &req.dest);
		debug!("edge {from} -> {to} rank {} offset {}", req.rank, req.stack_offset);
		index.register(from, to, path.clone());
		Ok(path)
	}
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};

	use super::*;
	use crate::components::cfg_graph::testing::{FailingSurface, FakeLayout, RecordingSurface};

	fn request(rank: u32, source: &str, dest: &str, stack_offset: i32) -> EdgeRequest {
		EdgeRequest {
			function: "main".into(),
			rank,
			source: source.into(),
			dest: dest.into(),
			stack_offset,
		}
	}

	fn rect(y: f64, height: f64) -> Rect {
		Rect {
			origin: Point::new(0.0, y),
			size: Size {
				width: 80.0,
				height,
			},
		}
	}

	#[fixture]
	fn layout() -> FakeLayout {
		FakeLayout::new("main", 40.0)
			.block("main", "a", 0.0, 140.0, 20.0)
			.block("main", "b", 0.0, 240.0, 20.0)
			.block("main", "c", 0.0, 300.0, 40.0)
	}

	#[test]
	fn geometry_matches_reference_scenario() {
		let g = ArrowConfig::default().geometry(rect(100.0, 20.0), rect(200.0, 20.0), 0, 0);
		assert_eq!(g.start, Point::new(1.0, 120.0));
		assert_eq!(g.offset_x, 15.0);
		assert_eq!(g.mid_y, 160.0);
		assert_eq!(g.control, Point::new(16.0, 160.0));
		assert_eq!(g.end, Point::new(1.0, 200.0));
	}

	#[rstest]
	#[case(0, 1)]
	#[case(1, 2)]
	#[case(3, 10)]
	fn higher_rank_bows_further(#[case] low: u32, #[case] high: u32) {
		let cfg = ArrowConfig::default();
		let a = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), low, 0);
		let b = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), high, 0);
		assert!(b.offset_x > a.offset_x);
		assert!(b.control.x > a.control.x);
	}

	#[rstest]
	#[case(-2, -1)]
	#[case(0, 1)]
	#[case(1, 4)]
	fn stack_offsets_push_start_down(#[case] low: i32, #[case] high: i32) {
		let cfg = ArrowConfig::default();
		let a = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), 0, low);
		let b = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), 0, high);
		assert!(b.start.y > a.start.y);
		assert_eq!(b.start.y - a.start.y, f64::from(high - low) * 12.0);
	}

	#[test]
	fn midpoint_includes_stack_offset() {
		let g = ArrowConfig::default().geometry(rect(100.0, 20.0), rect(200.0, 20.0), 0, -1);
		assert_eq!(g.start.y, 108.0);
		assert_eq!(g.mid_y, 154.0);
	}

	#[test]
	fn curved_outline_ends_in_chevron() {
		let cfg = ArrowConfig::default();
		let g = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), 0, 0);
		assert_eq!(
			to_svg_path(&cfg.commands(&g)),
			"M 1 120 Q 16 160 1 200 L 4 197 M 1 200 L 4 203"
		);
	}

	#[test]
	fn elbowed_outline_detours_through_rank_column() {
		let cfg = ArrowConfig {
			curved: false,
			..ArrowConfig::default()
		};
		let g = cfg.geometry(rect(100.0, 20.0), rect(200.0, 20.0), 1, 0);
		assert_eq!(
			cfg.commands(&g)[..4],
			[
				PathCommand::MoveTo(Point::new(1.0, 120.0)),
				PathCommand::LineTo(Point::new(21.0, 120.0)),
				PathCommand::LineTo(Point::new(21.0, 200.0)),
				PathCommand::LineTo(Point::new(1.0, 200.0)),
			]
		);
	}

	#[rstest]
	fn draw_edge_uses_container_relative_positions(layout: FakeLayout) {
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let path = ArrowRenderer::default()
			.draw_edge(&mut surface, &layout, &mut index, &request(0, "a", "b", 0))
			.unwrap();

		let drawn = path.borrow();
		assert_eq!(drawn.commands[0], PathCommand::MoveTo(Point::new(1.0, 120.0)));
		assert_eq!(
			drawn.commands[1],
			PathCommand::QuadTo {
				control: Point::new(16.0, 160.0),
				to: Point::new(1.0, 200.0),
			}
		);
		assert_eq!(drawn.style, EdgeStyle::default());
	}

	#[rstest]
	fn draw_edge_registers_once_per_direction(layout: FakeLayout) {
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let renderer = ArrowRenderer::default();
		for req in [request(0, "a", "b", 0), request(1, "a", "c", -1), request(0, "b", "c", 0)] {
			renderer.draw_edge(&mut surface, &layout, &mut index, &req).unwrap();
		}

		assert_eq!(index.edge_count(), 3);
		assert_eq!(index.outgoing("main", "a").len(), 2);
		assert_eq!(index.outgoing("main", "b").len(), 1);
		assert!(index.outgoing("main", "c").is_empty());
		assert_eq!(index.incoming("main", "c").len(), 2);
		assert_eq!(index.incoming("main", "b").len(), 1);
		assert!(index.incoming("main", "a").is_empty());
	}

	#[rstest]
	#[case(request(0, "a", "missing", 0), LookupError::Block { function: "main".into(), label: "missing".into() })]
	#[case(request(0, "ghost", "b", 0), LookupError::Block { function: "main".into(), label: "ghost".into() })]
	fn missing_block_fails_without_side_effects(
		layout: FakeLayout,
		#[case] req: EdgeRequest,
		#[case] expected: LookupError,
	) {
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let err = ArrowRenderer::default()
			.draw_edge(&mut surface, &layout, &mut index, &req)
			.unwrap_err();

		assert_eq!(err, DrawError::Lookup(expected));
		assert!(index.is_empty());
		assert!(surface.paths.is_empty());
	}

	#[test]
	fn missing_container_is_a_lookup_error() {
		let layout = FakeLayout::without_container().block("main", "a", 0.0, 0.0, 10.0);
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let err = ArrowRenderer::default()
			.draw_edge(&mut surface, &layout, &mut index, &request(0, "a", "a", 0))
			.unwrap_err();

		assert!(matches!(err, DrawError::Lookup(LookupError::Container { .. })));
		assert!(index.is_empty());
	}

	#[rstest]
	fn failing_surface_leaves_index_unchanged(layout: FakeLayout) {
		let mut index = EdgeIndex::new();
		let err = ArrowRenderer::default()
			.draw_edge(&mut FailingSurface, &layout, &mut index, &request(0, "a", "b", 0))
			.unwrap_err();

		assert!(matches!(err, DrawError::Surface(_)));
		assert!(index.is_empty());
		assert!(index.outgoing("main", "a").is_empty());
	}

	#[rstest]
	fn draw_all_keeps_going_past_a_missing_block(layout: FakeLayout) {
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let requests = [
			request(0, "a", "b", 0),
			request(0, "a", "ghost", -1),
			request(0, "b", "c", 0),
		];
		let failed = ArrowRenderer::default().draw_all(&mut surface, &layout, &mut index, &requests);

		assert_eq!(
			failed,
			vec![DrawError::Lookup(LookupError::Block {
				function: "main".into(),
				label: "ghost".into(),
			})]
		);
		assert_eq!(index.edge_count(), 2);
		assert_eq!(index.outgoing("main", "a").len(), 1);
		assert_eq!(index.outgoing("main", "b").len(), 1);
		assert_eq!(index.incoming("main", "c").len(), 1);
		assert_eq!(surface.paths.len(), 2);
	}

	#[rstest]
	fn draw_all_reports_every_failure(layout: FakeLayout) {
		let mut index = EdgeIndex::new();
		let requests = [request(0, "a", "b", 0), request(0, "b", "c", 0)];
		let failed =
			ArrowRenderer::default().draw_all(&mut FailingSurface, &layout, &mut index, &requests);

		assert_eq!(failed.len(), 2);
		assert!(index.is_empty());
	}

	#[rstest]
	fn unhighlight_restores_the_drawn_style(layout: FakeLayout) {
		let renderer = ArrowRenderer::new(ArrowConfig {
			style: EdgeStyle {
				stroke: "gray".into(),
				opacity: 0.3,
				..EdgeStyle::default()
			},
			..ArrowConfig::default()
		});
		let highlighter = renderer.highlighter(HighlightConfig::default());
		let mut surface = RecordingSurface::default();
		let mut index = EdgeIndex::new();
		let path = renderer
			.draw_edge(&mut surface, &layout, &mut index, &request(0, "a", "b", 0))
			.unwrap();
		let style = || {
			let p = path.borrow();
			(p.style.opacity, p.style.stroke.clone())
		};
		let before = style();

		highlighter.highlight(&index, "main", "a");
		assert_eq!(style(), (1.0, "blue".to_owned()));
		highlighter.unhighlight(&index, "main", "a");
		assert_eq!(style(), before);
		assert_eq!(before, (0.3, "gray".to_owned()));
	}
}
