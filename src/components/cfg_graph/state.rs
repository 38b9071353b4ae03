use std::collections::HashMap;

use log::debug;

use super::render::EdgePath;
use super::types::{BlockKey, EdgeStyle};

/// Edges of one rendered diagram, bucketed by source and by destination.
///
/// Buckets only grow while a diagram is drawn; the whole index is cleared
/// before the next diagram is drawn into it.
#[derive(Clone, Debug)]
pub struct EdgeIndex<P> {
	outgoing: HashMap<BlockKey, Vec<P>>,
	incoming: HashMap<BlockKey, Vec<P>>,
	edges: usize,
}

impl<P> Default for EdgeIndex<P> {
	fn default() -> Self {
		Self {
			outgoing: HashMap::new(),
			incoming: HashMap::new(),
			edges: 0,
		}
	}
}

impl<P: Clone> EdgeIndex<P> {
	/// An index with no edges.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `path` as leaving `source` and entering `dest`.
	pub fn register(&mut self, source: BlockKey, dest: BlockKey, path: P) {
		self.outgoing.entry(source).or_default().push(path.clone());
		self.incoming.entry(dest).or_default().push(path);
		self.edges += 1;
	}
}

impl<P> EdgeIndex<P> {
	/// Edges leaving a block, in drawing order. Empty for unknown blocks.
	pub fn outgoing(&self, function: &str, label: &str) -> &[P] {
		Self::bucket(&self.outgoing, function, label)
	}

	/// Edges entering a block, in drawing order. Empty for unknown blocks.
	pub fn incoming(&self, function: &str, label: &str) -> &[P] {
		Self::bucket(&self.incoming, function, label)
	}

	fn bucket<'a>(map: &'a HashMap<BlockKey, Vec<P>>, function: &str, label: &str) -> &'a [P] {
		map.get(&BlockKey::new(function, label))
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Number of registered edges.
	pub fn edge_count(&self) -> usize {
		self.edges
	}

	/// Whether no edge has been registered since the last clear.
	pub fn is_empty(&self) -> bool {
		self.edges == 0
	}

	/// Forgets every edge, ready for the next diagram.
	pub fn clear(&mut self) {
		self.outgoing.clear();
		self.incoming.clear();
		self.edges = 0;
	}
}

/// Colors and opacity used on hover.
///
/// The resting style edges return to is the one they were drawn with; see
/// [`EdgeHighlighter::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightConfig {
	/// Opacity of highlighted edges.
	pub highlight_opacity: f64,
	/// Color for edges entering the hovered block.
	pub incoming_color: String,
	/// Color for edges leaving the hovered block.
	pub outgoing_color: String,
	/// Also restyle edges entering the hovered block. Off by default, so
	/// only a block's successors light up.
	pub enable_incoming_highlight: bool,
}

impl Default for HighlightConfig {
	fn default() -> Self {
		Self {
			highlight_opacity: 1.0,
			incoming_color: "green".into(),
			outgoing_color: "blue".into(),
			enable_incoming_highlight: false,
		}
	}
}

/// Restyles the indexed edges of a hovered block.
#[derive(Clone, Debug, Default)]
pub struct EdgeHighlighter {
	/// Hover colors and opacity.
	pub config: HighlightConfig,
	/// Style the edges were drawn with, restored by `unhighlight`.
	pub resting: EdgeStyle,
}

impl EdgeHighlighter {
	/// Creates a highlighter for edges drawn with `resting`.
	pub fn new(config: HighlightConfig, resting: EdgeStyle) -> Self {
		Self { config, resting }
	}

	/// Sets opacity and stroke on the edges around one block, returning how
	/// many edges were restyled. Blocks without edges are left alone.
	pub fn set_edge_style<P: EdgePath>(
		&self,
		index: &EdgeIndex<P>,
		function: &str,
		label: &str,
		opacity: f64,
		incoming_color: &str,
		outgoing_color: &str,
	) -> usize {
		let mut restyled = 0;
		if self.config.enable_incoming_highlight {
			restyled += restyle(index.incoming(function, label), opacity, incoming_color);
		}
		restyled += restyle(index.outgoing(function, label), opacity, outgoing_color);
		restyled
	}

	/// Lights up the edges leaving a block.
	pub fn highlight<P: EdgePath>(&self, index: &EdgeIndex<P>, function: &str, label: &str) -> usize {
		let cfg = &self.config;
		let n = self.set_edge_style(
			index,
			function,
			label,
			cfg.highlight_opacity,
			&cfg.incoming_color,
			&cfg.outgoing_color,
		);
		debug!("highlighted {n} edges around {function}:{label}");
		n
	}

	/// Returns the edges around a block to their resting style.
	pub fn unhighlight<P: EdgePath>(&self, index: &EdgeIndex<P>, function: &str, label: &str) -> usize {
		let rest = &self.resting;
		self.set_edge_style(index, function, label, rest.opacity, &rest.stroke, &rest.stroke)
	}
}

fn restyle<P: EdgePath>(paths: &[P], opacity: f64, color: &str) -> usize {
	let mut n = 0;
	for p in paths.iter().filter(|p| p.supports_restyle()) {
		p.set_opacity(opacity);
		p.set_stroke(color);
		n += 1;
	}
	n
}
