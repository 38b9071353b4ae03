//! In-memory layout and surface for host tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::render::{BlockElement, BlockLayout, EdgePath, PathCommand, Surface};
use super::types::{BlockKey, EdgeStyle, Point, Size};
use crate::error::DrawError;

#[derive(Clone, Copy, Debug)]
pub struct FakeElement {
	pub position: Point,
	pub size: Size,
}

impl BlockElement for FakeElement {
	fn position(&self) -> Point {
		self.position
	}

	fn size(&self) -> Size {
		self.size
	}
}

/// Blocks placed by hand, plus one container shared by every function.
#[derive(Clone, Debug, Default)]
pub struct FakeLayout {
	blocks: HashMap<BlockKey, FakeElement>,
	containers: HashMap<String, FakeElement>,
}

impl FakeLayout {
	pub fn new(function: &str, container_y: f64) -> Self {
		Self::default().container(function, container_y)
	}

	pub fn without_container() -> Self {
		Self::default()
	}

	pub fn container(mut self, function: &str, y: f64) -> Self {
		self.containers.insert(
			function.to_owned(),
			FakeElement {
				position: Point::new(0.0, y),
				size: Size {
					width: 200.0,
					height: 1000.0,
				},
			},
		);
		self
	}

	pub fn block(mut self, function: &str, label: &str, x: f64, y: f64, height: f64) -> Self {
		self.blocks.insert(
			BlockKey::new(function, label),
			FakeElement {
				position: Point::new(x, y),
				size: Size {
					width: 80.0,
					height,
				},
			},
		);
		self
	}
}

impl BlockLayout for FakeLayout {
	type Element = FakeElement;

	fn resolve_element(&self, function: &str, label: &str) -> Option<FakeElement> {
		self.blocks.get(&BlockKey::new(function, label)).copied()
	}

	fn resolve_container(&self, function: &str) -> Option<FakeElement> {
		self.containers.get(function).copied()
	}
}

#[derive(Clone, Debug)]
pub struct RecordedPath {
	pub commands: Vec<PathCommand>,
	pub style: EdgeStyle,
	/// Refuses restyling, like a handle without attribute access.
	pub frozen: bool,
}

impl RecordedPath {
	pub fn shared(style: EdgeStyle) -> Rc<RefCell<Self>> {
		Rc::new(RefCell::new(Self {
			commands: Vec::new(),
			style,
			frozen: false,
		}))
	}
}

impl EdgePath for Rc<RefCell<RecordedPath>> {
	fn supports_restyle(&self) -> bool {
		!self.borrow().frozen
	}

	fn set_opacity(&self, opacity: f64) {
		self.borrow_mut().style.opacity = opacity;
	}

	fn set_stroke(&self, color: &str) {
		self.borrow_mut().style.stroke = color.to_owned();
	}
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub paths: Vec<Rc<RefCell<RecordedPath>>>,
}

impl Surface for RecordingSurface {
	type Path = Rc<RefCell<RecordedPath>>;

	fn draw_path(&mut self, commands: &[PathCommand], style: &EdgeStyle) -> Result<Self::Path, DrawError> {
		let path = RecordedPath::shared(style.clone());
		path.borrow_mut().commands = commands.to_vec();
		self.paths.push(path.clone());
		Ok(path)
	}
}

/// Refuses every path.
#[derive(Debug, Default)]
pub struct FailingSurface;

impl Surface for FailingSurface {
	type Path = Rc<RefCell<RecordedPath>>;

	fn draw_path(&mut self, _: &[PathCommand], _: &EdgeStyle) -> Result<Self::Path, DrawError> {
		Err(DrawError::Surface("canvas detached".into()))
	}
}
