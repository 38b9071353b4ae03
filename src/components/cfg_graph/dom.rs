//! Browser bindings: element lookup by id and SVG edge paths.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use super::render::{BlockElement, BlockLayout, EdgePath, PathCommand, Surface, to_svg_path};
use super::types::{EdgeStyle, Point, Size};
use crate::error::DrawError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Width of the arrow canvas next to a function's blocks.
pub const GRAPH_WIDTH: f64 = 100.0;

/// Id of the element rendering a block.
pub fn block_element_id(function: &str, label: &str) -> String {
	format!("block_{function}_{label}")
}

/// Id of the element holding a function's blocks.
pub fn container_element_id(function: &str) -> String {
	format!("blocks_{function}")
}

/// Id of the `<svg>` holding a function's arrows.
pub fn graph_element_id(function: &str) -> String {
	format!("blockgraph_{function}")
}

/// Current document, if running in a browser.
pub fn document() -> Option<Document> {
	web_sys::window().and_then(|w| w.document())
}

/// Best-effort description of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| "unknown DOM error".into())
}

impl BlockElement for Element {
	fn position(&self) -> Point {
		let rect = self.get_bounding_client_rect();
		Point::new(rect.left(), rect.top())
	}

	fn size(&self) -> Size {
		let rect = self.get_bounding_client_rect();
		Size {
			width: rect.width(),
			height: rect.height(),
		}
	}
}

/// Finds rendered blocks by their element ids.
pub struct DomLayout {
	document: Document,
}

impl DomLayout {
	/// Looks blocks up in `document`.
	pub fn new(document: Document) -> Self {
		Self { document }
	}
}

impl BlockLayout for DomLayout {
	type Element = Element;

	fn resolve_element(&self, function: &str, label: &str) -> Option<Element> {
		self.document
			.get_element_by_id(&block_element_id(function, label))
	}

	fn resolve_container(&self, function: &str) -> Option<Element> {
		self.document
			.get_element_by_id(&container_element_id(function))
	}
}

impl EdgePath for Element {
	fn set_opacity(&self, opacity: f64) {
		let _ = self.set_attribute("opacity", &opacity.to_string());
	}

	fn set_stroke(&self, color: &str) {
		let _ = self.set_attribute("stroke", color);
	}
}

/// Appends edges as `<path>` children of an `<svg>` element.
pub struct SvgSurface {
	document: Document,
	svg: Element,
}

impl SvgSurface {
	/// Draws into `svg`, creating elements with `document`.
	pub fn new(document: Document, svg: Element) -> Self {
		Self { document, svg }
	}

	/// Removes every previously drawn path.
	pub fn clear(&self) {
		self.svg.set_inner_html("");
	}
}

impl Surface for SvgSurface {
	type Path = Element;

	fn draw_path(&mut self, commands: &[PathCommand], style: &EdgeStyle) -> Result<Element, DrawError> {
		let surface_err = |e: JsValue| DrawError::Surface(js_message(&e));
		let path = self
			.document
			.create_element_ns(Some(SVG_NS), "path")
			.map_err(surface_err)?;
		for (name, value) in [
			("d", to_svg_path(commands)),
			("fill", "none".to_owned()),
			("stroke", style.stroke.clone()),
			("stroke-width", style.stroke_width.to_string()),
			("stroke-linejoin", style.line_join.clone()),
			("opacity", style.opacity.to_string()),
		] {
			path.set_attribute(name, &value).map_err(surface_err)?;
		}
		self.svg.append_child(&path).map_err(surface_err)?;
		Ok(path)
	}
}
