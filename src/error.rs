//! Error types shared by the arrow renderer and the fold toggle.

use thiserror::Error;

/// A diagram element that should have been rendered could not be found.
///
/// This always means the diagram model and the rendered page disagree, so it
/// is surfaced to the caller rather than skipped silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
	/// No block element for this function and label.
	#[error("no block `{label}` in function `{function}`")]
	Block {
		/// Function (diagram) namespace.
		function: String,
		/// Block label within the function.
		label: String,
	},

	/// No block container for this function.
	#[error("no block container for function `{function}`")]
	Container {
		/// Function (diagram) namespace.
		function: String,
	},

	/// No element with this id.
	#[error("Cannot find {id}")]
	Element {
		/// Element id that was looked up.
		id: String,
	},
}

/// Errors that can occur while drawing a single edge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
	/// An endpoint or the container did not resolve.
	#[error(transparent)]
	Lookup(#[from] LookupError),

	/// The drawing surface refused to create the path.
	#[error("drawing surface failed: {0}")]
	Surface(String),
}
