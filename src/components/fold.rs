//! Show/hide switch between a folded and an unfolded view of a section.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlElement;

use super::cfg_graph::dom::document;
use crate::error::LookupError;

const HIDDEN: &str = "none";

/// Id of the icon paired with the element `id`.
pub fn icon_id(id: &str) -> String {
	format!("img_{id}")
}

/// An element whose CSS `display` can be read and written.
pub trait FoldTarget {
	/// Current inline `display` value.
	fn display(&self) -> String;
	/// Sets the inline `display` value.
	fn set_display(&self, value: &str);

	/// Whether the element is hidden.
	fn is_hidden(&self) -> bool {
		self.display() == HIDDEN
	}
}

/// Where fold targets are looked up and failures are reported.
pub trait FoldDocument {
	/// Element handle.
	type Target: FoldTarget;

	/// Looks an element up by id.
	fn find(&self, id: &str) -> Option<Self::Target>;
	/// Tells the user something went wrong.
	fn alert(&self, message: &str);
}

/// Which of the two views is visible after a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldState {
	/// The folded view is shown.
	Folded,
	/// The unfolded view is shown.
	Unfolded,
}

/// Swaps which of `folded` and `unfolded` is shown, along with their
/// `img_` icons when both exist.
///
/// A missing target is reported through [`FoldDocument::alert`] and
/// leaves the page unchanged.
pub fn toggle<D: FoldDocument>(
	doc: &D,
	folded: &str,
	unfolded: &str,
) -> Result<FoldState, LookupError> {
	let find = |id: &str| {
		doc.find(id).ok_or_else(|| {
			let err = LookupError::Element { id: id.to_owned() };
			doc.alert(&err.to_string());
			err
		})
	};
	let ff = find(folded)?;
	let uf = find(unfolded)?;

	let state = if ff.is_hidden() {
		ff.set_display("");
		uf.set_display(HIDDEN);
		FoldState::Folded
	} else {
		ff.set_display(HIDDEN);
		uf.set_display("");
		FoldState::Unfolded
	};

	if let (Some(i_ff), Some(i_uf)) = (doc.find(&icon_id(folded)), doc.find(&icon_id(unfolded))) {
		let (shown, hidden) = if i_ff.is_hidden() {
			(i_ff, i_uf)
		} else {
			(i_uf, i_ff)
		};
		shown.set_display("inline");
		hidden.set_display(HIDDEN);
	}
	Ok(state)
}

impl FoldTarget for HtmlElement {
	fn display(&self) -> String {
		self.style().get_property_value("display").unwrap_or_default()
	}

	fn set_display(&self, value: &str) {
		let _ = self.style().set_property("display", value);
	}
}

/// The live page.
pub struct DomDocument {
	document: web_sys::Document,
}

impl DomDocument {
	/// The document of the current window, if any.
	pub fn current() -> Option<Self> {
		document().map(|document| Self { document })
	}
}

impl FoldDocument for DomDocument {
	type Target = HtmlElement;

	fn find(&self, id: &str) -> Option<HtmlElement> {
		self.document
			.get_element_by_id(id)
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	}

	fn alert(&self, message: &str) {
		if let Some(window) = web_sys::window() {
			let _ = window.alert_with_message(message);
		}
	}
}

/// Toggle entry point for handlers written directly in the host page.
#[wasm_bindgen(js_name = foldUnfold)]
pub fn fold_unfold(folded: &str, unfolded: &str) {
	let Some(doc) = DomDocument::current() else {
		return;
	};
	if let Err(e) = toggle(&doc, folded, unfolded) {
		warn!("fold toggle failed: {e}");
	}
}

/// A section showing `summary` until expanded to its children.
#[component]
pub fn FoldSection(
	/// Prefix of the two views' element ids.
	#[prop(into)]
	id: String,
	/// Shown while folded.
	#[prop(into)]
	summary: String,
	/// Shown while unfolded.
	children: Children,
) -> impl IntoView {
	let (folded, unfolded) = (format!("{id}_folded"), format!("{id}_unfolded"));
	let (ff, uf) = (folded.clone(), unfolded.clone());

	view! {
		<div class="fold">
			<button class="fold-toggle" on:click=move |_| fold_unfold(&ff, &uf)>
				<span id=icon_id(&folded) style="display: inline">"+"</span>
				<span id=icon_id(&unfolded) style="display: none">"-"</span>
			</button>
			<div id=folded.clone() class="folded">{summary}</div>
			<div id=unfolded class="unfolded" style="display: none">{children()}</div>
		</div>
	}
}
