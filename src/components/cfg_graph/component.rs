use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::Element;

use super::dom::{
	DomLayout, GRAPH_WIDTH, SvgSurface, block_element_id, container_element_id, document,
	graph_element_id,
};
use super::layout::plan_arrows;
use super::render::{ArrowConfig, ArrowRenderer};
use super::state::{EdgeIndex, HighlightConfig};
use super::types::CfgFunction;

/// One function's blocks with their control-flow arrows drawn alongside.
///
/// Arrows are drawn once the blocks are mounted. Hovering a block lights
/// up the arrows leaving it.
#[component]
pub fn CfgGraph(
	/// Blocks and edges to show.
	function: CfgFunction,
	/// Arrow geometry and resting style.
	#[prop(default = ArrowConfig::default())]
	config: ArrowConfig,
	/// Hover colors.
	#[prop(default = HighlightConfig::default())]
	highlight: HighlightConfig,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let index: Rc<RefCell<EdgeIndex<Element>>> = Rc::new(RefCell::new(EdgeIndex::new()));
	let renderer = ArrowRenderer::new(config);
	let highlighter = Rc::new(renderer.highlighter(highlight));
	let name = function.name.clone();

	let (index_init, name_init) = (index.clone(), name.clone());
	let plans = plan_arrows(&function);
	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let Some(document) = document() else {
			return;
		};
		let Some(svg) = document.get_element_by_id(&graph_element_id(&name_init)) else {
			warn!("{name_init}: arrow canvas missing");
			return;
		};
		let height = container.get_bounding_client_rect().height();
		let _ = svg.set_attribute("height", &height.to_string());

		let mut surface = SvgSurface::new(document.clone(), svg);
		surface.clear();
		let layout = DomLayout::new(document);
		let mut index = index_init.borrow_mut();
		index.clear();
		let failed = renderer.draw_all(&mut surface, &layout, &mut *index, &plans);
		debug!(
			"{name_init}: drew {} of {} arrows, {} failed",
			index.edge_count(),
			plans.len(),
			failed.len()
		);
	});

	let blocks = function
		.blocks
		.iter()
		.map(|block| {
			let (idx_enter, idx_leave) = (index.clone(), index.clone());
			let (hl_enter, hl_leave) = (highlighter.clone(), highlighter.clone());
			let (fn_enter, fn_leave) = (name.clone(), name.clone());
			let (bb_enter, bb_leave) = (block.label.clone(), block.label.clone());
			view! {
				<div
					id=block_element_id(&name, &block.label)
					class="basicblock"
					on:mouseenter=move |_| {
						hl_enter.highlight(&idx_enter.borrow(), &fn_enter, &bb_enter);
					}
					on:mouseleave=move |_| {
						hl_leave.unhighlight(&idx_leave.borrow(), &fn_leave, &bb_leave);
					}
				>
					<pre>{block.lines.join("\n")}</pre>
				</div>
			}
		})
		.collect_view();

	view! {
		<table class="blockgraph">
			<tr>
				<td>
					<div node_ref=container_ref id=container_element_id(&name) class="blocks">
						{blocks}
					</div>
				</td>
				<td>
					<svg id=graph_element_id(&name) class="blockgraph-arrows" width=GRAPH_WIDTH.to_string() />
				</td>
			</tr>
		</table>
	}
}
