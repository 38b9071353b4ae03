use std::collections::HashMap;

use log::warn;

use super::render::EdgeRequest;
use super::types::CfgFunction;

struct Span {
	/// Blocks the arrow passes on its way down. Upward arrows pass none.
	covered: Option<(usize, usize)>,
	depth: usize,
}

/// Decides rank and stack offset for every out-edge of `function`.
///
/// Longer arrows, and arrows overlapping long downward ones, get a higher
/// rank so they bow further out than the short arrows they pass. Arrows
/// back up to an earlier block are ranked by their length alone. Branch
/// edges of a condition or switch are stacked upwards from the bottom of
/// their block, the last one lowest.
pub fn plan_arrows(function: &CfgFunction) -> Vec<EdgeRequest> {
	let position: HashMap<&str, usize> = function
		.blocks
		.iter()
		.enumerate()
		.map(|(i, b)| (b.label.as_str(), i))
		.collect();

	let mut plans = Vec::new();
	let mut spans = Vec::new();
	for (from, block) in function.blocks.iter().enumerate() {
		let n = block.out_edges.len();
		for (i, edge) in block.out_edges.iter().enumerate() {
			let Some(&to) = position.get(edge.target.as_str()) else {
				warn!(
					"{}: block {} jumps to unknown block {}",
					function.name, block.label, edge.target
				);
				continue;
			};
			let stack_offset = if edge.kind.is_structured() {
				-((n - i) as i32)
			} else {
				0
			};
			spans.push(Span {
				covered: (from <= to).then_some((from, to)),
				depth: from.abs_diff(to),
			});
			plans.push(EdgeRequest {
				function: function.name.clone(),
				rank: 0,
				source: block.label.clone(),
				dest: edge.target.clone(),
				stack_offset,
			});
		}
	}

	// deepest arrow passing each block
	let mut block_depth = vec![0usize; function.blocks.len()];
	for span in &spans {
		if let Some((lo, hi)) = span.covered {
			for d in &mut block_depth[lo..=hi] {
				*d = (*d).max(span.depth);
			}
		}
	}

	for (plan, span) in plans.iter_mut().zip(&spans) {
		let crossed = span
			.covered
			.and_then(|(lo, hi)| block_depth[lo..=hi].iter().copied().max())
			.unwrap_or(0);
		plan.rank = (crossed + 1 + span.depth) as u32;
	}
	plans
}
