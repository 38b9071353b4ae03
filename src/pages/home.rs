use leptos::prelude::*;

use crate::components::cfg_graph::{CfgBlock, CfgFunction, CfgGraph, EdgeKind};
use crate::components::fold::FoldSection;

const SOURCE: &str = "int collatz(int n)
{
  int steps = 0;
  while (n != 1) {
    if (n % 2 == 0)
      n = n / 2;
    else
      n = 3 * n + 1;
    steps++;
  }
  switch (steps) {
    case 0: return -1;
    default: return steps;
  }
}";

/// Sample function: a loop around an if/else, then a switch.
fn sample_function() -> CfgFunction {
	CfgFunction {
		name: "collatz".into(),
		blocks: vec![
			CfgBlock::new("2")
				.line("steps = 0;")
				.edge("3", EdgeKind::Basic),
			CfgBlock::new("3")
				.line("if (n != 1)")
				.line("if not (n != 1)")
				.edge("4", EdgeKind::IfThen)
				.edge("8", EdgeKind::IfElse),
			CfgBlock::new("4")
				.line("D.1 = n % 2;")
				.line("if (D.1 == 0)")
				.line("if not (D.1 == 0)")
				.edge("5", EdgeKind::IfThen)
				.edge("6", EdgeKind::IfElse),
			CfgBlock::new("5")
				.line("n = n / 2;")
				.edge("7", EdgeKind::Basic),
			CfgBlock::new("6")
				.line("D.2 = n * 3;")
				.line("n = D.2 + 1;")
				.edge("7", EdgeKind::Basic),
			CfgBlock::new("7")
				.line("steps = steps + 1;")
				.edge("3", EdgeKind::Basic),
			CfgBlock::new("8")
				.line("switch (steps)")
				.line("  case 0")
				.line("  default")
				.edge("9", EdgeKind::SwitchCase)
				.edge("10", EdgeKind::SwitchDefault),
			CfgBlock::new("9")
				.line("return -1;"),
			CfgBlock::new("10")
				.line("return steps;"),
		],
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="function">
			<h1>"collatz"</h1>
			<p class="subtitle">"Hover a block to highlight where control goes next."</p>
			<FoldSection id="source_collatz" summary="Source (folded)">
				<pre>{SOURCE}</pre>
			</FoldSection>
			<CfgGraph function=sample_function() />
		</div>
	}
}
