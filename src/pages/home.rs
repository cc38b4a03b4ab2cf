use leptos::prelude::*;

use crate::components::config_panel::ConfigPanel;
use crate::components::sankey::SankeyDiagram;
use crate::model::{Config, NodeId, SankeyData, generate};

/// Keep the selection only if its node survived regeneration.
fn retain_selection(selected: Option<NodeId>, data: &SankeyData) -> Option<NodeId> {
	selected.filter(|&id| data.contains(id))
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = RwSignal::new(Config::default());
	let data = RwSignal::new(generate(&config.get_untracked()));
	let selected = RwSignal::new(None::<NodeId>);

	let regenerate = move || {
		let next = generate(&config.get_untracked());
		selected.update(|sel| *sel = retain_selection(*sel, &next));
		data.set(next);
	};

	let on_config_change = Callback::new(move |next: Config| {
		config.set(next);
		regenerate();
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="page">
				<header class="page-header">
					<h1>"AVS, Sets, and Operators Visualization"</h1>
					<p class="subtitle">
						"Visualize the connections between AVS, Sets, and Operators using a Sankey diagram"
					</p>
				</header>

				<div class="layout">
					<aside class="controls">
						<ConfigPanel config=config on_change=on_config_change />
						<button class="button" on:click=move |_| regenerate()>
							"Regenerate Connections"
						</button>
					</aside>
					<section class="card chart-card">
						<SankeyDiagram data=data selected=selected />
					</section>
				</div>

				<section class="card about">
					<h2>"About This Visualization"</h2>
					<p>"This Sankey diagram visualizes the relationships between three entity types:"</p>
					<ul>
						<li>
							<span class="tier tier-avs">"AVS (Left)"</span>
							": The source entities."
						</li>
						<li>
							<span class="tier tier-set">"Sets (Middle)"</span>
							": Intermediate entities that connect AVS to Operators."
						</li>
						<li>
							<span class="tier tier-operator">"Operators (Right)"</span>
							": The target entities that can be connected to multiple Sets."
						</li>
					</ul>
					<p>
						"Use the configuration panel to adjust the number of entities and their connections. "
						"The \"Regenerate Connections\" button will create new random connections while maintaining the same entity counts."
					</p>
				</section>
			</main>
		</ErrorBoundary>
	}
}
