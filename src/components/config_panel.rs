use leptos::prelude::*;
use log::warn;

use crate::model::{Config, ConfigField};

/// One labelled slider per configuration field.
#[component]
pub fn ConfigPanel(
	#[prop(into)] config: Signal<Config>,
	#[prop(into)] on_change: Callback<Config>,
) -> impl IntoView {
	let sliders = ConfigField::ALL
		.into_iter()
		.map(|field| {
			let range = field.range();
			let on_input = move |ev: web_sys::Event| {
				let raw = event_target_value(&ev);
				let Ok(value) = raw.parse::<usize>() else {
					warn!("ignoring non-numeric {}: {raw:?}", field.label());
					return;
				};
				if !field.range().contains(&value) {
					warn!("clamping {} = {value} into {:?}", field.label(), field.range());
				}
				on_change.run(config.get_untracked().with(field, value));
			};
			view! {
				<div class="config-field">
					<label>{field.label()}": "{move || config.get().get(field)}</label>
					<input
						type="range"
						min=range.start().to_string()
						max=range.end().to_string()
						step="1"
						prop:value=move || config.get().get(field).to_string()
						on:input=on_input
					/>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="card">
			<h2 class="card-title">"Configuration"</h2>
			<div class="card-content">{sliders}</div>
		</div>
	}
}
