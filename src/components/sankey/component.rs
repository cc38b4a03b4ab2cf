use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::SankeyState;
use crate::model::{NodeId, SankeyData, toggle_selection};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);
const FRAME_DT: f64 = 0.016;

/// Shared run flag between the frame loop and the owner's cleanup hook.
#[derive(Clone, Debug)]
struct LoopGuard(Arc<AtomicBool>);

impl LoopGuard {
	fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	fn stop(&self) {
		self.0.store(false, Ordering::Relaxed);
	}

	fn is_running(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas-rendered Sankey chart. Clicking a node toggles `selected`.
#[component]
pub fn SankeyCanvas(
	#[prop(into)] data: Signal<SankeyData>,
	selected: RwSignal<Option<NodeId>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (over_node, set_over_node) = signal(false);
	let state: Rc<RefCell<Option<SankeyState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	// The loop tears itself down on its next frame once the owner is gone.
	let guard = LoopGuard::new();
	on_cleanup({
		let guard = guard.clone();
		move || guard.stop()
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window available, chart disabled");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("canvas has no 2d context, chart disabled");
			return;
		};
		*state_init.borrow_mut() = Some(SankeyState::new(
			data.get_untracked(),
			selected.get_untracked(),
			w,
			h,
		));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_anim, guard) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			guard.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !guard.is_running() {
				if let (Some(cb), Some(win)) = (resize_anim.borrow_mut().take(), web_sys::window()) {
					let _ =
						win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				state_anim.borrow_mut().take();
				let _ = animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Push regenerated data and selection changes into the canvas state.
	let state_sync = state.clone();
	Effect::new(move |_| {
		let (next, sel) = (data.get(), selected.get());
		if let Some(ref mut s) = *state_sync.borrow_mut() {
			s.update(next, sel);
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let hit = state_click
			.borrow()
			.as_ref()
			.and_then(|s| s.node_at(x, y).map(|n| n.id));
		if let Some(id) = hit {
			selected.update(|sel| *sel = toggle_selection(*sel, id));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.set_hover(x, y).is_some();
			if hovered != over_node.get_untracked() {
				set_over_node.set(hovered);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.clear_hover();
		}
		set_over_node.set(false);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sankey-canvas"
			on:click=on_click
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style:display="block"
			style:position="absolute"
			style:cursor=move || if over_node.get() { "pointer" } else { "default" }
		/>
	}
}

/// Sankey chart plus the selection summary and clear control.
#[component]
pub fn SankeyDiagram(
	#[prop(into)] data: Signal<SankeyData>,
	selected: RwSignal<Option<NodeId>>,
) -> impl IntoView {
	view! {
		<div class="sankey">
			<div class="sankey-chart">
				<SankeyCanvas data=data selected=selected />
			</div>
			<div class="sankey-footer">
				<p>
					"Click on nodes to see complete connection paths highlighted, including indirect connections."
				</p>
				{move || {
					selected
						.get()
						.map(|id| {
							view! {
								<p class="selection">
									"Currently showing connections for: "
									<span class="selected-id">{id.to_string()}</span>
									<button class="link-button" on:click=move |_| selected.set(None)>
										"Clear selection"
									</button>
								</p>
							}
						})
				}}
			</div>
		</div>
	}
}
