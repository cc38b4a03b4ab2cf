use avs_sankey::{App, init_logging};

// Linked through the library crate.
use console_error_panic_hook as _;
use console_log as _;
use getrandom as _;
use leptos_meta as _;
use leptos_router as _;
use log as _;
use rand as _;
use thiserror as _;
use wasm_bindgen as _;
use web_sys as _;

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
