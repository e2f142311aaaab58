use console_error_panic_hook::set_once;
use gloo::events::EventListener;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod assets;
pub mod config;
pub mod dom;
pub mod error;
pub mod scene_view;
pub mod support_view;
mod wgpu;

use config::{AppConfig, CONFIG_ELEMENT_ID};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Hot reload can run the start hook twice.
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    set_once();

    let document = dom::document()?;
    let text = dom::config_text(&document, CONFIG_ELEMENT_ID);
    let (config, config_err) = AppConfig::from_json_or_default(text.as_deref());

    if console_log::init_with_level(config.level()).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already installed"));
    }
    if let Some(err) = config_err {
        log::warn!("{err}; using defaults");
    }

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_event| boot(config)).forget();
    } else {
        boot(config);
    }
    Ok(())
}

fn boot(config: AppConfig) {
    let AppConfig {
        loading_error_text,
        scene,
        support,
        ..
    } = config;

    if let Err(err) = support_view::mount(support) {
        log::warn!("support form disabled: {err}");
    }

    spawn_local(async move {
        if let Err(err) = scene_view::mount(scene).await {
            log::error!("globe failed to start: {err}");
            scene_view::show_loading_error(&loading_error_text);
        }
    });

    match dom::window() {
        Ok(window) => EventListener::once(&window, "beforeunload", |_event| destroy()).forget(),
        Err(err) => log::warn!("{err}"),
    }
}

/// Restores the default camera position and globe orientation.
#[wasm_bindgen]
pub fn reset_view() {
    scene_view::reset_view();
}

/// Stops rendering and drops every listener and GPU resource.
#[wasm_bindgen]
pub fn destroy() {
    scene_view::teardown();
    support_view::teardown();
}
