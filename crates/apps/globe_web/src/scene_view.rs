//! Globe canvas: input listeners, resize handling and the animation loop.

use std::cell::{Cell, RefCell};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use scene::{GlobeMaterial, LightRig, SceneConfig, SceneContent, SceneController};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent, WheelEvent};

use crate::assets::load_globe_surface;
use crate::dom;
use crate::error::ViewerError;
use crate::wgpu::{Globals, WgpuContext, init_wgpu, render_frame, resize_wgpu};

pub const CONTAINER_ID: &str = "globe-container";
pub const LOADING_ID: &str = "loading";

pub struct ViewerState {
    pub controller: SceneController,
    pub lights: LightRig,
    pub material: GlobeMaterial,
    pub wgpu: Option<WgpuContext>,
    canvas: HtmlCanvasElement,
    frame: Option<AnimationFrame>,
    listeners: Vec<EventListener>,
    running: bool,
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
    /// Bumped by every mount and every teardown; a mount whose generation
    /// is no longer current was torn down while it awaited.
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn next_generation() -> u64 {
    GENERATION
        .try_with(|g| {
            let next = g.get().wrapping_add(1);
            g.set(next);
            next
        })
        .unwrap_or(0)
}

fn is_current(generation: u64) -> bool {
    GENERATION
        .try_with(|g| g.get() == generation)
        .unwrap_or(false)
}

/// Runs `f` against the live viewer. `None` before mount, after teardown, or
/// while the thread-local is being destroyed.
fn with_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ViewerState) -> R,
{
    STATE
        .try_with(|cell| cell.borrow_mut().as_mut().map(f))
        .ok()
        .flatten()
}

/// Builds the scene, starts the renderer and begins animating.
///
/// A [`teardown`] that lands while this is awaiting wins: the canvas is
/// removed and nothing is started.
pub async fn mount(config: SceneConfig) -> Result<(), ViewerError> {
    let generation = next_generation();
    let window = dom::window()?;
    let document = dom::document()?;
    let container: HtmlElement = dom::require(&document, CONTAINER_ID)?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ViewerError::Dom("created element is not a canvas".to_string()))?;
    let (width, height) = dom::viewport_size(&window);
    size_canvas(&canvas, width, height);
    container.append_child(&canvas)?;

    let started = start(generation, config, &window, &document, &canvas, width, height).await;
    if !matches!(started, Ok(true)) {
        canvas.remove();
    }
    started.map(|_| ())
}

/// Everything after the canvas exists. `Ok(false)` means a teardown
/// cancelled the mount.
async fn start(
    generation: u64,
    config: SceneConfig,
    window: &web_sys::Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    width: f64,
    height: f64,
) -> Result<bool, ViewerError> {
    let mut controller = SceneController::new(&config);
    controller.resize(width, height);

    let surface = load_globe_surface(&config).await;
    if !is_current(generation) {
        log::debug!("globe mount cancelled during asset load");
        return Ok(false);
    }
    let content = SceneContent::assemble(&config, surface, &mut rand::rng());
    let gpu = init_wgpu(canvas.clone(), &content).await?;
    if !is_current(generation) {
        log::debug!("globe mount cancelled during renderer setup");
        return Ok(false);
    }

    let state = ViewerState {
        controller,
        lights: content.lights,
        material: content.material,
        wgpu: Some(gpu),
        canvas: canvas.clone(),
        frame: None,
        listeners: Vec::new(),
        running: true,
    };
    STATE.with(|cell| *cell.borrow_mut() = Some(state));

    let listeners = install_listeners(window, document, canvas);
    with_state(|s| s.listeners = listeners);

    if let Some(loading) = dom::optional::<HtmlElement>(document, LOADING_ID) {
        dom::set_display(&loading, "none");
    }
    log::info!(
        "globe ready: {} markers, {} stars",
        content.markers.len(),
        content.starfield.len()
    );

    schedule_frame();
    Ok(true)
}

/// Puts `text` in the loading indicator after a failed start.
pub fn show_loading_error(text: &str) {
    let Ok(document) = dom::document() else {
        return;
    };
    if let Some(loading) = dom::optional::<HtmlElement>(&document, LOADING_ID) {
        loading.set_text_content(Some(text));
    }
}

/// Stops the loop, removes listeners and releases GPU resources.
pub fn teardown() {
    next_generation();
    let state = STATE
        .try_with(|cell| cell.borrow_mut().take())
        .ok()
        .flatten();
    if let Some(mut state) = state {
        state.running = false;
        state.frame.take();
        state.listeners.clear();
        state.wgpu.take();
        state.canvas.remove();
        log::debug!("globe torn down");
    }
}

pub fn reset_view() {
    with_state(|s| s.controller.reset());
}

fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(1.0) as u32);
    canvas.set_height(height.max(1.0) as u32);
    dom::set_style(canvas, "width", &format!("{width}px"));
    dom::set_style(canvas, "height", &format!("{height}px"));
    dom::set_display(canvas, "block");
}

fn schedule_frame() {
    let handle = request_animation_frame(|_timestamp| {
        let again = with_state(|s| {
            s.frame.take();
            if !s.running {
                return false;
            }
            s.controller.tick();
            draw(s);
            true
        });
        if again == Some(true) {
            schedule_frame();
        }
    });
    with_state(|s| s.frame = Some(handle));
}

fn draw(state: &ViewerState) {
    let Some(ctx) = &state.wgpu else {
        return;
    };
    let globals = Globals::new(
        state.controller.view_proj(),
        state.controller.globe_model(),
        state.controller.camera().position.to_f32(),
        &state.lights,
        &state.material,
        ctx.is_textured(),
    );
    if let Err(err) = render_frame(ctx, &globals) {
        log::debug!("frame skipped: {err}");
    }
}

fn slider_value(event: &web_sys::Event) -> Option<f64> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.value().trim().parse().ok()
}

fn install_listeners(
    window: &web_sys::Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Vec<EventListener> {
    let mut listeners = vec![
        EventListener::new(canvas, "mousedown", |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = (event.client_x() as f64, event.client_y() as f64);
                with_state(|s| s.controller.pointer_down(x, y));
            }
        }),
        EventListener::new(canvas, "mousemove", |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = (event.client_x() as f64, event.client_y() as f64);
                with_state(|s| s.controller.pointer_move(x, y));
            }
        }),
        EventListener::new(canvas, "mouseup", |_event| {
            with_state(|s| s.controller.pointer_up());
        }),
        EventListener::new_with_options(
            canvas,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<WheelEvent>() {
                    let delta_y = event.delta_y();
                    with_state(|s| s.controller.wheel(delta_y));
                }
            },
        ),
    ];

    let window_for_resize = window.clone();
    listeners.push(EventListener::new(window, "resize", move |_event| {
        let (width, height) = dom::viewport_size(&window_for_resize);
        with_state(|s| {
            size_canvas(&s.canvas, width, height);
            s.controller.resize(width, height);
            if let Some(ctx) = &mut s.wgpu {
                resize_wgpu(ctx, width as u32, height as u32);
            }
        });
    }));

    if let Some(speed) = dom::optional::<HtmlInputElement>(document, "rotationSpeed") {
        listeners.push(EventListener::new(&speed, "input", |event| {
            if let Some(value) = slider_value(event) {
                with_state(|s| s.controller.set_rotation_speed(value));
            }
        }));
    }

    if let Some(altitude) = dom::optional::<HtmlInputElement>(document, "altitude") {
        listeners.push(EventListener::new(&altitude, "input", |event| {
            if let Some(value) = slider_value(event) {
                with_state(|s| s.controller.set_altitude(value));
            }
        }));
    }

    if let Some(reset) = dom::optional::<HtmlElement>(document, "resetView") {
        listeners.push(EventListener::new(&reset, "click", |_event| reset_view()));
    }

    listeners
}

#[cfg(test)]
mod tests {
    use super::{is_current, next_generation, teardown};

    #[test]
    fn teardown_cancels_a_pending_mount() {
        let generation = next_generation();
        assert!(is_current(generation));
        teardown();
        assert!(!is_current(generation));
    }

    #[test]
    fn a_later_mount_supersedes_an_earlier_one() {
        let first = next_generation();
        let second = next_generation();
        assert!(!is_current(first));
        assert!(is_current(second));
    }
}
