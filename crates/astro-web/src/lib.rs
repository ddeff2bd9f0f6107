//! Browser bridge for astro-canvas.
//!
//! JS owns `requestAnimationFrame`, DOM events and `fetch`; it forwards them
//! here as plain numbers and strings. Canvas hosts are mounted into a
//! thread-local registry and addressed by `u32` handles.

pub mod canvas;
pub mod registry;
pub mod setup;
pub mod storage;

use std::cell::RefCell;

use astro_canvas::apod::{ApodPanel, ApodRequest};
use astro_canvas::charts::{ChartKind, ChartView};
use astro_canvas::datasource::solar_activity_sources;
use astro_canvas::hosts::{ChartScene, ParticleBackground, SkyMapScene, TimelineScene};
use astro_canvas::sky::SkyCatalog;
use astro_canvas::timeline::{builtin_events, events_from_json};
use astro_canvas::{InputEvent, Preferences, SceneRunner, SkyConfig, Store};
use wasm_bindgen::prelude::*;

pub use canvas::WebCanvas;
pub use registry::{Host, Registry};
pub use storage::LocalStorage;

thread_local! {
    static HOSTS: RefCell<Registry<Host>> = RefCell::new(Registry::new());
    static PREFS: RefCell<Option<Store<Preferences, LocalStorage>>> = const { RefCell::new(None) };
    static APOD: RefCell<ApodPanel> = RefCell::new(ApodPanel::new());
}

fn with_host<R>(handle: u32, f: impl FnOnce(&mut Host) -> R) -> Option<R> {
    HOSTS.with(|cell| cell.borrow_mut().get_mut(handle).map(f))
}

fn with_prefs<R>(f: impl FnOnce(&mut Store<Preferences, LocalStorage>) -> R) -> R {
    PREFS.with(|cell| {
        let mut slot = cell.borrow_mut();
        let store = slot.get_or_insert_with(|| {
            let mut store: Store<Preferences, LocalStorage> = Store::load(Preferences::STORAGE_KEY, LocalStorage::open());
            let mut previous = store.get().clone();
            store.subscribe(move |prefs: &Preferences| {
                HOSTS.with(|hosts| {
                    for host in hosts.borrow_mut().iter_mut() {
                        host.apply_preferences(&previous, prefs);
                    }
                });
                previous = prefs.clone();
            });
            store
        });
        f(store)
    })
}

fn current_prefs() -> Preferences {
    with_prefs(|store| store.get().clone())
}

/// Mount `scene` on `canvas_id`. Returns 0 when the canvas is missing.
fn mount<S, F>(canvas_id: &str, scene: S, wrap: F) -> u32
where
    S: astro_canvas::CanvasScene,
    F: FnOnce(SceneRunner<S, WebCanvas>) -> Host,
{
    setup::install_logging();
    let mut runner = SceneRunner::new(scene);
    if !runner.mount(WebCanvas::acquire(canvas_id)) {
        return 0;
    }
    let host = wrap(runner);
    let kind = host.kind();
    let handle = HOSTS.with(|cell| cell.borrow_mut().insert(host));
    log::info!("{kind} mounted on #{canvas_id} as handle {handle}");
    handle
}

// ---- Mounting ----

#[wasm_bindgen]
pub fn mount_background(canvas_id: &str) -> u32 {
    let prefs = current_prefs();
    let handle = mount(canvas_id, ParticleBackground::new(prefs.background_config()), Host::Background);
    if prefs.reduced_motion {
        with_host(handle, Host::pause);
    }
    handle
}

#[wasm_bindgen]
pub fn mount_sky_map(canvas_id: &str, config_json: Option<String>, catalog_json: Option<String>) -> u32 {
    let prefs = current_prefs();
    let config = match config_json.as_deref().map(SkyConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("sky map: {e}; using defaults");
            SkyConfig { layers: prefs.sky_layers, ..SkyConfig::default() }
        }
        None => SkyConfig { layers: prefs.sky_layers, ..SkyConfig::default() },
    };
    let catalog = match catalog_json.as_deref().map(SkyCatalog::from_json) {
        Some(Ok(catalog)) => catalog,
        Some(Err(e)) => {
            log::warn!("sky map: {e}; using built-in catalog");
            SkyCatalog::builtin()
        }
        None => SkyCatalog::builtin(),
    };
    mount(canvas_id, SkyMapScene::new(catalog, &config), Host::SkyMap)
}

/// `kind`: 0 line, 1 area, 2 bar.
#[wasm_bindgen]
pub fn mount_chart(canvas_id: &str, title: &str, kind: u32, seed: u32) -> u32 {
    let kind = match kind {
        1 => ChartKind::Area,
        2 => ChartKind::Bar,
        _ => ChartKind::Line,
    };
    let view = ChartView { kind, title: title.to_string(), ..ChartView::default() };
    let scene = ChartScene::new(solar_activity_sources(u64::from(seed)), view);
    mount(canvas_id, scene, Host::Chart)
}

#[wasm_bindgen]
pub fn mount_timeline(canvas_id: &str, events_json: Option<String>) -> u32 {
    let events = match events_json.as_deref().map(events_from_json) {
        Some(Ok(events)) => events,
        Some(Err(e)) => {
            log::warn!("timeline: {e}; using built-in events");
            builtin_events()
        }
        None => builtin_events(),
    };
    let config = current_prefs().timeline_config();
    mount(canvas_id, TimelineScene::new(events, &config), Host::Timeline)
}

#[wasm_bindgen]
pub fn host_unmount(handle: u32) {
    if let Some(mut host) = HOSTS.with(|cell| cell.borrow_mut().remove(handle)) {
        host.unmount();
    }
}

// ---- Frame loop ----

/// Returns `true` when the canvas was repainted. Unknown handles are no-ops.
#[wasm_bindgen]
pub fn host_tick(handle: u32, timestamp_ms: f64) -> bool {
    with_host(handle, |h| h.tick(timestamp_ms)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn host_resize(handle: u32, width: f32, height: f32) {
    with_host(handle, |h| h.resize(width, height));
}

#[wasm_bindgen]
pub fn host_pause(handle: u32) {
    with_host(handle, Host::pause);
}

#[wasm_bindgen]
pub fn host_resume(handle: u32) {
    with_host(handle, Host::resume);
}

// ---- Input ----

#[wasm_bindgen]
pub fn host_pointer_down(handle: u32, x: f32, y: f32) {
    with_host(handle, |h| h.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn host_pointer_up(handle: u32, x: f32, y: f32) {
    with_host(handle, |h| h.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn host_pointer_move(handle: u32, x: f32, y: f32) {
    with_host(handle, |h| h.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn host_pointer_leave(handle: u32) {
    with_host(handle, |h| h.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn host_wheel(handle: u32, delta: f32) {
    with_host(handle, |h| h.push_input(InputEvent::Wheel { delta }));
}

#[wasm_bindgen]
pub fn host_key_down(handle: u32, key_code: u32) {
    with_host(handle, |h| h.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn host_custom_event(handle: u32, kind: u32, a: f32, b: f32, c: f32) {
    with_host(handle, |h| h.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Host-specific queries ----

#[wasm_bindgen]
pub fn timeline_search(handle: u32, query: &str) {
    with_host(handle, |h| {
        if let Host::Timeline(r) = h {
            r.scene_mut().view_mut().set_search(query);
        }
    });
}

/// Title of the selected timeline event, if any.
#[wasm_bindgen]
pub fn timeline_selected_title(handle: u32) -> Option<String> {
    with_host(handle, |h| match h {
        Host::Timeline(r) => r.scene().view().selected().map(|e| e.title.clone()),
        _ => None,
    })
    .flatten()
}

/// Name of the selected sky object, if any.
#[wasm_bindgen]
pub fn sky_selected_name(handle: u32) -> Option<String> {
    with_host(handle, |h| match h {
        Host::SkyMap(r) => r.scene().selected().map(|o| o.name.clone()),
        _ => None,
    })
    .flatten()
}

// ---- Preferences ----

#[wasm_bindgen]
pub fn prefs_get() -> String {
    with_prefs(|store| serde_json::to_string(store.get()).unwrap_or_default())
}

/// Replace preferences from JSON. Returns `false` when the JSON is invalid
/// or could not be persisted; valid values still apply to mounted hosts.
#[wasm_bindgen]
pub fn prefs_set(json: &str) -> bool {
    let prefs: Preferences = match serde_json::from_str(json) {
        Ok(prefs) => prefs,
        Err(e) => {
            log::warn!("preferences rejected: {e}");
            return false;
        }
    };
    with_prefs(|store| store.set(prefs)).is_ok()
}

// ---- APOD ----

/// URL JS should fetch. `date` is `YYYY-MM-DD` or absent for today.
#[wasm_bindgen]
pub fn apod_request_url(api_key: &str, date: Option<String>) -> String {
    APOD.with(|cell| cell.borrow_mut().reset());
    let request = ApodRequest::new(api_key);
    match date {
        Some(date) => request.with_date(&date).url(),
        None => request.url(),
    }
}

#[wasm_bindgen]
pub fn apod_receive(status: u16, body: &str) {
    APOD.with(|cell| cell.borrow_mut().receive(status, body));
}

#[wasm_bindgen]
pub fn apod_fail(reason: &str) {
    APOD.with(|cell| cell.borrow_mut().fail(reason));
}

#[wasm_bindgen]
pub fn apod_title() -> Option<String> {
    APOD.with(|cell| cell.borrow().title().map(str::to_string))
}

#[wasm_bindgen]
pub fn apod_image_url() -> Option<String> {
    APOD.with(|cell| cell.borrow().image_url().map(str::to_string))
}

/// Paint the APOD card onto `canvas_id`. Returns `false` without a canvas.
#[wasm_bindgen]
pub fn apod_draw(canvas_id: &str) -> bool {
    let Some(mut canvas) = WebCanvas::acquire(canvas_id) else {
        return false;
    };
    APOD.with(|cell| cell.borrow().draw(&mut canvas));
    true
}

// ---- Page setup ----

#[wasm_bindgen]
pub fn inject_ripple_style() -> bool {
    setup::install_logging();
    setup::inject_ripple_style()
}
