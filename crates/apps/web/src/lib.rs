//! Browser entry points for the region dashboard.
//!
//! The page provides the `maplibregl` and `Chart` globals plus the sidebar
//! elements named in [`panel_dom`]. [`mount_dashboard`] wires everything;
//! [`destroy_dashboard`] releases it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use dashboard::{Dashboard, DashboardConfig, MapView};
use gloo_net::http::Request;
use layers::region_layers;
use tracing::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod chartjs;
pub mod logging;
pub mod maplibre;
pub mod overlay;
pub mod panel_dom;

use maplibre::{Map, MapHandle, feature_key, geojson_source, install_region_layers, map_options, to_js};
use overlay::CanvasOverlay;
use panel_dom::ChartJsHost;

pub const MAP_CONTAINER_ID: &str = "map";

static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything owned by one mounted view.
struct Mounted {
    config: DashboardConfig,
    map: MapHandle,
    overlay: Option<CanvasOverlay>,
    /// Set once the region source has been fetched and parsed.
    dashboard: Option<Dashboard<ChartJsHost>>,
    /// The fetched region document, handed to the map as an inline source.
    source: Option<serde_json::Value>,
    map_loaded: bool,
    layers_installed: bool,
    handlers: Vec<Closure<dyn FnMut(JsValue)>>,
    frame_cb: FrameCallback,
    raf_id: Option<i32>,
}

thread_local! {
    static VIEW: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

fn with_view<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Mounted) -> R,
{
    VIEW.try_with(|cell| cell.borrow_mut().as_mut().map(f))
        .ok()
        .flatten()
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Mounts the dashboard into `#map`. `config_json` may be empty or a partial
/// override of the defaults.
#[wasm_bindgen]
pub fn mount_dashboard(config_json: &str) -> Result<(), JsValue> {
    init_panic_hook();
    logging::init_logging(Level::DEBUG);

    if VIEW.with(|cell| cell.borrow().is_some()) {
        warn!("dashboard already mounted");
        return Ok(());
    }

    let config = if config_json.trim().is_empty() {
        DashboardConfig::default()
    } else {
        DashboardConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let map = Map::new(&to_js(&map_options(&config.map, MAP_CONTAINER_ID))?)?;
    let handle = MapHandle::new(map);
    let overlay = match CanvasOverlay::attach(&document, &handle.container()) {
        Ok(overlay) => Some(overlay),
        Err(err) => {
            warn!(?err, "beam overlay unavailable");
            None
        }
    };

    VIEW.with(|cell| {
        *cell.borrow_mut() = Some(Mounted {
            config: config.clone(),
            map: handle,
            overlay,
            dashboard: None,
            source: None,
            map_loaded: false,
            layers_installed: false,
            handlers: Vec::new(),
            frame_cb: Rc::new(RefCell::new(None)),
            raf_id: None,
        });
    });

    install_map_handlers();
    load_regions(config, document);
    start_frame_loop();
    info!("dashboard mounting");
    Ok(())
}

fn install_map_handlers() {
    with_view(|view| {
        let layer = view.config.map.interactive_layer.clone();

        let on_load = Closure::<dyn FnMut(JsValue)>::new(|_event: JsValue| {
            with_view(|view| {
                view.map_loaded = true;
                install_layers_when_ready(view);
            });
        });

        let on_click = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
            let Some(key) = feature_key(&event) else {
                return;
            };
            let now = now_ms();
            with_view(|view| {
                let Some(dash) = view.dashboard.as_mut() else {
                    debug!(key, "click before regions loaded");
                    return;
                };
                // Rejected clicks are logged by the core and change nothing.
                let _ = dash.region_clicked(&key, now, &mut view.map);
            });
        });

        let on_enter = Closure::<dyn FnMut(JsValue)>::new(|_event: JsValue| {
            with_view(|view| hover(view, true));
        });
        let on_leave = Closure::<dyn FnMut(JsValue)>::new(|_event: JsValue| {
            with_view(|view| hover(view, false));
        });

        let on_resize = Closure::<dyn FnMut(JsValue)>::new(|_event: JsValue| {
            with_view(|view| {
                let size = view.map.viewport_size();
                if let (Some(dash), Some(overlay)) = (view.dashboard.as_mut(), view.overlay.as_mut()) {
                    dash.resize(size, overlay);
                }
            });
        });

        let map = view.map.map();
        map.on("load", on_load.as_ref().unchecked_ref());
        map.on_layer("click", &layer, on_click.as_ref().unchecked_ref());
        map.on_layer("mousemove", &layer, on_enter.as_ref().unchecked_ref());
        map.on_layer("mouseleave", &layer, on_leave.as_ref().unchecked_ref());
        map.on("resize", on_resize.as_ref().unchecked_ref());

        view.handlers
            .extend([on_load, on_click, on_enter, on_leave, on_resize]);
    });
}

fn hover(view: &mut Mounted, over_region: bool) {
    match view.dashboard.as_mut() {
        Some(dash) => {
            dash.hover(over_region, &mut view.map);
        }
        None => {
            let cursor = if over_region {
                dashboard::CursorHint::Pointer
            } else {
                dashboard::CursorHint::Default
            };
            view.map.set_cursor(cursor);
        }
    }
}

/// The map and the region document arrive in either order; the layers go in
/// once both are present.
fn install_layers_when_ready(view: &mut Mounted) {
    if view.layers_installed || !view.map_loaded {
        return;
    }
    let Some(source) = view.source.as_ref() else {
        return;
    };
    let map_cfg = &view.config.map;
    let layers = region_layers(&map_cfg.source_id);
    match install_region_layers(view.map.map(), &map_cfg.source_id, source, &layers) {
        Ok(()) => view.layers_installed = true,
        Err(err) => warn!(?err, "region layers not installed"),
    }
}

fn load_regions(config: DashboardConfig, document: web_sys::Document) {
    let url = config.map.source_url.clone();
    spawn_local(async move {
        let text = match fetch_text(&url).await {
            Ok(text) => text,
            Err(err) => {
                warn!(url, ?err, "region source fetch failed");
                return;
            }
        };
        let seed = now_ms().to_bits();
        let dash = match Dashboard::from_geojson(config, &text, ChartJsHost::new(document), seed) {
            Ok(dash) => dash,
            Err(err) => {
                warn!(url, error = %err, "region source rejected");
                return;
            }
        };
        let source = match serde_json::from_str(&text) {
            Ok(document) => Some(geojson_source(document)),
            Err(err) => {
                warn!(url, error = %err, "region source not handed to the map");
                None
            }
        };
        with_view(|view| {
            view.dashboard = Some(dash);
            view.source = source;
            install_layers_when_ready(view);
        });
    });
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn request_frame(cb: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let cb = cb.borrow();
    let cb = cb.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

fn start_frame_loop() {
    let Some(cb) = with_view(|view| view.frame_cb.clone()) else {
        return;
    };
    let next = cb.clone();
    *cb.borrow_mut() = Some(Closure::new(move |time_ms: f64| {
        let keep_going = with_view(|view| run_frame(view, time_ms)).unwrap_or(false);
        if keep_going {
            let id = request_frame(&next);
            with_view(|view| view.raf_id = id);
        }
    }));
    let id = request_frame(&cb);
    with_view(|view| view.raf_id = id);
}

/// Returns whether another frame should be scheduled.
fn run_frame(view: &mut Mounted, time_ms: f64) -> bool {
    let Some(dash) = view.dashboard.as_mut() else {
        // Still loading.
        return true;
    };
    if dash.frame(time_ms, &view.map, view.overlay.as_mut()).is_none() {
        return false;
    }
    dash.panel().host().show_pulse(dash.state().pulse.visible());
    for stamped in dash.drain_events() {
        debug!(frame = stamped.frame_index, event = ?stamped.event, "dashboard event");
    }
    true
}

/// Tears the view down: stops the frame loop, destroys charts, removes the
/// overlay and the map. Removal errors are ignored.
#[wasm_bindgen]
pub fn destroy_dashboard() {
    let Some(mut view) = VIEW.try_with(|cell| cell.borrow_mut().take()).ok().flatten() else {
        return;
    };
    if let Some(id) = view.raf_id.take() {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
    if let Some(mut dash) = view.dashboard.take() {
        dash.teardown();
    }
    if let Some(overlay) = view.overlay.take() {
        overlay.detach();
    }
    let _ = view.map.map().remove();
    view.frame_cb.borrow_mut().take();
    view.handlers.clear();
    info!("dashboard destroyed");
}
