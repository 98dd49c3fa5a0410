#![cfg(target_arch = "wasm32")]
use eeg_core::api::{ApiConfig, EdaResponse, Endpoint, MetricsResponse, ModelsResponse};
use eeg_core::{primitives, HeadModel, OrbitCamera};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod charts;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod panels;
mod render;
mod scene;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Fetch the service panels. Each request fails on its own and reports inline.
fn load_service_data(config: Rc<ApiConfig>, document: web::Document, eda: Rc<RefCell<EdaResponse>>) {
    spawn_local(async move {
        match api::get_json::<serde_json::Value>(&config, Endpoint::Health).await {
            Ok(v) => {
                log::info!("[api] health {}", v);
                panels::set_status(&document, &format!("Service online at {}", config.base_url()), false);
            }
            Err(e) => {
                log::warn!("[api] health check failed: {}", e);
                panels::set_status(&document, &format!("Service unreachable: {e}"), true);
                panels::render_demo(&document);
            }
        }

        match api::get_json::<ModelsResponse>(&config, Endpoint::Models).await {
            Ok(models) => panels::fill_models(&document, &models),
            Err(e) => log::warn!("[api] models failed: {}", e),
        }

        match api::get_json::<MetricsResponse>(&config, Endpoint::Metrics).await {
            Ok(metrics) => panels::render_metrics(&document, &metrics),
            Err(e) => dom::set_text(&document, METRICS_ID, &e.to_string()),
        }

        match api::get_json::<EdaResponse>(&config, Endpoint::Eda).await {
            Ok(response) => {
                *eda.borrow_mut() = response;
                panels::render_eda(&document, &eda.borrow());
            }
            Err(e) => {
                dom::set_text(&document, EDA_ID, &e.to_string());
                panels::render_scalp(&document, &EdaResponse::default(), None);
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("eeg-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let config = Rc::new(api::config_from_document(&document));
    log::info!("[api] base {}", config.base_url());

    panels::render_bands(&document);
    panels::render_electrode(&document, "CZ");

    let scene = Rc::new(RefCell::new(scene::SceneState::new(HeadModel::identity(
        primitives::fallback_head(),
    ))));
    dom::set_text(&document, SCENE_INFO_ID, scene.borrow().mode.label());
    let wiring = events::Wiring {
        document: document.clone(),
        canvas: canvas.clone(),
        config: config.clone(),
        scene: scene.clone(),
        orbit: Rc::new(RefCell::new(OrbitCamera::default())),
        drag: Rc::new(RefCell::new(input::DragState::default())),
        eda: Rc::new(RefCell::new(EdaResponse::default())),
    };
    events::wire_all(&wiring);

    load_service_data(config, document.clone(), wiring.eda.clone());

    let scene_for_mesh = scene.clone();
    spawn_local(async move {
        if let Some(model) = api::load_head_model().await {
            scene_for_mesh.borrow_mut().set_head_model(model);
        }
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        scene,
        orbit: wiring.orbit.clone(),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
