use crate::api;
use crate::constants::*;
use crate::dom;
use crate::input;
use crate::overlay;
use crate::panels;
use crate::scene::SceneState;
use eeg_core::api::{AnalyzeResponse, ApiConfig, EdaResponse, Endpoint, PredictResponse};
use eeg_core::report::explain_prediction;
use eeg_core::OrbitCamera;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
pub struct Wiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub config: Rc<ApiConfig>,
    pub scene: Rc<RefCell<SceneState>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub drag: Rc<RefCell<input::DragState>>,
    pub eda: Rc<RefCell<EdaResponse>>,
}

impl Wiring {
    fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn pick_at(&self, pos: Vec2) -> Option<usize> {
        let size = self.canvas_size();
        let camera = self.orbit.borrow().camera(size.x / size.y.max(1.0));
        let ray = camera.screen_ray(pos, size);
        self.scene.borrow().pick(&ray)
    }

    /// Show an electrode in the info panel and highlight it on the scalp map.
    fn show_electrode(&self, name: &str) {
        panels::render_electrode(&self.document, name);
        panels::render_scalp(&self.document, &self.eda.borrow(), Some(name));
    }
}

pub fn wire_all(w: &Wiring) {
    wire_pointerdown(w);
    wire_pointermove(w);
    wire_pointerup(w);
    wire_wheel(w);
    wire_scene_controls(w);
    wire_scalp_map(w);
    wire_uploads(w);
    wire_overlay(&w.document);
}

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    listen(&target, "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        w.drag.borrow_mut().begin(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    listen(&target, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let delta = w.drag.borrow_mut().update(pos);
        if w.drag.borrow().active {
            if delta != Vec2::ZERO {
                w.orbit
                    .borrow_mut()
                    .drag(delta.x * DRAG_RADIANS_PER_PX, delta.y * DRAG_RADIANS_PER_PX);
            }
            return;
        }
        let hovered = w.pick_at(pos);
        w.scene.borrow_mut().set_hovered(hovered);
    });
}

fn wire_pointerup(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    listen(&target, "pointerup", move |ev: web::PointerEvent| {
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if !w.drag.borrow_mut().end(CLICK_SLOP_PX) {
            return;
        }
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let index = w.pick_at(pos);
        let name = w.scene.borrow_mut().select(index);
        if let Some(name) = name {
            log::info!("[scene] selected {}", name);
            w.show_electrode(&name);
        }
    });
}

fn wire_wheel(w: &Wiring) {
    let orbit = w.orbit.clone();
    let target = w.canvas.clone();
    listen(&target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let factor = input::wheel_zoom_factor(
            ev.delta_y() as f32,
            WHEEL_ZOOM_PER_PX,
            WHEEL_ZOOM_MIN_FACTOR,
            WHEEL_ZOOM_MAX_FACTOR,
        );
        orbit.borrow_mut().zoom(factor);
    });
}

fn wire_scene_controls(w: &Wiring) {
    let wt = w.clone();
    dom::add_click_listener(&w.document, VIEW_TOGGLE_ID, move || {
        let mode = wt.scene.borrow_mut().toggle_mode();
        dom::set_text(&wt.document, SCENE_INFO_ID, mode.label());
        log::info!("[scene] view {:?}", mode);
    });

    let wc = w.clone();
    dom::add_click_listener(&w.document, CHANNELS_APPLY_ID, move || {
        let text = dom::input_value(&wc.document, CHANNELS_INPUT_ID).unwrap_or_default();
        let channels = input::parse_channel_list(&text);
        log::info!("[scene] channel list: {} names", channels.len());
        wc.scene.borrow_mut().set_channels(channels);
    });
}

fn wire_scalp_map(w: &Wiring) {
    let wm = w.clone();
    dom::add_event_listener(&w.document, SCALP_ID, "click", move |ev| {
        let name = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest("[data-electrode]").ok().flatten())
            .and_then(|el| el.get_attribute("data-electrode"));
        if let Some(name) = name {
            wm.scene.borrow_mut().select_by_name(&name);
            wm.show_electrode(&name);
        }
    });

    let wb = w.clone();
    dom::add_event_listener(&w.document, SCALP_BAND_ID, "change", move |_| {
        panels::render_scalp(&wb.document, &wb.eda.borrow(), None);
    });
}

async fn run_predict(config: &ApiConfig, document: &web::Document, file: web::File) {
    let model_name = panels::selected_model(document);
    let predicted: PredictResponse = match api::upload(config, Endpoint::Predict { model_name }, &file).await {
        Ok(p) => p,
        Err(e) => {
            log::error!("[api] predict failed: {}", e);
            panels::show_result_error(document, Some(&e.to_string()));
            return;
        }
    };
    let analysis: Option<AnalyzeResponse> = match api::upload(config, Endpoint::Analyze, &file).await {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("[api] analyze failed, explaining without features: {}", e);
            None
        }
    };
    panels::render_prediction(document, &explain_prediction(&predicted, analysis.as_ref()));
    if let Some(a) = &analysis {
        panels::render_analysis(document, a);
    }
}

async fn run_analyze(config: &ApiConfig, document: &web::Document, file: web::File) {
    match api::upload::<AnalyzeResponse>(config, Endpoint::Analyze, &file).await {
        Ok(a) => {
            dom::set_html(document, RESULT_ID, "");
            panels::render_analysis(document, &a);
        }
        Err(e) => {
            log::error!("[api] analyze failed: {}", e);
            panels::show_result_error(document, Some(&e.to_string()));
        }
    }
}

fn wire_uploads(w: &Wiring) {
    for (id, predict) in [(PREDICT_BTN_ID, true), (ANALYZE_BTN_ID, false)] {
        let wu = w.clone();
        dom::add_click_listener(&w.document, id, move || {
            panels::show_result_error(&wu.document, None);
            let Some(file) = panels::selected_file(&wu.document) else {
                panels::show_result_error(&wu.document, Some("Choose a .csv recording first."));
                return;
            };
            let config = wu.config.clone();
            let document = wu.document.clone();
            spawn_local(async move {
                if predict {
                    run_predict(&config, &document, file).await;
                } else {
                    run_analyze(&config, &document, file).await;
                }
            });
        });
    }
}

fn wire_overlay(document: &web::Document) {
    let doc_toggle = document.clone();
    dom::add_click_listener(document, OVERLAY_TOGGLE_ID, move || overlay::toggle(&doc_toggle));
    let doc_close = document.clone();
    dom::add_click_listener(document, OVERLAY_CLOSE_ID, move || overlay::hide(&doc_close));
}
