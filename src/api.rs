//! Browser fetch layer over the shared endpoint description.
//!
//! Every call is a single request with no retry; failures come back as
//! `ApiError` and are shown inline by the caller.

use crate::constants::META_API_BASE;
use crate::dom;
use eeg_core::api::{
    check_upload_name, decode, ApiConfig, ApiError, Endpoint, HEAD_ASSET_PATH, UPLOAD_FIELD,
};
use eeg_core::{glb, HeadModel, HEAD_FIT_SIZE};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Base URL from `<meta name="eeg-api-base">`, else the default.
pub fn config_from_document(document: &web::Document) -> ApiConfig {
    match dom::meta_content(document, META_API_BASE) {
        Some(base) => ApiConfig::new(&base),
        None => ApiConfig::default(),
    }
}

fn js_err(e: JsValue) -> ApiError {
    ApiError::Network(
        e.as_string()
            .or_else(|| {
                e.dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{e:?}")),
    )
}

async fn send(url: &str, init: &web::RequestInit) -> Result<web::Response, ApiError> {
    let window = web::window().ok_or_else(|| ApiError::Network("no window".into()))?;
    let request = web::Request::new_with_str_and_init(url, init).map_err(js_err)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    resp.dyn_into::<web::Response>().map_err(js_err)
}

async fn finish<T: DeserializeOwned>(resp: web::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();
    decode(status, &text)
}

pub async fn get_json<T: DeserializeOwned>(config: &ApiConfig, endpoint: Endpoint) -> Result<T, ApiError> {
    let url = config.url(&endpoint);
    log::info!("[api] GET {}", url);
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_mode(web::RequestMode::Cors);
    finish(send(&url, &init).await?).await
}

/// POST a user-selected CSV file as multipart field `file`.
pub async fn upload<T: DeserializeOwned>(
    config: &ApiConfig,
    endpoint: Endpoint,
    file: &web::File,
) -> Result<T, ApiError> {
    let name = file.name();
    check_upload_name(&name)?;
    let form = web::FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &name)
        .map_err(js_err)?;

    let url = config.url(&endpoint);
    log::info!("[api] POST {} ({})", url, name);
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::Cors);
    init.set_body(&form);
    finish(send(&url, &init).await?).await
}

async fn asset_exists(path: &str) -> bool {
    let init = web::RequestInit::new();
    init.set_method("HEAD");
    match send(path, &init).await {
        Ok(resp) => resp.ok(),
        Err(_) => false,
    }
}

async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let init = web::RequestInit::new();
    init.set_method("GET");
    let resp = send(path, &init).await?;
    if !resp.ok() {
        anyhow::bail!("{} returned {}", path, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// The static head mesh fitted to the scene, or `None` when the asset is
/// missing or unreadable and the placeholder head stays.
pub async fn load_head_model() -> Option<HeadModel> {
    if !asset_exists(HEAD_ASSET_PATH).await {
        log::info!("[scene] {} not found; keeping the placeholder head", HEAD_ASSET_PATH);
        return None;
    }
    let loaded = fetch_bytes(HEAD_ASSET_PATH)
        .await
        .and_then(|bytes| glb::load_glb(&bytes).map_err(anyhow::Error::from));
    match loaded {
        Ok(mesh) => {
            log::info!(
                "[scene] loaded {} ({} triangles)",
                HEAD_ASSET_PATH,
                mesh.triangle_count()
            );
            Some(HeadModel::fitted(mesh, HEAD_FIT_SIZE))
        }
        Err(e) => {
            log::info!("[scene] {} unusable ({e:#}); keeping the placeholder head", HEAD_ASSET_PATH);
            None
        }
    }
}
