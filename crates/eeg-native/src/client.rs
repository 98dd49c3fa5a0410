use anyhow::Context;
use eeg_core::api::{check_upload_name, decode, ApiConfig, ApiError, Endpoint, UPLOAD_FIELD};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Blocking client for the analytics service.
pub struct ServiceClient {
    config: ApiConfig,
    http: reqwest::blocking::Client,
}

impl ServiceClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("eeg-native/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.config.url(&endpoint);
        log::info!("[api] GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::finish(resp)
    }

    /// Upload a recording as multipart field `file`.
    pub fn upload<T: DeserializeOwned>(&self, endpoint: Endpoint, path: &Path) -> anyhow::Result<T> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?
            .to_string();
        check_upload_name(&file_name)?;
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let part = reqwest::blocking::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = reqwest::blocking::multipart::Form::new().part(UPLOAD_FIELD, part);

        let url = self.config.url(&endpoint);
        log::info!("[api] POST {}", url);
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self::finish(resp)?)
    }

    fn finish<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, ApiError> {
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| ApiError::Network(e.to_string()))?;
        decode(status, &body)
    }
}
