//! Transport-agnostic description of the analytics service.
//!
//! The web and native frontends issue the HTTP requests themselves; this
//! module names the endpoints, builds URLs and decodes response bodies into
//! typed payloads. Every field is defaulted so partial JSON still renders.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const API_BASE_ENV: &str = "EEG_API_BASE";
pub const HEAD_ASSET_PATH: &str = "/head.glb";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the raw body text.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    /// Blank input falls back to the default base.
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(v) => Self::new(&v),
            Err(_) => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path_and_query())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Models,
    Metrics,
    Eda,
    /// Multipart upload with a `file` field.
    Analyze,
    /// Multipart upload with a `file` field.
    Predict { model_name: Option<String> },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Health | Endpoint::Models | Endpoint::Metrics | Endpoint::Eda => Method::Get,
            Endpoint::Analyze | Endpoint::Predict { .. } => Method::Post,
        }
    }

    pub fn is_upload(&self) -> bool {
        self.method() == Method::Post
    }

    pub fn path_and_query(&self) -> String {
        match self {
            Endpoint::Health => "/health".into(),
            Endpoint::Models => "/models".into(),
            Endpoint::Metrics => "/metrics".into(),
            Endpoint::Eda => "/eda".into(),
            Endpoint::Analyze => "/analyze".into(),
            Endpoint::Predict { model_name } => match model_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => {
                    format!("/predict?model_name={}", urlencoding::encode(name))
                }
                _ => "/predict".into(),
            },
        }
    }
}

pub const UPLOAD_FIELD: &str = "file";

/// The service only accepts CSV recordings.
pub fn check_upload_name(file_name: &str) -> Result<(), ApiError> {
    if file_name.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(ApiError::Rejected(format!(
            "only .csv recordings are accepted, got {:?}",
            file_name
        )))
    }
}

/// Decode a response: non-2xx becomes [`ApiError::Status`] with the raw body.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            message: body.trim().to_string(),
        });
    }
    let body = if body.trim().is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

// ---------------- payloads ----------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub note: Option<String>,
}

/// One entry of a classification report: per-class scores or a bare number
/// such as `accuracy`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Scores(BTreeMap<String, Option<f64>>),
    Scalar(f64),
    Other(serde_json::Value),
}

impl ReportEntry {
    pub fn score(&self, key: &str) -> Option<f64> {
        match self {
            ReportEntry::Scores(m) => m.get(key).copied().flatten(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelMetrics {
    pub name: String,
    pub accuracy: Option<f64>,
    pub roc_auc: Option<f64>,
    pub report: BTreeMap<String, ReportEntry>,
    pub confusion_matrix: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsResponse {
    pub metrics: Vec<ModelMetrics>,
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PredictResponse {
    pub pred_label: u8,
    pub pred_prob: f64,
    pub model_path: String,
    pub model_name: Option<String>,
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureValue {
    pub feature: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpectrogramSummary {
    pub shape: Vec<usize>,
    pub min: f64,
    pub max: f64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Spectrogram {
    pub f: Vec<f64>,
    pub t: Vec<f64>,
    /// Rows are frequencies, columns are time bins.
    pub z: Vec<Vec<f64>>,
    pub shape: Vec<usize>,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimePoint {
    pub t: f64,
    pub v: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PsdPoint {
    pub f: f64,
    pub p: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BandValue {
    pub band: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Charts {
    pub timeseries: Vec<TimePoint>,
    pub timeseries_by_channel: BTreeMap<String, Vec<TimePoint>>,
    pub channels: Vec<String>,
    pub psd: Vec<PsdPoint>,
    pub bandpower_by_band: Vec<BandValue>,
    pub spectrogram: Option<Spectrogram>,
    pub bandpower_top10: Vec<FeatureValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreprocessingSummary {
    pub fs_hz: Option<f64>,
    pub n_samples: Option<u64>,
    pub channels_used: Vec<String>,
    pub missing_policy: Option<String>,
    pub artifact_removal: Option<serde_json::Value>,
    pub features: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BandExplain {
    pub band: String,
    pub meaning: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub trial_number: Option<serde_json::Value>,
    pub channel_used_for_timeseries: Option<String>,
    pub spectrogram: Option<SpectrogramSummary>,
    pub bandpower_top10: Vec<FeatureValue>,
    pub charts: Charts,
    pub preprocessing_summary: Option<PreprocessingSummary>,
    pub eeg_bands_explain: Vec<BandExplain>,
}

impl AnalyzeResponse {
    /// Top bandpower features, from the top level or else from `charts`.
    pub fn top_features(&self) -> &[FeatureValue] {
        if self.bandpower_top10.is_empty() {
            &self.charts.bandpower_top10
        } else {
            &self.bandpower_top10
        }
    }

    /// Spectrogram summary, derived from the chart grid when absent.
    pub fn spectrogram_summary(&self) -> Option<SpectrogramSummary> {
        if let Some(s) = &self.spectrogram {
            return Some(s.clone());
        }
        let grid = self.charts.spectrogram.as_ref()?;
        let values: Vec<f64> = grid.z.iter().flatten().copied().collect();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(SpectrogramSummary {
            shape: vec![grid.z.len(), grid.z.first().map_or(0, Vec::len)],
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: Some(mean),
            std: Some(var.sqrt()),
        })
    }

    pub fn trial_label(&self) -> String {
        match &self.trial_number {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "n/a".into(),
            Some(v) => v.to_string(),
        }
    }
}

// ---------------- EDA ----------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelSummary {
    pub train_counts: BTreeMap<String, f64>,
    pub test_counts: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Leakage {
    pub train_n: Option<u64>,
    pub test_n: Option<u64>,
    pub basename_overlap_count: Option<u64>,
    pub md5_overlap_count: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PcaPoint {
    pub x: f64,
    pub y: f64,
    pub split: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DistributionShift {
    pub pca_points: Vec<PcaPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutlierSummary {
    pub iqr_outlier_top_features: Vec<serde_json::Value>,
    pub z_outlier_top_features: Vec<serde_json::Value>,
    pub skew_abs_top_features: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataQuality {
    pub bandpower_train: OutlierSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelValue {
    pub channel: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActionTaken {
    pub topic: String,
    pub how: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EdaSummary {
    pub label_summary: LabelSummary,
    pub leakage: Leakage,
    pub distribution_shift: DistributionShift,
    pub data_quality: DataQuality,
    pub feature_importance: BTreeMap<String, Vec<FeatureImportance>>,
    pub scalp_bandpower: BTreeMap<String, Vec<ChannelValue>>,
    pub actions_taken: Vec<ActionTaken>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EdaResponse {
    pub eda: Option<EdaSummary>,
    pub note: Option<String>,
    pub runtime: Option<serde_json::Value>,
}

/// Render an outlier-list entry (a bare name or an object) as one line.
pub fn describe_json_item(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(m) => m
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{}={}", k, s),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() != 0.0 => format!("{}={:.3}", k, f),
                    _ => format!("{}={}", k, n),
                },
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
