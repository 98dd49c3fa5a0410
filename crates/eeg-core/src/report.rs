//! View models derived from service payloads: metric tables, confusion
//! cells, heatmap colors and the plain-language prediction explanation.

use crate::api::{AnalyzeResponse, FeatureValue, ModelMetrics, PredictResponse};
use crate::bands::{citation, parse_band_from_feature, parse_channel_from_feature, Band, Citation};
use fnv::FnvHashMap;
use serde::Serialize;
use smallvec::SmallVec;

const WEIGHTED_AVG: &str = "weighted avg";
const TOP_TEXT_COUNT: usize = 5;
const TOP_BAND_COUNT: usize = 10;
const BAND_EXAMPLES: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricRow {
    pub name: String,
    pub accuracy: f64,
    pub roc_auc: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MetricRow {
    /// Weighted-average scores; missing values read as 0.
    pub fn from_model(m: &ModelMetrics) -> Self {
        let weighted = m.report.get(WEIGHTED_AVG);
        let score = |key: &str| weighted.and_then(|w| w.score(key)).unwrap_or(0.0);
        Self {
            name: m.name.clone(),
            accuracy: m.accuracy.unwrap_or(0.0),
            roc_auc: m.roc_auc.unwrap_or(0.0),
            precision: score("precision"),
            recall: score("recall"),
            f1: score("f1-score"),
        }
    }
}

/// Index of the row with the highest ROC AUC, ties going to accuracy.
pub fn best_model(rows: &[MetricRow]) -> Option<usize> {
    rows.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.roc_auc
                .total_cmp(&b.roc_auc)
                .then(a.accuracy.total_cmp(&b.accuracy))
        })
        .map(|(i, _)| i)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ConfusionCells {
    pub tn: f64,
    pub fp: f64,
    pub fn_: f64,
    pub tp: f64,
}

impl ConfusionCells {
    /// Binary matrix laid out as `[[tn, fp], [fn, tp]]`; missing cells are 0.
    pub fn from_matrix(cm: &[Vec<f64>]) -> Self {
        let at = |r: usize, c: usize| cm.get(r).and_then(|row| row.get(c)).copied().unwrap_or(0.0);
        Self {
            tn: at(0, 0),
            fp: at(0, 1),
            fn_: at(1, 0),
            tp: at(1, 1),
        }
    }

    pub fn total(&self) -> f64 {
        self.tn + self.fp + self.fn_ + self.tp
    }

    pub fn max(&self) -> f64 {
        self.tn.max(self.fp).max(self.fn_).max(self.tp)
    }

    /// `(label, value)` in reading order.
    pub fn labeled(&self) -> [(&'static str, f64); 4] {
        [("TN", self.tn), ("FP", self.fp), ("FN", self.fn_), ("TP", self.tp)]
    }
}

const HEAT_LOW: [f32; 3] = [99.0, 102.0, 241.0];
const HEAT_HIGH: [f32; 3] = [236.0, 72.0, 153.0];

/// Indigo to pink ramp for `t` in [0, 1].
pub fn heat_color(t: f32) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mix = |i: usize| (HEAT_LOW[i] + (HEAT_HIGH[i] - HEAT_LOW[i]) * t).round() as u8;
    [mix(0), mix(1), mix(2)]
}

pub fn heat_css(t: f32) -> String {
    let [r, g, b] = heat_color(t);
    format!("rgb({},{},{})", r, g, b)
}

/// Normalize `v` into [0, 1] over `[min, max]`; a flat range maps to 0.
pub fn normalize(v: f64, min: f64, max: f64) -> f32 {
    let span = max - min;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        return 0.0;
    }
    ((v - min) / span).clamp(0.0, 1.0) as f32
}

/// Up to `n` evenly spaced indices into a list of `len`, first and last included.
pub fn axis_ticks(len: usize, n: usize) -> SmallVec<[usize; 8]> {
    let mut out = SmallVec::new();
    if len == 0 || n == 0 {
        return out;
    }
    if n == 1 || len == 1 {
        out.push(0);
        return out;
    }
    let n = n.min(len);
    for i in 0..n {
        let idx = (i * (len - 1) + (n - 1) / 2) / (n - 1);
        if out.last() != Some(&idx) {
            out.push(idx);
        }
    }
    out
}

pub fn label_text(label: u8) -> &'static str {
    if label == 1 {
        "Alcoholic (a=1)"
    } else {
        "Control (c=0)"
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandSummary {
    pub band: Band,
    pub count: usize,
    /// `Label@CHANNEL`, at most three.
    pub examples: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionExplanation {
    pub label: u8,
    pub label_text: &'static str,
    pub probability_pct: f64,
    pub model: String,
    pub top_text: String,
    pub band_summaries: Vec<BandSummary>,
    pub citations: Vec<&'static Citation>,
}

/// `feature=value` pairs of the first five features, joined with " • ".
pub fn top_features_text(features: &[FeatureValue]) -> String {
    features
        .iter()
        .take(TOP_TEXT_COUNT)
        .map(|f| format!("{}={:.3}", f.feature, f.value))
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Count how often each band appears among the top ten features, most
/// frequent first (ties keep band order).
pub fn summarize_bands(features: &[FeatureValue]) -> Vec<BandSummary> {
    let mut by_band: FnvHashMap<Band, BandSummary> = FnvHashMap::default();
    for f in features.iter().take(TOP_BAND_COUNT) {
        let Some(band) = parse_band_from_feature(&f.feature) else {
            continue;
        };
        let entry = by_band.entry(band).or_insert_with(|| BandSummary {
            band,
            count: 0,
            examples: Vec::new(),
        });
        entry.count += 1;
        if entry.examples.len() < BAND_EXAMPLES {
            let ch = parse_channel_from_feature(&f.feature).unwrap_or_else(|| "?".into());
            entry.examples.push(format!("{}@{}", band.info().label, ch));
        }
    }
    let mut out: Vec<BandSummary> = by_band.into_values().collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.band.cmp(&b.band)));
    out
}

pub fn explain_prediction(
    predict: &PredictResponse,
    analyze: Option<&AnalyzeResponse>,
) -> PredictionExplanation {
    let features = analyze.map(|a| a.top_features()).unwrap_or(&[]);
    let band_summaries = summarize_bands(features);

    let mut citations: Vec<&'static Citation> = Vec::new();
    for s in &band_summaries {
        for id in s.band.info().citations {
            if let Some(c) = citation(id) {
                if !citations.iter().any(|seen| seen.id == c.id) {
                    citations.push(c);
                }
            }
        }
    }

    let model = predict
        .model_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| model_stem(&predict.model_path).to_string());

    PredictionExplanation {
        label: predict.pred_label,
        label_text: label_text(predict.pred_label),
        probability_pct: (predict.pred_prob * 100.0).clamp(0.0, 100.0),
        model,
        top_text: top_features_text(features),
        band_summaries,
        citations,
    }
}

/// File stem of a model path, accepting either separator.
pub fn model_stem(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file.rsplit_once('.').map_or(file, |(stem, _)| stem)
}
