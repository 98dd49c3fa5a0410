//! DOM panels fed by service responses. Each renderer replaces the whole
//! panel; missing data renders as an empty-state line.

use crate::charts;
use crate::constants::*;
use crate::dom::{self, escape_html as esc};
use eeg_core::api::{describe_json_item, AnalyzeResponse, EdaResponse, MetricsResponse, ModelsResponse};
use eeg_core::bands::BANDS;
use eeg_core::demo::{band_shares, trial_matrix, DEMO_SAMPLE_RATE_HZ};
use eeg_core::knowledge::electrode_info;
use eeg_core::report::{best_model, heat_css, normalize, ConfusionCells, MetricRow, PredictionExplanation};
use eeg_core::scalp::{render_svg, scalp_heat};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn set_status(document: &web::Document, text: &str, is_error: bool) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
        let cl = el.class_list();
        if is_error {
            _ = cl.add_1("error");
        } else {
            _ = cl.remove_1("error");
        }
    }
}

pub fn show_result_error(document: &web::Document, message: Option<&str>) {
    dom::set_text(document, RESULT_ERROR_ID, message.unwrap_or(""));
}

pub fn fill_models(document: &web::Document, models: &ModelsResponse) {
    let mut html = String::from(r#"<option value="">service default</option>"#);
    for m in &models.models {
        html.push_str(&format!(r#"<option value="{0}">{0}</option>"#, esc(m)));
    }
    dom::set_html(document, MODELS_SELECT_ID, &html);
    log::info!("[panel] {} models", models.models.len());
}

/// Selected model id, `None` for the service default.
pub fn selected_model(document: &web::Document) -> Option<String> {
    document
        .get_element_by_id(MODELS_SELECT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
        .map(|s| s.value())
        .filter(|v| !v.trim().is_empty())
}

pub fn selected_file(document: &web::Document) -> Option<web::File> {
    document
        .get_element_by_id(FILE_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

pub fn render_metrics(document: &web::Document, metrics: &MetricsResponse) {
    if metrics.metrics.is_empty() {
        let note = metrics.note.as_deref().unwrap_or("No metrics available yet.");
        dom::set_html(document, METRICS_ID, &format!("<p class=\"empty\">{}</p>", esc(note)));
        dom::set_html(document, CONFUSION_ID, "");
        return;
    }
    let rows: Vec<MetricRow> = metrics.metrics.iter().map(MetricRow::from_model).collect();
    let best = best_model(&rows);
    let mut html = String::from(
        "<table><thead><tr><th>Model</th><th>Accuracy</th><th>ROC AUC</th><th>Precision</th><th>Recall</th><th>F1</th></tr></thead><tbody>",
    );
    for (i, r) in rows.iter().enumerate() {
        let class = if best == Some(i) { " class=\"best\"" } else { "" };
        html.push_str(&format!(
            "<tr{class}><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>",
            esc(&r.name),
            r.accuracy,
            r.roc_auc,
            r.precision,
            r.recall,
            r.f1
        ));
    }
    html.push_str("</tbody></table>");
    if let Some(note) = &metrics.note {
        html.push_str(&format!("<p class=\"note\">{}</p>", esc(note)));
    }
    dom::set_html(document, METRICS_ID, &html);

    let mut grids = String::new();
    for m in &metrics.metrics {
        let cells = ConfusionCells::from_matrix(&m.confusion_matrix);
        if cells.total() <= 0.0 {
            continue;
        }
        let max = cells.max();
        grids.push_str(&format!("<div class=\"cm\"><h4>{}</h4><div class=\"cm-grid\">", esc(&m.name)));
        for (label, v) in cells.labeled() {
            grids.push_str(&format!(
                "<div class=\"cm-cell\" style=\"background:{}\"><span>{label}</span><b>{v}</b></div>",
                heat_css(normalize(v, 0.0, max))
            ));
        }
        grids.push_str("</div></div>");
    }
    dom::set_html(document, CONFUSION_ID, &grids);
    log::info!("[panel] metrics for {} models", rows.len());
}

fn counts_text(counts: &std::collections::BTreeMap<String, f64>) -> String {
    if counts.is_empty() {
        return "n/a".into();
    }
    counts
        .iter()
        .map(|(k, v)| format!("{}: {}", esc(k), v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn opt_num(v: Option<u64>) -> String {
    v.map_or_else(|| "n/a".into(), |n| n.to_string())
}

pub fn render_eda(document: &web::Document, response: &EdaResponse) {
    let Some(eda) = &response.eda else {
        let note = response.note.as_deref().unwrap_or("No EDA summary available.");
        dom::set_html(document, EDA_ID, &format!("<p class=\"empty\">{}</p>", esc(note)));
        if let Some(c) = dom::canvas_by_id(document, PCA_CANVAS_ID) {
            charts::draw_empty(&c, "no PCA points");
        }
        return;
    };
    let mut html = String::new();
    html.push_str(&format!(
        "<h4>Labels</h4><p>train {}<br>test {}</p>",
        counts_text(&eda.label_summary.train_counts),
        counts_text(&eda.label_summary.test_counts)
    ));
    let l = &eda.leakage;
    html.push_str(&format!(
        "<h4>Leakage</h4><p>train {} / test {} &middot; basename overlap {} &middot; md5 overlap {}</p>",
        opt_num(l.train_n),
        opt_num(l.test_n),
        opt_num(l.basename_overlap_count),
        opt_num(l.md5_overlap_count)
    ));
    let q = &eda.data_quality.bandpower_train;
    for (title, items) in [
        ("IQR outliers", &q.iqr_outlier_top_features),
        ("Z-score outliers", &q.z_outlier_top_features),
        ("Skewed features", &q.skew_abs_top_features),
    ] {
        if items.is_empty() {
            continue;
        }
        html.push_str(&format!("<h4>{title}</h4><ul>"));
        for item in items.iter().take(5) {
            html.push_str(&format!("<li>{}</li>", esc(&describe_json_item(item))));
        }
        html.push_str("</ul>");
    }
    for (model, features) in &eda.feature_importance {
        html.push_str(&format!("<h4>Top features: {}</h4><ol>", esc(model)));
        for f in features.iter().take(8) {
            html.push_str(&format!("<li>{} ({:.4})</li>", esc(&f.feature), f.importance));
        }
        html.push_str("</ol>");
    }
    if !eda.actions_taken.is_empty() {
        html.push_str("<h4>Actions taken</h4><ul>");
        for a in &eda.actions_taken {
            html.push_str(&format!("<li><b>{}</b>: {}</li>", esc(&a.topic), esc(&a.how)));
        }
        html.push_str("</ul>");
    }
    dom::set_html(document, EDA_ID, &html);

    if let Some(c) = dom::canvas_by_id(document, PCA_CANVAS_ID) {
        charts::draw_scatter(&c, &eda.distribution_shift.pca_points, CHART_PAD_PX);
    }

    let bands: Vec<&String> = eda.scalp_bandpower.keys().collect();
    let options: String = bands
        .iter()
        .map(|b| format!(r#"<option value="{0}">{0}</option>"#, esc(b)))
        .collect();
    dom::set_html(document, SCALP_BAND_ID, &options);
    render_scalp(document, response, None);
    log::info!("[panel] EDA rendered ({} scalp bands)", bands.len());
}

fn selected_scalp_band(document: &web::Document) -> Option<String> {
    document
        .get_element_by_id(SCALP_BAND_ID)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
        .map(|s| s.value())
        .filter(|v| !v.is_empty())
}

/// Scalp map with the selected band's heat overlay and an optional highlighted electrode.
pub fn render_scalp(document: &web::Document, eda: &EdaResponse, selected: Option<&str>) {
    let heat = eda
        .eda
        .as_ref()
        .and_then(|e| {
            let band = selected_scalp_band(document);
            match band {
                Some(b) => e.scalp_bandpower.get(&b),
                None => e.scalp_bandpower.values().next(),
            }
        })
        .map(|values| scalp_heat(values))
        .unwrap_or_default();
    dom::set_html(document, SCALP_ID, &render_svg(selected, &heat));
}

pub fn render_electrode(document: &web::Document, name: &str) {
    let info = electrode_info(name);
    let mut html = format!(
        "<h3>{}</h3><p class=\"region\" style=\"color:{}\">{}{}</p><p>{}</p>",
        esc(&info.name),
        info.region.css_color(),
        info.region.label(),
        if info.generic { " (general notes)" } else { "" },
        esc(info.summary)
    );
    html.push_str(&format!(
        "<p><b>Higher activity:</b> {}</p><p><b>Lower activity:</b> {}</p><p class=\"caution\">{}</p>",
        esc(info.increase),
        esc(info.decrease),
        esc(info.caution)
    ));
    if !info.sources.is_empty() {
        html.push_str("<ul class=\"sources\">");
        for s in &info.sources {
            html.push_str(&format!(
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a> (accessed {})</li>",
                esc(s.url),
                esc(s.title),
                esc(s.accessed)
            ));
        }
        html.push_str("</ul>");
    }
    dom::set_html(document, ELECTRODE_ID, &html);
}

pub fn render_bands(document: &web::Document) {
    let mut html = String::from("<table><thead><tr><th>Band</th><th>Range</th><th>Meaning</th></tr></thead><tbody>");
    for b in BANDS.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}<br><small>{}</small></td></tr>",
            b.label,
            b.range_text(),
            esc(b.meaning),
            esc(b.caution)
        ));
    }
    html.push_str("</tbody></table>");
    dom::set_html(document, BANDS_ID, &html);
}

pub fn render_prediction(document: &web::Document, e: &PredictionExplanation) {
    let mut html = format!(
        "<div class=\"prediction label-{}\"><h3>{}</h3><p>{:.1}% confidence &middot; model {}</p></div>",
        e.label,
        e.label_text,
        e.probability_pct,
        esc(&e.model)
    );
    if !e.top_text.is_empty() {
        html.push_str(&format!("<p class=\"top\">{}</p>", esc(&e.top_text)));
    }
    if !e.band_summaries.is_empty() {
        html.push_str("<ul class=\"bands\">");
        for s in &e.band_summaries {
            let info = s.band.info();
            html.push_str(&format!(
                "<li><b>{}</b> ({}) &times;{}: {} <small>{}</small></li>",
                info.label,
                info.range_text(),
                s.count,
                esc(&s.examples.join(", ")),
                esc(info.meaning)
            ));
        }
        html.push_str("</ul>");
    }
    if !e.citations.is_empty() {
        html.push_str("<p class=\"sources\">");
        for c in &e.citations {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a> ",
                esc(c.url),
                esc(c.title)
            ));
        }
        html.push_str("</p>");
    }
    dom::set_html(document, RESULT_ID, &html);
}

pub fn render_analysis(document: &web::Document, a: &AnalyzeResponse) {
    let mut html = format!("<p>Trial {}</p>", esc(&a.trial_label()));
    if let Some(s) = a.spectrogram_summary() {
        html.push_str(&format!(
            "<p>Spectrogram {:?} &middot; min {:.3} &middot; max {:.3}{}</p>",
            s.shape,
            s.min,
            s.max,
            match (s.mean, s.std) {
                (Some(m), Some(sd)) => format!(" &middot; mean {m:.3} &middot; std {sd:.3}"),
                _ => String::new(),
            }
        ));
    }
    if let Some(p) = &a.preprocessing_summary {
        html.push_str(&format!(
            "<p>{} samples at {} Hz, {} channels, missing values: {}</p>",
            opt_num(p.n_samples),
            p.fs_hz.map_or_else(|| "n/a".into(), |f| format!("{f}")),
            p.channels_used.len(),
            esc(p.missing_policy.as_deref().unwrap_or("n/a"))
        ));
    }
    let features = a.top_features();
    if !features.is_empty() {
        html.push_str("<ol class=\"features\">");
        for f in features {
            html.push_str(&format!("<li>{} = {:.4}</li>", esc(&f.feature), f.value));
        }
        html.push_str("</ol>");
    }
    if let Some(existing) = document.get_element_by_id(RESULT_ID) {
        existing.insert_adjacent_html("beforeend", &html).ok();
    }

    let charts_data = &a.charts;
    if let Some(c) = dom::canvas_by_id(document, SPECTRO_CANVAS_ID) {
        match &charts_data.spectrogram {
            Some(grid) => charts::draw_heatmap(&c, grid, SPECTRO_TICKS, CHART_PAD_PX),
            None => charts::draw_empty(&c, "no spectrogram"),
        }
    }
    if let Some(c) = dom::canvas_by_id(document, PSD_CANVAS_ID) {
        let pts: Vec<(f64, f64)> = charts_data.psd.iter().map(|p| (p.f, p.p)).collect();
        charts::draw_line(&c, &pts, "Hz", CHART_PAD_PX);
    }
    if let Some(c) = dom::canvas_by_id(document, SIGNAL_CANVAS_ID) {
        let pts: Vec<(f64, f64)> = charts_data.timeseries.iter().map(|p| (p.t, p.v)).collect();
        charts::draw_line(&c, &pts, "s", CHART_PAD_PX);
    }
    if let Some(c) = dom::canvas_by_id(document, BANDPOWER_CANVAS_ID) {
        let bars: Vec<(String, f64, String)> = charts_data
            .bandpower_by_band
            .iter()
            .map(|b| (b.band.clone(), b.value, heat_css(0.5)))
            .collect();
        charts::draw_bars(&c, &bars, CHART_PAD_PX);
    }
}

/// Offline placeholder charts when the service cannot be reached.
pub fn render_demo(document: &web::Document) {
    let trial = trial_matrix(DEMO_SEED, DEMO_CHANNELS, DEMO_SAMPLE_RATE_HZ as usize);
    if let (Some(c), Some(first)) = (dom::canvas_by_id(document, SIGNAL_CANVAS_ID), trial.first()) {
        let pts: Vec<(f64, f64)> = first
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64 / DEMO_SAMPLE_RATE_HZ as f64, *v as f64))
            .collect();
        charts::draw_line(&c, &pts, "s (demo)", CHART_PAD_PX);
    }
    if let Some(c) = dom::canvas_by_id(document, BANDPOWER_CANVAS_ID) {
        let bars: Vec<(String, f64, String)> = band_shares(DEMO_SEED)
            .into_iter()
            .enumerate()
            .map(|(i, (band, share))| {
                let t = i as f32 / 4.0;
                (band.info().label.to_string(), share as f64, heat_css(t))
            })
            .collect();
        charts::draw_bars(&c, &bars, CHART_PAD_PX);
    }
    log::info!("[panel] showing demo signals");
}
