use eeg_core::api::{decode, AnalyzeResponse, FeatureValue, ModelMetrics, PredictResponse};
use eeg_core::bands::Band;
use eeg_core::report::{
    axis_ticks, best_model, explain_prediction, heat_color, label_text, model_stem, normalize,
    summarize_bands, top_features_text, ConfusionCells, MetricRow,
};
use pretty_assertions::assert_eq;

fn fv(feature: &str, value: f64) -> FeatureValue {
    FeatureValue {
        feature: feature.into(),
        value,
    }
}

#[test]
fn metric_row_uses_weighted_average_and_zero_defaults() {
    let m: ModelMetrics = serde_json::from_str(
        r#"{"name": "svm", "accuracy": 0.8,
            "report": {"weighted avg": {"precision": 0.81, "recall": 0.8, "f1-score": 0.79}}}"#,
    )
    .unwrap();
    let row = MetricRow::from_model(&m);
    assert_eq!(row.name, "svm");
    assert_eq!(row.roc_auc, 0.0);
    assert_eq!((row.precision, row.recall, row.f1), (0.81, 0.8, 0.79));

    let empty = MetricRow::from_model(&ModelMetrics::default());
    assert_eq!((empty.accuracy, empty.precision), (0.0, 0.0));
}

#[test]
fn best_model_prefers_auc_then_accuracy() {
    let row = |name: &str, accuracy, roc_auc| MetricRow {
        name: name.into(),
        accuracy,
        roc_auc,
        precision: 0.0,
        recall: 0.0,
        f1: 0.0,
    };
    let rows = vec![row("a", 0.9, 0.80), row("b", 0.7, 0.95), row("c", 0.8, 0.95)];
    assert_eq!(best_model(&rows), Some(2));
    assert_eq!(best_model(&[]), None);
}

#[test]
fn confusion_cells_follow_sklearn_layout() {
    let c = ConfusionCells::from_matrix(&[vec![50.0, 3.0], vec![4.0, 43.0]]);
    assert_eq!(c.labeled(), [("TN", 50.0), ("FP", 3.0), ("FN", 4.0), ("TP", 43.0)]);
    assert_eq!(c.total(), 100.0);
    assert_eq!(c.max(), 50.0);
    assert_eq!(ConfusionCells::from_matrix(&[]), ConfusionCells::default());
}

#[test]
fn heat_ramp_endpoints_and_clamping() {
    assert_eq!(heat_color(0.0), [99, 102, 241]);
    assert_eq!(heat_color(1.0), [236, 72, 153]);
    assert_eq!(heat_color(7.0), heat_color(1.0));
    assert_eq!(heat_color(f32::NAN), heat_color(0.0));
    assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
    assert_eq!(normalize(7.5, 5.0, 10.0), 0.5);
}

#[test]
fn axis_ticks_cover_both_ends() {
    assert_eq!(axis_ticks(10, 5).as_slice(), &[0, 2, 5, 7, 9]);
    assert_eq!(axis_ticks(3, 8).as_slice(), &[0, 1, 2]);
    assert!(axis_ticks(0, 4).is_empty());
    assert_eq!(axis_ticks(1, 4).as_slice(), &[0]);
}

#[test]
fn top_text_takes_five_with_three_decimals() {
    let features: Vec<_> = (0..7).map(|i| fv(&format!("bp_alpha_C{i}"), i as f64 + 0.12345)).collect();
    let text = top_features_text(&features);
    assert_eq!(text.split(" • ").count(), 5);
    assert!(text.starts_with("bp_alpha_C0=0.123 • bp_alpha_C1=1.123"));
}

#[test]
fn band_summary_counts_and_orders() {
    let features = vec![
        fv("bp_beta_CZ", 1.0),
        fv("bp_alpha_O1", 1.0),
        fv("bp_alpha_O2", 1.0),
        fv("bp_alpha_OZ", 1.0),
        fv("bp_alpha_PZ", 1.0),
        fv("mean_CZ", 1.0),
        fv("bp_theta_FZ", 1.0),
        fv("bp_beta_C3", 1.0),
    ];
    let s = summarize_bands(&features);
    assert_eq!(s.iter().map(|b| b.band).collect::<Vec<_>>(), vec![Band::Alpha, Band::Beta, Band::Theta]);
    assert_eq!(s[0].count, 4);
    assert_eq!(s[0].examples, vec!["Alpha@O1", "Alpha@O2", "Alpha@OZ"]);
    assert_eq!(s[1].examples, vec!["Beta@CZ", "Beta@C3"]);
}

#[test]
fn explanation_combines_prediction_and_analysis() {
    let predict = PredictResponse {
        pred_label: 1,
        pred_prob: 0.873,
        model_path: "artifacts/models/random_forest.joblib".into(),
        ..Default::default()
    };
    let analyze: AnalyzeResponse = decode(
        200,
        r#"{"bandpower_top10": [{"feature": "bp_gamma_T7", "value": 0.5}, {"feature": "bp_alpha_O1", "value": 0.25}]}"#,
    )
    .unwrap();
    let e = explain_prediction(&predict, Some(&analyze));
    assert_eq!(e.label_text, "Alcoholic (a=1)");
    assert!((e.probability_pct - 87.3).abs() < 1e-9);
    assert_eq!(e.model, "random_forest");
    assert_eq!(e.top_text, "bp_gamma_T7=0.500 • bp_alpha_O1=0.250");
    let ids: Vec<_> = e.citations.iter().map(|c| c.id).collect();
    // Alpha sorts before gamma on a tie, so its citations come first.
    assert_eq!(ids, vec!["wiki-eeg", "nibib-eeg", "mayo-eeg"]);

    let bare = explain_prediction(&PredictResponse::default(), None);
    assert_eq!(bare.label_text, label_text(0));
    assert!(bare.band_summaries.is_empty());
    assert!(bare.citations.is_empty());
}

#[test]
fn model_stem_handles_both_separators() {
    assert_eq!(model_stem(r"C:\models\svm.joblib"), "svm");
    assert_eq!(model_stem("rf"), "rf");
}
