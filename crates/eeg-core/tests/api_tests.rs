use eeg_core::api::{
    check_upload_name, decode, AnalyzeResponse, ApiConfig, ApiError, EdaResponse, Endpoint,
    MetricsResponse, Method, ModelsResponse, PredictResponse, DEFAULT_API_BASE,
};
use pretty_assertions::assert_eq;

#[test]
fn base_url_is_trimmed_and_defaulted() {
    assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_BASE);
    assert_eq!(ApiConfig::new("http://svc:9000///").base_url(), "http://svc:9000");
    assert_eq!(ApiConfig::new("   ").base_url(), DEFAULT_API_BASE);
}

#[test]
fn endpoints_map_to_paths_and_methods() {
    let cfg = ApiConfig::new("http://svc");
    assert_eq!(cfg.url(&Endpoint::Health), "http://svc/health");
    assert_eq!(cfg.url(&Endpoint::Eda), "http://svc/eda");
    assert_eq!(Endpoint::Models.method(), Method::Get);
    assert!(Endpoint::Analyze.is_upload());
    assert_eq!(
        cfg.url(&Endpoint::Predict { model_name: Some("logreg v2/final".into()) }),
        "http://svc/predict?model_name=logreg%20v2%2Ffinal"
    );
    assert_eq!(
        cfg.url(&Endpoint::Predict { model_name: Some("  ".into()) }),
        "http://svc/predict"
    );
    assert_eq!(cfg.url(&Endpoint::Predict { model_name: None }), "http://svc/predict");
}

#[test]
fn non_success_status_surfaces_raw_body() {
    let err = decode::<ModelsResponse>(422, "Only .csv files are supported\n").unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Only .csv files are supported");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_fields_decode_to_empty_state() {
    let m: MetricsResponse = decode(200, r#"{"note": "run training first"}"#).unwrap();
    assert!(m.metrics.is_empty());
    assert_eq!(m.note.as_deref(), Some("run training first"));
    let models: ModelsResponse = decode(200, "").unwrap();
    assert!(models.models.is_empty());
    assert!(matches!(decode::<ModelsResponse>(200, "not json"), Err(ApiError::Decode(_))));
}

#[test]
fn metrics_report_accepts_scores_and_scalars() {
    let body = r#"{"metrics": [{
        "name": "rf",
        "accuracy": 0.91,
        "roc_auc": null,
        "report": {
            "0": {"precision": 0.9, "recall": 0.92, "f1-score": 0.91, "support": 60},
            "accuracy": 0.91,
            "weighted avg": {"precision": 0.91, "recall": 0.91, "f1-score": 0.91, "support": 120}
        },
        "confusion_matrix": [[55, 5], [6, 54]]
    }]}"#;
    let m: MetricsResponse = decode(200, body).unwrap();
    let rf = &m.metrics[0];
    assert_eq!(rf.roc_auc, None);
    assert_eq!(rf.report["weighted avg"].score("recall"), Some(0.91));
    assert_eq!(rf.report["accuracy"].score("recall"), None);
    assert_eq!(rf.confusion_matrix[1][1], 54.0);
}

#[test]
fn analyze_reads_top_level_and_chart_features() {
    let top: AnalyzeResponse = decode(
        200,
        r#"{"trial_number": 12, "spectrogram": {"shape": [33, 10], "min": 0.1, "max": 9.0, "mean": 2.0, "std": 1.0},
            "bandpower_top10": [{"feature": "bp_alpha_O1", "value": 3.5}]}"#,
    )
    .unwrap();
    assert_eq!(top.trial_label(), "12");
    assert_eq!(top.top_features()[0].feature, "bp_alpha_O1");
    assert_eq!(top.spectrogram_summary().unwrap().shape, vec![33, 10]);

    let charts: AnalyzeResponse = decode(
        200,
        r#"{"charts": {"bandpower_top10": [{"feature": "bp_beta_CZ", "value": 1.0}],
            "spectrogram": {"f": [1, 2], "t": [0, 1], "z": [[1, 3], [5, 7]]}}}"#,
    )
    .unwrap();
    assert_eq!(charts.trial_label(), "n/a");
    assert_eq!(charts.top_features()[0].feature, "bp_beta_CZ");
    let s = charts.spectrogram_summary().unwrap();
    assert_eq!(s.shape, vec![2, 2]);
    assert_eq!((s.min, s.max, s.mean), (1.0, 7.0, Some(4.0)));
}

#[test]
fn predict_and_eda_decode() {
    let p: PredictResponse =
        decode(200, r#"{"pred_label": 1, "pred_prob": 0.83, "model_path": "models/rf.joblib"}"#).unwrap();
    assert_eq!(p.pred_label, 1);
    assert_eq!(p.model_name, None);

    let eda: EdaResponse = decode(
        200,
        r#"{"eda": {"label_summary": {"train_counts": {"a": 300, "c": 300}},
                    "leakage": {"train_n": 600, "test_n": 120, "md5_overlap_count": 0},
                    "scalp_bandpower": {"alpha": [{"channel": "O1", "value": 2.5}]},
                    "actions_taken": [{"topic": "EOG", "how": "ICA"}]},
             "runtime": {"eog_clean": true}}"#,
    )
    .unwrap();
    let summary = eda.eda.unwrap();
    assert_eq!(summary.label_summary.train_counts["a"], 300.0);
    assert_eq!(summary.leakage.basename_overlap_count, None);
    assert_eq!(summary.scalp_bandpower["alpha"][0].channel, "O1");
    assert_eq!(summary.actions_taken[0].how, "ICA");
}

#[test]
fn uploads_must_be_csv() {
    assert!(check_upload_name("trial_001.CSV").is_ok());
    assert!(matches!(check_upload_name("trial.edf"), Err(ApiError::Rejected(_))));
}
