use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use eeg_core::api::{
    AnalyzeResponse, ApiConfig, EdaResponse, Endpoint, MetricsResponse, ModelsResponse,
    PredictResponse, API_BASE_ENV, DEFAULT_API_BASE,
};
use eeg_core::bands::BANDS;
use eeg_core::knowledge::electrode_info;
use eeg_core::report::{explain_prediction, MetricRow};
use eeg_core::{
    glb, project_electrodes, resolve_channels, HeadModel, ProjectionConfig,
    DEFAULT_CHANNEL_COUNT, HEAD_FIT_SIZE,
};
use serde::Serialize;

mod client;
use client::ServiceClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "EEG classification dashboard: service client and electrode tools")]
struct Args {
    /// Base URL of the analytics service
    #[arg(long, env = API_BASE_ENV, default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Liveness check
    Health,
    /// List trained model identifiers
    Models,
    /// Per-model evaluation metrics
    Metrics {
        /// Print the summary table instead of raw JSON
        #[arg(long)]
        table: bool,
    },
    /// Exploratory data analysis summary
    Eda,
    /// Descriptive features for one CSV recording
    Analyze { file: PathBuf },
    /// Classify one CSV recording
    Predict {
        file: PathBuf,
        /// Model to use (service default when omitted)
        #[arg(long)]
        model: Option<String>,
        /// Also run analyze and print a plain-language explanation
        #[arg(long)]
        explain: bool,
    },
    /// Project montage electrodes onto a head mesh and print marker positions
    Project {
        /// Binary glTF head model; markers keep their raw directions when omitted
        #[arg(long)]
        mesh: Option<PathBuf>,
        /// Comma-separated channel names (empty means the full montage)
        #[arg(long, value_delimiter = ',')]
        channels: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_CHANNEL_COUNT)]
        count: usize,
        #[arg(long)]
        min_scalp_y: Option<f32>,
        #[arg(long)]
        max_front_z: Option<f32>,
    },
    /// Describe an electrode
    Electrode { name: String },
    /// List EEG frequency bands
    Bands,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_model(mesh: Option<PathBuf>) -> anyhow::Result<Option<HeadModel>> {
    let Some(path) = mesh else {
        log::info!("[scene] no mesh given; markers keep their raw directions");
        return Ok(None);
    };
    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let mesh = glb::load_glb(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    Ok(Some(HeadModel::fitted(mesh, HEAD_FIT_SIZE)))
}

fn print_metrics_table(metrics: &MetricsResponse) {
    if metrics.metrics.is_empty() {
        println!("no metrics available{}", metrics.note.as_deref().map(|n| format!(": {n}")).unwrap_or_default());
        return;
    }
    println!("{:<24} {:>8} {:>8} {:>9} {:>8} {:>8}", "model", "accuracy", "roc_auc", "precision", "recall", "f1");
    for m in &metrics.metrics {
        let r = MetricRow::from_model(m);
        println!(
            "{:<24} {:>8.3} {:>8.3} {:>9.3} {:>8.3} {:>8.3}",
            r.name, r.accuracy, r.roc_auc, r.precision, r.recall, r.f1
        );
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ApiConfig::new(&args.api_base);
    match args.command {
        Command::Health => {
            let v: serde_json::Value = ServiceClient::new(config)?.get(Endpoint::Health)?;
            print_json(&v)
        }
        Command::Models => {
            let v: ModelsResponse = ServiceClient::new(config)?.get(Endpoint::Models)?;
            print_json(&v)
        }
        Command::Metrics { table } => {
            let v: MetricsResponse = ServiceClient::new(config)?.get(Endpoint::Metrics)?;
            if table {
                print_metrics_table(&v);
                Ok(())
            } else {
                print_json(&v)
            }
        }
        Command::Eda => {
            let v: EdaResponse = ServiceClient::new(config)?.get(Endpoint::Eda)?;
            print_json(&v)
        }
        Command::Analyze { file } => {
            let v: AnalyzeResponse = ServiceClient::new(config)?.upload(Endpoint::Analyze, &file)?;
            print_json(&v)
        }
        Command::Predict {
            file,
            model,
            explain,
        } => {
            let client = ServiceClient::new(config)?;
            let predicted: PredictResponse =
                client.upload(Endpoint::Predict { model_name: model }, &file)?;
            if !explain {
                return print_json(&predicted);
            }
            let analysis: Option<AnalyzeResponse> = match client.upload(Endpoint::Analyze, &file) {
                Ok(a) => Some(a),
                Err(e) => {
                    log::warn!("[api] analyze failed, explaining without features: {e:#}");
                    None
                }
            };
            print_json(&explain_prediction(&predicted, analysis.as_ref()))
        }
        Command::Project {
            mesh,
            channels,
            count,
            min_scalp_y,
            max_front_z,
        } => {
            let defaults = ProjectionConfig::default();
            let cfg = ProjectionConfig {
                min_scalp_y: min_scalp_y.unwrap_or(defaults.min_scalp_y),
                max_front_z: max_front_z.unwrap_or(defaults.max_front_z),
                ..defaults
            };
            let model = load_model(mesh)?;
            let electrodes = resolve_channels(&channels, count);
            print_json(&project_electrodes(model.as_ref(), &electrodes, &cfg))
        }
        Command::Electrode { name } => print_json(&electrode_info(&name)),
        Command::Bands => print_json(&BANDS),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_flags_parse() {
        let args = Args::try_parse_from([
            "eeg", "project", "--channels", "fp1,cz,oz", "--count", "8", "--min-scalp-y", "0.1",
        ])
        .unwrap();
        match args.command {
            Command::Project {
                channels,
                count,
                min_scalp_y,
                max_front_z,
                mesh,
            } => {
                assert_eq!(channels, vec!["fp1", "cz", "oz"]);
                assert_eq!(count, 8);
                assert_eq!(min_scalp_y, Some(0.1));
                assert_eq!(max_front_z, None);
                assert!(mesh.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn predict_takes_optional_model() {
        let args =
            Args::try_parse_from(["eeg", "--api-base", "http://svc", "predict", "t.csv", "--model", "rf"])
                .unwrap();
        assert_eq!(args.api_base, "http://svc");
        assert!(matches!(
            args.command,
            Command::Predict { model: Some(ref m), explain: false, .. } if m == "rf"
        ));
    }

    #[test]
    fn missing_mesh_leaves_markers_unprojected() {
        assert!(load_model(None).unwrap().is_none());
    }

    #[test]
    fn unreadable_mesh_is_an_error() {
        let err = load_model(Some(PathBuf::from("/nonexistent/head.glb"))).unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
