mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::RenderConfig;
use erp_lib::{
    erp::{compute_erp_with_report, extract_segment, time_axis, FingerPolicy},
    io::{matrix::write_erp_csv, signal::read_signal, trials::read_trials},
    plot::{figure_from_erp, PlotBackend},
    signal::TrialSchema,
};
use log::info;
use render::PlottersBackend;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "erp",
    version,
    about = "Finger-movement ERP averaging for single-channel ECOG"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average each finger's -200..+1000 sample windows and plot them
    Mean {
        /// Trial table: header row, then integer start, peak and finger columns
        #[arg(long)]
        trials: PathBuf,
        /// Headerless single-column signal samples
        #[arg(long)]
        signal: PathBuf,
        /// PNG destination (overrides the config file)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also export the matrix as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// TOML chart settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Fail on finger ids outside 1..5 instead of ignoring them
        #[arg(long)]
        strict_fingers: bool,
        /// Print per-finger trial counts alongside the matrix
        #[arg(long)]
        report: bool,
        /// Zero-based column holding the onset index
        #[arg(long, default_value_t = 0)]
        start_col: usize,
        /// Zero-based column holding the peak index
        #[arg(long, default_value_t = 1)]
        peak_col: usize,
        /// Zero-based column holding the finger number
        #[arg(long, default_value_t = 2)]
        finger_col: usize,
    },
    /// Print the window around one onset, or null when it leaves the signal
    Segment {
        /// Headerless single-column signal samples
        #[arg(long)]
        signal: PathBuf,
        /// Onset sample index
        #[arg(long, allow_hyphen_values = true)]
        start: i64,
    },
    /// Print the relative time of every matrix column
    TimeAxis,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Mean {
            trials,
            signal,
            out,
            csv,
            config,
            strict_fingers,
            report,
            start_col,
            peak_col,
            finger_col,
        } => {
            let schema = TrialSchema {
                start_col,
                peak_col,
                finger_col,
            };
            let mut render_cfg = match config {
                Some(path) => RenderConfig::load(&path)?,
                None => RenderConfig::default(),
            };
            if let Some(out) = out {
                render_cfg.output = out;
            }
            let policy = if strict_fingers {
                FingerPolicy::Reject
            } else {
                FingerPolicy::Ignore
            };
            cmd_mean(
                &trials,
                &signal,
                &schema,
                policy,
                &render_cfg,
                csv.as_deref(),
                report,
            )?
        }
        Commands::Segment { signal, start } => cmd_segment(&signal, start)?,
        Commands::TimeAxis => println!("{}", serde_json::to_string(&time_axis())?),
    }
    Ok(())
}

fn cmd_mean(
    trials_path: &Path,
    signal_path: &Path,
    schema: &TrialSchema,
    policy: FingerPolicy,
    render_cfg: &RenderConfig,
    csv_out: Option<&Path>,
    report: bool,
) -> Result<()> {
    let trials = read_trials(trials_path, schema)?;
    let signal = read_signal(signal_path)?;
    info!(
        "loaded {} trials and {} samples",
        trials.len(),
        signal.len()
    );
    let summary = compute_erp_with_report(&trials, &signal, policy)?;
    if summary.unmatched > 0 {
        info!("{} trial(s) matched no finger", summary.unmatched);
    }

    let mut fig = figure_from_erp(&summary.matrix);
    if let Some(title) = &render_cfg.title {
        fig.title = Some(title.clone());
    }
    let mut backend =
        PlottersBackend::new(&render_cfg.output, (render_cfg.width, render_cfg.height));
    backend.draw(&fig)?;
    info!("chart written to {}", render_cfg.output.display());

    if let Some(path) = csv_out {
        write_erp_csv(path, &summary.matrix)?;
        info!("matrix written to {}", path.display());
    }

    let js = if report {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string(&summary.matrix)?
    };
    println!("{}", js);
    Ok(())
}

fn cmd_segment(signal_path: &Path, start: i64) -> Result<()> {
    let signal = read_signal(signal_path)?;
    let segment = extract_segment(signal.as_slice(), start);
    println!("{}", serde_json::to_string(&segment)?);
    Ok(())
}
