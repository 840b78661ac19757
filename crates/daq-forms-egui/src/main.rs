//! Scan Forms - egui desktop application
//!
//! Configure one-axis scans and counts against simulated instruments and
//! hand the resulting plans to a logging consumer.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use daq_forms::config::FormsConfig;
use daq_forms_egui::demo::fill_demo_instruments;
use daq_forms_egui::queue::spawn_plan_logger;
use daq_forms_egui::FormsApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "daq-forms-gui", version, about = "Scan-plan configuration forms")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not add simulated instruments when none are configured
    #[arg(long)]
    no_demo: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = FormsConfig::load(cli.config.as_deref())
        .with_context(|| format!("loading configuration {:?}", cli.config))?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!("Starting {}", config.ui.title);

    if !cli.no_demo {
        fill_demo_instruments(&mut config);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("starting plan consumer runtime")?;
    let (queue, _consumer) = spawn_plan_logger(runtime.handle());

    let title = config.ui.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.ui.window_size)
            .with_min_inner_size([600.0, 400.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(FormsApp::new(&config, queue)))),
    )
    .map_err(|err| anyhow::anyhow!("GUI terminated: {err}"))
}
