use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use shared::{domain::Algorithm, protocol::RunReport};
use sort_engine::{Renderer, RunController, StartOutcome};
use tokio::{io::BufReader, sync::watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod render;
mod theme;

use config::load_settings;
use input::Session;
use render::{JsonRenderer, TerminalRenderer};
use theme::ThemeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// ANSI bars redrawn on every step.
    Bars,
    /// One JSON step event per line.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sortviz", about = "Animate classic sorting algorithms step by step")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    size: Option<usize>,
    #[arg(long)]
    speed: Option<u8>,
    #[arg(long)]
    algorithm: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    time_unit_ms: Option<u64>,
    #[arg(long)]
    theme_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Output::Bars)]
    output: Output,
    /// Read keyboard commands from stdin instead of running once.
    #[arg(long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(v) = cli.size {
        settings.size = v;
    }
    if let Some(v) = cli.speed {
        settings.speed = v;
    }
    if let Some(v) = cli.algorithm {
        settings.algorithm = v;
    }
    if let Some(v) = cli.seed {
        settings.seed = Some(v);
    }
    if let Some(v) = cli.time_unit_ms {
        settings.time_unit_ms = v;
    }
    if let Some(v) = cli.theme_file {
        settings.theme_file = v;
    }
    let controller_config = settings.validate()?;

    let themes = ThemeStore::new(&settings.theme_file);
    let (theme_tx, theme_rx) = watch::channel(themes.load());
    let json = cli.output == Output::Json;
    let renderer: Box<dyn Renderer> = if json {
        Box::new(JsonRenderer::new(std::io::stdout()))
    } else {
        Box::new(TerminalRenderer::new(std::io::stdout(), theme_rx))
    };

    let controller = RunController::new(controller_config, renderer);
    if let Some(seed) = settings.seed {
        controller
            .generate_with(&mut Xoshiro256PlusPlus::seed_from_u64(seed))
            .await?;
    }
    info!(
        algorithm = %controller_config.algorithm,
        size = controller_config.size,
        speed = controller_config.speed,
        theme = theme_tx.borrow().as_str(),
        "visualizer ready"
    );

    if cli.interactive {
        let session = Session::new(controller, themes, theme_tx, json);
        return session.run(BufReader::new(tokio::io::stdin())).await;
    }

    if !json {
        print_info(controller_config.algorithm);
    }
    if let StartOutcome::Completed(report) = controller.start().await {
        print_report(&report, json);
    }
    Ok(())
}

fn print_info(algorithm: Algorithm) {
    let info = algorithm.info();
    eprintln!("{} ({})", info.title, info.complexity);
    eprintln!("  {}", info.description);
    for characteristic in info.characteristics {
        eprintln!("  - {characteristic}");
    }
}

fn print_report(report: &RunReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(error) => tracing::warn!(%error, "failed to encode run report"),
        }
        return;
    }
    println!(
        "{} sort finished in {}ms: {} comparisons, {} swaps",
        report.algorithm,
        report.elapsed.as_millis(),
        report.comparisons,
        report.swaps
    );
}
