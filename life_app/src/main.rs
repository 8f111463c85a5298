// main.rs - Game of Life front-end with save/restore
//
// Runs the egui board by default. `--headless` drives the same simulation
// on the tokio runtime without a window and prints the final saved board.

use std::path::PathBuf;

use anyhow::Context;
use eframe::egui;
use egui::Color32;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use life_core::{Cadence, LifeConfig, Shape, Simulation};

mod ui;

/// Command line: `life_app [--headless] [--generations N] [CONFIG]`.
#[derive(Debug, Default)]
struct Args {
    headless: bool,
    generations: Option<u64>,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = Self::default();
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--headless" => args.headless = true,
                "--generations" => {
                    let value = it.next().context("--generations needs a value")?;
                    args.generations = Some(value.parse().with_context(|| format!("invalid --generations {value:?}"))?);
                }
                _ => args.config = Some(PathBuf::from(arg)),
            }
        }
        // Fall back to LIFE_CONFIG when no path is given.
        if args.config.is_none() {
            args.config = std::env::var_os("LIFE_CONFIG").map(PathBuf::from);
        }
        Ok(args)
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<LifeConfig> {
    match path {
        Some(path) => LifeConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(LifeConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse()?;
    let config = load_config(args.config.as_ref())?;
    info!(width = config.width, height = config.height, headless = args.headless, "life_app starting");

    if args.headless {
        run_headless(&config, args.generations)
    } else {
        run_window(config)
    }
}

fn run_headless(config: &LifeConfig, generations: Option<u64>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let mut sim = Simulation::from_config(config)?;

    let report = runtime.block_on(async {
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });
        life_core::run(&mut sim, Cadence::Quick, stop_rx, generations).await
    });

    println!("{}", sim.grid());
    println!("{}", sim.save());
    info!(end = ?report.end, generations = report.generations, "headless run finished");
    Ok(())
}

fn run_window(config: LifeConfig) -> anyhow::Result<()> {
    let app = LifeApp::new(&config)?;
    let board_w = config.width as f32 * config.cell_size;
    let board_h = config.height as f32 * config.cell_size;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([board_w.max(480.0) + 40.0, board_h + 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

/// Front-end state around a [`Simulation`].
pub struct LifeApp {
    pub sim: Simulation,
    pub cell_size: f32,
    pub selected_shape: Shape,
    /// Cell under the pointer, outlined on the board.
    pub edit_point: Option<(i64, i64)>,
    /// Save/restore text field.
    pub serialised: String,
    pub live_color: Color32,
    pub grid_color: Color32,
    pub edit_color: Color32,
}

impl LifeApp {
    pub fn new(config: &LifeConfig) -> anyhow::Result<Self> {
        Ok(Self {
            sim: Simulation::from_config(config)?,
            cell_size: config.cell_size,
            selected_shape: Shape::Point,
            edit_point: None,
            serialised: String::new(),
            live_color: Color32::from_rgb(0, 0, 0xaa),
            grid_color: Color32::from_gray(0xee),
            edit_color: Color32::RED,
        })
    }
}
