use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use clipdeck::app::{App, AppEvent};
use clipdeck::catalog::{Catalog, CatalogError};
use clipdeck::config::Config;
use clipdeck::media::{SimulatedBackend, TerminalFullscreen};
use clipdeck::theme::ThemeVariant;
use clipdeck::ui;

/// Get the config directory path (~/.config/clipdeck/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("clipdeck"))
}

#[derive(Parser, Debug)]
#[command(
    name = "clipdeck",
    version,
    about = "Terminal video catalog with a categorized feed and an overlay player"
)]
struct Args {
    /// Catalog JSON file [default: ~/.config/clipdeck/catalog.json]
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config TOML file [default: ~/.config/clipdeck/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme override (dark, light)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Validate the catalog and config, print a summary, and exit
    #[arg(long)]
    check: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let catalog_path = args
        .catalog
        .clone()
        .unwrap_or_else(|| config_dir.join("catalog.json"));

    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    if let Some(theme) = args.theme {
        if ThemeVariant::from_str_name(&theme).is_none() {
            anyhow::bail!("Unknown theme '{}' (expected dark or light)", theme);
        }
        config.theme = theme;
    }

    let catalog = match Catalog::load(&catalog_path) {
        Ok(catalog) => catalog,
        Err(CatalogError::NotFound(path)) => {
            eprintln!("Error: No catalog found at {}", path.display());
            eprintln!();
            eprintln!("To get started, point clipdeck at a catalog file:");
            eprintln!("  clipdeck --catalog demos/catalog.json");
            eprintln!();
            eprintln!("Or copy one to {}.", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to load catalog from '{}'", catalog_path.display())
            })
        }
    };

    if args.check {
        println!(
            "Catalog: {} ({} categories, {} videos)",
            catalog_path.display(),
            catalog.sections.len(),
            catalog.video_count()
        );
        for section in &catalog.sections {
            println!("  {:<24} {}", section.category.name, section.contents.len());
        }
        println!(
            "Config:  {} (theme {}, autoplay {}, skip {}s)",
            config_path.display(),
            config.theme,
            config.autoplay,
            config.skip_seconds
        );
        return Ok(());
    }

    if catalog.is_empty() {
        eprintln!("Warning: catalog at {} has no videos", catalog_path.display());
    }

    // Media reports back on a bounded channel; fullscreen changes must never
    // be dropped, so they get an unbounded one.
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let (fullscreen_tx, fullscreen_rx) = mpsc::unbounded_channel::<AppEvent>();
    let backend = SimulatedBackend::new(config.simulated_options(), event_tx.clone());
    let fullscreen = TerminalFullscreen::new(
        config.fullscreen_min_width,
        config.fullscreen_min_height,
        fullscreen_tx,
    );

    let mut app = App::new(catalog, config, Box::new(backend), Box::new(fullscreen));
    ui::run(&mut app, event_rx, fullscreen_rx).await?;

    // Release any playing media before the runtime shuts down
    drop(app);
    Ok(())
}
