use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rek_loader::config::Config;
use rek_loader::images::ImageCache;
use rek_loader::loader::{load_in_app_resources, ViewModelLoader};
use rek_loader::net::error::classify;
use rek_loader::resource::{manifest, ResourceFetcher};
use rek_loader::templates::HandlebarsRegistry;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Load, merge and print REK content
#[derive(Parser, Debug)]
#[command(name = "rek-loader", version, about, long_about = None)]
struct Args {
    /// Content host (overrides config and REK_LOADER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Read resources from the development directory
    #[arg(long)]
    local: bool,

    /// Development resources directory
    #[arg(long)]
    dev_dir: Option<PathBuf>,

    /// Purge the image cache before loading
    #[arg(long)]
    clear_images: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("rek-loader started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("rek-loader").join("rek-loader.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".rek-loader").join("rek-loader.log");
    }
    PathBuf::from("rek-loader.log")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    // CLI > env > config file
    let mut config = Config::load();
    if let Some(host) = args.host {
        config.host = host;
    }
    if args.local {
        config.local_mode = true;
    }
    if let Some(dir) = args.dev_dir {
        config.dev_resources_dir = Some(dir);
    }
    if args.clear_images {
        config.clear_image_cache_on_load = true;
    }

    tracing::info!(
        "Using host: {}, local_mode: {}",
        config.host,
        config.local_mode
    );

    let fetcher = ResourceFetcher::new(config.fetcher_config())?;
    let mut templates = HandlebarsRegistry::new();
    let mut images = ImageCache::new(config.effective_image_cache_dir());

    load_in_app_resources(&config.effective_in_app_resources_dir(), &mut templates).await;

    let manifest = manifest();
    let result = ViewModelLoader::new(&fetcher, &mut templates, &mut images, &config)
        .clear_image_cache_on_load(config.clear_image_cache_on_load)
        .load_view_model(&manifest.json, &manifest.templates, &manifest.css)
        .await;

    match result {
        Ok(view_model) => {
            println!("{}", serde_json::to_string_pretty(&view_model)?);

            let pending = images.drain();
            eprintln!(
                "Loaded {} sections, {} items; {} images queued for download",
                view_model.lists.len(),
                view_model.item_count(),
                pending.len()
            );
            for request in pending {
                tracing::debug!("Pending image {} -> {}", request.url, request.filename);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let kind = classify(&err);
            tracing::error!("Could not load data during initial load ({}): {:#}", kind.as_str(), err);
            eprintln!("{}", kind.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
