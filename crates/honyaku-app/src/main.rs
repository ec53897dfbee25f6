use std::sync::Arc;

use clap::Parser;
use honyaku_config::Config;
use tokio::signal;

mod context;
mod controller;
mod events;
mod shell;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Screen-region OCR and translation. Captures a configured rectangle of
/// the screen, recognizes the text in it, and prints a translation.
#[derive(Parser)]
#[command(name = "honyaku", version)]
struct Cli {
    /// Capture region origin, x
    #[arg(long)]
    x: Option<i32>,
    /// Capture region origin, y
    #[arg(long)]
    y: Option<i32>,
    /// Capture region width
    #[arg(long)]
    width: Option<u32>,
    /// Capture region height
    #[arg(long)]
    height: Option<u32>,
    /// OCR language (tesseract code, e.g. "jpn")
    #[arg(long)]
    lang: Option<String>,
    /// Translation target language (e.g. "zh-cn")
    #[arg(long)]
    target: Option<String>,
    /// Start with auto-recognize on
    #[arg(long)]
    auto: bool,
    /// Auto-recognize interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(x) = self.x {
            config.capture.region.x = x;
        }
        if let Some(y) = self.y {
            config.capture.region.y = y;
        }
        if let Some(width) = self.width {
            config.capture.region.width = width;
        }
        if let Some(height) = self.height {
            config.capture.region.height = height;
        }
        if let Some(lang) = &self.lang {
            config.ocr.language = lang.clone();
        }
        if let Some(target) = &self.target {
            config.translator.target_lang = target.clone();
        }
        if self.auto {
            config.ocr.auto = true;
        }
        if let Some(interval) = self.interval_ms {
            config.ocr.auto_interval_ms = interval;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::new();
    cli.apply(&mut config);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if atty::is(atty::Stream::Stderr) {
        builder.compact().init();
    } else {
        builder.json().init();
    }
}
