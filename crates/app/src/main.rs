mod app;
mod overlay;
mod rendering;
mod selection;
mod settings;
mod tray;

use anyhow::{Context, Result};
use clap::Parser;
use snapask_core::{Config, ScreenCapturer, Session, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Select which monitor to capture
    #[arg(long, default_value_t = 0)]
    monitor: usize,

    /// List available monitors and exit
    #[arg(long)]
    list_monitors: bool,

    /// Folder screenshots are saved into
    #[arg(long, default_value = "screens")]
    screens_dir: PathBuf,

    /// Folder the log file is written into
    #[arg(long, default_value = "log")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    snapask_core::init();
    let args = Args::parse();

    logging::init(&args.log_dir).context("Failed to initialize logging")?;

    let capturer = ScreenCapturer::new().context("Failed to initialize screen capture")?;

    if args.list_monitors {
        println!("Available monitors:");
        for info in capturer.describe_monitors() {
            println!("{}", info);
        }
        return Ok(());
    }

    if args.monitor >= capturer.monitor_count() {
        anyhow::bail!(
            "Monitor index {} out of range ({} available). Try --list-monitors",
            args.monitor,
            capturer.monitor_count()
        );
    }

    let config = Config::load().context("Failed to load configuration")?;
    let user_settings = settings::Settings::load(&config.model);
    let session =
        Session::new(&config, &args.screens_dir).context("Failed to initialize session")?;

    log::info!(
        "snapask starting (monitor {}, screens dir {})",
        args.monitor,
        args.screens_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([440.0, 260.0])
            .with_min_inner_size([360.0, 200.0])
            .with_always_on_top(),
        ..Default::default()
    };

    let monitor = args.monitor;
    eframe::run_native(
        "SnapAsk",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(app::SnapAskApp::new(
                session,
                capturer,
                user_settings,
                monitor,
            )) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))?;

    Ok(())
}
