mod input;
mod render;
mod runtime;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use folklore_core::config::CoreConfig;
use folklore_core::SyncRuntime;
use tracing_subscriber::EnvFilter;

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser)]
#[command(name = "folklore-tui", about = "Terminal client for the urban legend archive")]
struct Args {
    /// Archive API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Directory for session and log files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CoreConfig::default();
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    init_logging(&config.data_dir)?;

    // Restore the terminal before the panic message prints, otherwise
    // it lands inside the alternate screen and is lost
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::restore_terminal();
        original_hook(panic_info);
    }));

    let mut sync_runtime = SyncRuntime::new(config)?;
    let mut event_rx = sync_runtime
        .take_event_rx()
        .ok_or_else(|| anyhow::anyhow!("sync runtime already has an active event receiver"))?;

    let mut app = App::new(sync_runtime.state(), sync_runtime.handle());
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app, &mut event_rx).await;

    sync_runtime.shutdown().await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}

/// Log to a file under the data dir so tracing output never corrupts
/// the alternate screen. Level comes from RUST_LOG, default info.
fn init_logging(data_dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("folklore-tui.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}
