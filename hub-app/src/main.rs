use anyhow::Result;
use clap::Parser;
use hub_actors::system::Builder;
use hub_api::{CouponApi, CouponHubApi};
use hub_common::observability::{init_logging, LogConfig, LogFormat};
use hub_config::{HubConfig, HubConfigLoader};
use hub_tui::{spawn_tui_feeders, TuiActor};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "coupon-hub", about = "Terminal client for the coupon service")]
struct Args {
    /// Path to the YAML config file. Missing file falls back to defaults
    /// plus HUB_* environment overrides.
    #[arg(long, default_value = "hub.yaml")]
    config: PathBuf,

    /// Override the log directory (defaults to HUB_LOG_DIR, then
    /// ~/.local/share/coupon-hub).
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Emit JSON-encoded log lines instead of plain text.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cfg: HubConfig = HubConfigLoader::new()
        .with_file_optional(&args.config)
        .load()?;

    let log_path = init_logging(LogConfig {
        log_dir: args.log_dir,
        format: if args.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;
    tracing::info!(
        config = %args.config.display(),
        log = %log_path.display(),
        backend = %cfg.backend.base_url,
        "starting coupon-hub"
    );

    let api: Arc<dyn CouponApi> =
        Arc::new(CouponHubApi::new(&cfg.backend.base_url, cfg.backend.timeout())?);

    let mut builder = Builder::new();
    let shutdown = builder.shutdown_handle();

    let tui = TuiActor::new(api, cfg.ui.auto_dismiss_delay(), shutdown.clone())?;
    let tui_addr = builder.start("tui:main", 256, tui);

    spawn_tui_feeders(tui_addr, cfg.ui.poll_interval(), shutdown);

    builder.run_until_ctrl_c().await
}
