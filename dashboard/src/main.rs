//! Contract dashboard entry point

use clap::Parser;
use shared::{component_info, logging};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;

use dashboard::{
    Dashboard, DashboardConfig, DashboardError, DashboardResult, DataSource, DataSourceConfig, DirectoryDataSource,
    HttpDataSource,
};

const COMPONENT: &str = "dashboard";

/// Command line arguments; every flag can also come from the environment or `.env`
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Contract dashboard API with simulated uploads")]
struct Args {
    /// Port for HTTP server
    #[arg(long, env = "DASHBOARD_PORT", default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DASHBOARD_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Base URL serving contracts.json and contract-details.json
    #[arg(long, env = "DASHBOARD_DATA_URL", conflicts_with = "data_dir")]
    data_url: Option<String>,

    /// Directory holding contracts.json and contract-details.json
    #[arg(long, env = "DASHBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Data source request timeout in seconds
    #[arg(long, default_value = "30")]
    fetch_timeout_secs: u64,

    /// Upload progress tick interval in milliseconds
    #[arg(long, default_value = "500")]
    tick_ms: u64,

    /// Upper bound of the per-tick progress increment, in percent
    #[arg(long, default_value = "30")]
    max_increment: f64,

    /// Probability that a finished upload succeeds
    #[arg(long, default_value = "0.9")]
    success_rate: f64,

    /// Seed for the upload simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value = "10")]
    max_upload_mb: u64,

    /// Contracts per page
    #[arg(long, default_value = "10")]
    page_size: usize,
}

impl Args {
    fn into_config(self) -> DashboardResult<DashboardConfig> {
        let bind_address: SocketAddr = format!("127.0.0.1:{}", self.port)
            .parse()
            .map_err(|e| DashboardError::config(format!("Invalid port: {e}")))?;

        let data_source = match (self.data_url, self.data_dir) {
            (Some(base_url), _) => DataSourceConfig::Http { base_url },
            (None, Some(root)) => DataSourceConfig::Directory { root },
            (None, None) => DataSourceConfig::Directory {
                root: PathBuf::from("./data"),
            },
        };

        let max_upload_bytes = self
            .max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| DashboardError::config(format!("--max-upload-mb too large: {}", self.max_upload_mb)))?;

        let mut config = DashboardConfig::new(bind_address, data_source);
        config.fetch_timeout = Duration::from_secs(self.fetch_timeout_secs);
        config.page_size = self.page_size;
        config.uploads.tick_interval = Duration::from_millis(self.tick_ms);
        config.uploads.max_increment = self.max_increment;
        config.uploads.success_probability = self.success_rate;
        config.uploads.seed = self.seed;
        config.intake.max_bytes = max_upload_bytes;

        config.validate()?;
        Ok(config)
    }
}

async fn serve<D: DataSource + 'static>(config: DashboardConfig, source: D) -> DashboardResult<()> {
    let mut dashboard = Dashboard::new(config, source);

    // Set up graceful shutdown
    let shutdown_sender = dashboard.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(COMPONENT, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(COMPONENT, "Signal handling", &err);
            }
        }
    });

    dashboard.run().await
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));

    let config = args.into_config()?;
    logging::log_startup(COMPONENT, &format!("contract dashboard on {}", config.bind_address));

    match config.data_source.clone() {
        DataSourceConfig::Http { base_url } => {
            component_info!(COMPONENT, source = %base_url, "📡 Reading contracts over HTTP");
            let source = HttpDataSource::with_timeout(base_url, config.fetch_timeout)?;
            serve(config, source).await?;
        }
        DataSourceConfig::Directory { root } => {
            component_info!(COMPONENT, source = %root.display(), "📁 Reading contracts from directory");
            serve(config, DirectoryDataSource::new(root)).await?;
        }
    }

    logging::log_success(COMPONENT, "Dashboard stopped gracefully");
    Ok(())
}
