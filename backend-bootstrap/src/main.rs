use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use backend_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "gatherly-backend")]
#[command(about = "Gatherly event discovery and booking server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory for daily-rotated log files; overrides `log_dir` from the config
    #[arg(long)]
    log_dir: Option<String>,
}

fn init_tracing(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gatherly-backend.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let config = AppConfig::load().await?;
    let log_dir = args.log_dir.or_else(|| config.log_dir.clone());
    let _guard = init_tracing(log_dir.as_deref());

    backend_bootstrap::run_standalone(config).await
}
