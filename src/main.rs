use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use xkcdsync::{download_comics, DownloadConfig};

#[derive(Parser, Debug)]
#[command(name = "xkcdsync")]
#[command(about = "Download and archive xkcd comics with content-addressed storage", long_about = None)]
#[command(version)]
struct Args {
    /// Output directory for comic images
    #[arg(short, long, default_value = "comics-xkcd")]
    output: PathBuf,

    /// Base URL of the xkcd API
    #[arg(long, default_value = "https://xkcd.com")]
    api_url: String,

    /// Maximum number of concurrent downloads
    #[arg(short = 'j', long, default_value_t = 16)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("xkcdsync={}", log_level))
        .init();

    info!("🚀 XkcdSync - xkcd Comic Downloader");
    info!("Output directory: {:?}", args.output);
    info!("Concurrency: {}", args.concurrency);

    if args.concurrency == 0 {
        eprintln!("Error: concurrency must be at least 1");
        std::process::exit(1);
    }

    let config = DownloadConfig {
        api_base_url: args.api_url,
        output_dir: args.output,
        max_concurrent_downloads: args.concurrency,
        request_timeout: Duration::from_secs(args.timeout),
    };

    match download_comics(&config).await {
        Ok(summary) => {
            info!(
                "✅ Saved {} new comic image files to {:?} ({} duplicates, {} failures)",
                summary.files_written, config.output_dir, summary.duplicates, summary.failures
            );
            info!(
                "Execution time: {}",
                humantime::format_duration(Duration::from_millis(
                    summary.elapsed.as_millis() as u64
                ))
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
