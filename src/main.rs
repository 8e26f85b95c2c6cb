use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info, warn};

use msg_stream_rust::config::AppConfig;
use msg_stream_rust::logging::init_logging;
use msg_stream_rust::{
    DistributionReporter, IngestPipeline, MessageStore, StreamReader, SvgBarChart,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the live message feed (overrides config)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Path of the chart artifact (overrides config)
    #[arg(long)]
    chart: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline: tail the feed, classify, store, and chart periodically
    Run {
        /// Seconds between feed polls
        #[arg(long)]
        poll_interval_secs: Option<u64>,

        /// Seconds between chart renders
        #[arg(long)]
        report_interval_secs: Option<u64>,
    },
    /// Render the distribution chart once from the current store and exit
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first so --help/--version exit cleanly
    let cli = Cli::parse();

    // Load configuration and apply CLI overrides on top, then validate once
    let mut config = AppConfig::load()?;
    if let Some(source) = &cli.source {
        config.source.path = source.display().to_string();
    }
    if let Some(database) = &cli.database {
        config.database.path = database.display().to_string();
    }
    if let Some(chart) = &cli.chart {
        config.reporter.chart_path = chart.display().to_string();
    }
    if let Commands::Run {
        poll_interval_secs,
        report_interval_secs,
    } = &cli.command
    {
        if let Some(secs) = poll_interval_secs {
            config.source.poll_interval_secs = *secs;
        }
        if let Some(secs) = report_interval_secs {
            config.reporter.interval_secs = *secs;
        }
    }
    config.validate()?;

    // Initialize logging; the appender guard must outlive the process
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(std::path::Path::new),
        config.logging.format == "json",
    )?;

    info!("Starting msg-stream pipeline");

    match cli.command {
        Commands::Run { .. } => run_pipeline(&config).await,
        Commands::Report => report_once(&config),
    }
}

/// Run the full pipeline until a termination signal arrives.
async fn run_pipeline(config: &AppConfig) -> Result<()> {
    let store = Arc::new(
        MessageStore::with_max_connections(
            std::path::Path::new(&config.database.path),
            config.database.max_connections,
        )
        .with_context(|| format!("Cannot open message store at {}", config.database.path))?,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Ingest task: single writer, classification and storage inline
    let reader = StreamReader::new(
        PathBuf::from(&config.source.path),
        Duration::from_secs(config.source.poll_interval_secs),
        config.source.max_retries,
    );
    let ingest = IngestPipeline::new(Arc::clone(&store));
    let reader_shutdown = shutdown_rx.clone();
    let mut reader_task = tokio::spawn(async move {
        reader
            .run(reader_shutdown, |message| {
                ingest.handle_message(message).map(|_| ())
            })
            .await
    });

    // Reporter task: read-only, coordinates with the writer only through the store
    let reporter = DistributionReporter::new(
        Arc::clone(&store),
        Box::new(SvgBarChart::new(PathBuf::from(&config.reporter.chart_path))),
        Duration::from_secs(config.reporter.interval_secs),
    );
    let reporter_shutdown = shutdown_rx;
    let reporter_task = tokio::spawn(async move {
        reporter.run(reporter_shutdown).await;
    });

    // Wait for either a termination signal or a fatal reader error
    let early_result = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Termination signal received, shutting down");
            shutdown_tx.send(true).ok();
            None
        }
        result = &mut reader_task => {
            warn!("Reader task ended on its own, shutting down");
            shutdown_tx.send(true).ok();
            Some(result)
        }
    };

    let reader_result = match early_result {
        Some(result) => result,
        None => reader_task.await,
    };

    reporter_task.await.ok();

    match reader_result {
        Ok(Ok(())) => {
            info!("Pipeline shut down cleanly");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(error = %e, "Pipeline failed");
            Err(e.into())
        }
        Err(e) => {
            error!(error = %e, "Reader task panicked");
            Err(e.into())
        }
    }
}

/// On-demand report: snapshot the store and render the chart once.
fn report_once(config: &AppConfig) -> Result<()> {
    let store = Arc::new(
        MessageStore::with_max_connections(
            std::path::Path::new(&config.database.path),
            config.database.max_connections,
        )
        .with_context(|| format!("Cannot open message store at {}", config.database.path))?,
    );

    let reporter = DistributionReporter::new(
        Arc::clone(&store),
        Box::new(SvgBarChart::new(PathBuf::from(&config.reporter.chart_path))),
        Duration::from_secs(config.reporter.interval_secs),
    );

    reporter.report_once()?;
    info!(chart = %config.reporter.chart_path, "Report complete");
    Ok(())
}
