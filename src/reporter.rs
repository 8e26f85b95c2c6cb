//! Periodic distribution reporting
//!
//! Read-only side of the pipeline: on a fixed interval, snapshot the
//! per-category counts and hand them to the chart renderer. Each cycle is a
//! fresh snapshot; no state is carried between cycles and nothing here ever
//! touches the write path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::chart::ChartRenderer;
use crate::db::MessageStore;
use crate::error::Result;
use crate::logging::OperationTimer;

pub struct DistributionReporter {
    store: Arc<MessageStore>,
    renderer: Box<dyn ChartRenderer>,
    interval: Duration,
}

impl DistributionReporter {
    #[must_use]
    pub fn new(store: Arc<MessageStore>, renderer: Box<dyn ChartRenderer>, interval: Duration) -> Self {
        Self {
            store,
            renderer,
            interval,
        }
    }

    /// Report once: query current counts and render the chart.
    pub fn report_once(&self) -> Result<()> {
        let timer = OperationTimer::new("distribution_report");
        let counts = self.store.count_by_category()?;
        info!(
            short = counts.short,
            medium = counts.medium,
            long = counts.long,
            "Category distribution snapshot"
        );
        self.renderer.render(&counts)?;
        timer.finish();
        Ok(())
    }

    /// Run report cycles until shutdown.
    ///
    /// A failed query or render is logged and the cycle skipped; the next
    /// cycle retries independently. Failures never propagate into the
    /// ingestion path.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => {}
            }
            if *shutdown.borrow() {
                info!("Shutdown requested, reporter stopping");
                return;
            }

            if let Err(e) = self.report_once() {
                warn!(error = %e, "Report cycle failed, skipping");
            }
        }
    }
}
