//! Bar chart rendering of the category distribution
//!
//! The renderer is the pipeline's only outward-facing artifact producer; it
//! consumes a finished [`CategoryCounts`] snapshot and writes an image file,
//! overwriting the previous render.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::CategoryCounts;

/// Something that can turn a category snapshot into a visual artifact.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, counts: &CategoryCounts) -> Result<()>;
}

/// SVG bar chart with one bar per category.
pub struct SvgBarChart {
    output_path: PathBuf,
}

impl SvgBarChart {
    #[must_use]
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl ChartRenderer for SvgBarChart {
    fn render(&self, counts: &CategoryCounts) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let max_count = counts
            .entries()
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
            .max(1);

        let root = SVGBackend::new(&self.output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE).map_err(to_render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Message Length Distribution", ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d((0usize..3usize).into_segmented(), 0u64..max_count + 1)
            .map_err(to_render_error)?;

        let entries = counts.entries();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Message Length Category")
            .y_desc("Number of Messages")
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) if *i < entries.len() => {
                    entries[*i].0.as_str().to_string()
                }
                _ => String::new(),
            })
            .draw()
            .map_err(to_render_error)?;

        let colors = [GREEN, BLUE, RED];
        chart
            .draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), *count),
                    ],
                    colors[i % colors.len()].filled(),
                )
            }))
            .map_err(to_render_error)?;

        root.present().map_err(to_render_error)?;
        info!(path = %self.output_path.display(), total = counts.total(), "Chart rendered");
        Ok(())
    }
}

fn to_render_error<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Render(e.to_string())
}
