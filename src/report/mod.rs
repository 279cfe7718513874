//! Report export: assemble, rasterize, paginate, write.

pub mod document;
pub mod paginate;
pub mod raster;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

pub use document::{ReportDocument, SummaryFigure};
pub use paginate::{compose_html, paginate, PageLayout, PageSlice};
pub use raster::{Raster, RasterError, Rasterizer, SvgRasterizer};

use crate::utils::paths::ensure_dir;

const STAGING_PREFIX: &str = ".bw-report-";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    Raster(#[from] RasterError),
    #[error("Export failed: {0}")]
    Io(#[from] io::Error),
}

/// `BudgetWise-Report-YYYY-MM-DD.html`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("BudgetWise-Report-{}.html", date.format("%Y-%m-%d"))
}

/// Writes reports into a directory through a staged temp file.
pub struct ReportExporter<R: Rasterizer = SvgRasterizer> {
    rasterizer: R,
    layout: PageLayout,
}

impl<R: Rasterizer> ReportExporter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            layout: PageLayout::A4,
        }
    }

    /// Renders `document` and writes it to `dir`, returning the artifact path.
    ///
    /// Nothing but the final artifact is left behind, whatever the outcome.
    pub fn export(&self, document: &ReportDocument, dir: &Path) -> Result<PathBuf, ExportError> {
        ensure_dir(dir)?;
        let staged = StagedFile::new(dir);

        let raster = self.rasterizer.rasterize(document)?;
        let slices = paginate(raster.width, raster.height, &self.layout);
        let html = compose_html(&raster, &slices, &self.layout);
        fs::write(staged.path(), html)?;

        let target = dir.join(report_file_name(document.generated_at.date()));
        staged.persist(&target)?;
        tracing::info!(path = %target.display(), pages = slices.len(), "report exported");
        Ok(target)
    }
}

/// Temp file removed on drop unless persisted.
struct StagedFile {
    path: PathBuf,
    persisted: bool,
}

impl StagedFile {
    fn new(dir: &Path) -> Self {
        let name = format!("{}{}.tmp", STAGING_PREFIX, Uuid::new_v4().simple());
        Self {
            path: dir.join(name),
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persist(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.persisted && self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove staged report");
            }
        }
    }
}
