// src/report/writer.rs
// =============================================================================
// Writes a CrawlReport to disk.
//
// CSV layout:
//   Link
//   https://en.wikipedia.org/wiki/...
//   ...
//   (blank row)
//   Total links found:,N
//   Unique links found:,N
//
// JSON layout: the serde form of CrawlReport, pretty printed.
//
// Wiki titles can contain commas ("Washington,_D.C."), so the csv crate
// does the quoting instead of plain string formatting.
// =============================================================================

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::{CrawlReport, FailedPage};
use crate::error::ReportError;

#[derive(Debug, Clone)]
pub struct ReportWriter {
    csv_path: PathBuf,
    json_path: PathBuf,
}

impl ReportWriter {
    pub fn new(csv_path: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            json_path: json_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    // Writes both report files
    //
    // Parameters:
    //   report: the finished crawl (links are already sorted)
    //
    // Returns: Ok(()) once both files are flushed, or the first error.
    // Parent directories are created if they don't exist yet.
    pub fn write(&self, report: &CrawlReport) -> Result<(), ReportError> {
        self.write_csv(report)?;
        self.write_json(report)?;
        info!(
            csv = %self.csv_path.display(),
            json = %self.json_path.display(),
            links = report.total_links,
            "reports written"
        );
        Ok(())
    }

    // Writes the CSV report: header, one row per link, blank row, two totals
    //
    // The summary rows have two columns while the link rows have one,
    // so the writer must be `flexible`, otherwise csv rejects the
    // change in field count.
    fn write_csv(&self, report: &CrawlReport) -> Result<(), ReportError> {
        let file = create(&self.csv_path)?;
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

        writer.write_record(["Link"])?;
        for link in &report.links {
            writer.write_record([link.as_str()])?;
        }

        // A record with zero fields is an empty line.
        // (A single empty field would be written as `""` instead.)
        writer.write_record(std::iter::empty::<&[u8]>())?;

        let total = report.total_links.to_string();
        let unique = report.unique_links.to_string();
        writer.write_record(["Total links found:", total.as_str()])?;
        writer.write_record(["Unique links found:", unique.as_str()])?;

        // csv buffers internally; nothing is on disk until flush
        writer.flush().map_err(|source| io_error(&self.csv_path, source))
    }

    // Writes the JSON report: {"total_links", "unique_links", "links"}
    fn write_json(&self, report: &CrawlReport) -> Result<(), ReportError> {
        let mut file = BufWriter::new(create(&self.json_path)?);
        serde_json::to_writer_pretty(&mut file, report)?;
        file.flush().map_err(|source| io_error(&self.json_path, source))
    }

    // Writes the list of skipped pages as JSON
    //
    // Parameters:
    //   path: where to write (usually wiki_links_failures.json)
    //   failures: the pages skipped under the best-effort policy
    pub fn write_failures(&self, path: &Path, failures: &[FailedPage]) -> Result<(), ReportError> {
        let mut file = BufWriter::new(create(path)?);
        serde_json::to_writer_pretty(&mut file, failures)?;
        file.flush().map_err(|source| io_error(path, source))
    }
}

// Creates (or truncates) a file, making its parent directory first
fn create(path: &Path) -> Result<File, ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    File::create(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}
