//! Report writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::data_uri_bytes;
use crate::error::{Error, Result};
use crate::output::AnalysisReport;

/// Write a report as pretty-printed JSON to any writer.
pub fn write_report_to<W: Write>(mut writer: W, report: &AnalysisReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|source| Error::ReportSerialize { source })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a report file.
pub fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| Error::ReportWrite {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let file = File::create(path).map_err(write_error)?;
    write_report_to(BufWriter::new(file), report).map_err(|e| match e {
        Error::Io(io) => write_error(io),
        other => other,
    })?;

    debug!("Wrote report: {}", path.display());
    Ok(())
}

/// Write the annotated and heatmap images next to the report.
///
/// Images that failed to encode are skipped. Returns the paths written.
pub fn write_artifact_images(
    report: &AnalysisReport,
    annotated_path: &Path,
    heatmap_path: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (uri, path) in [
        (&report.images.annotated, annotated_path),
        (&report.images.heatmap, heatmap_path),
    ] {
        if uri.is_empty() {
            warn!("No image data for {}, skipping", path.display());
            continue;
        }
        let jpeg = data_uri_bytes(uri)?;
        std::fs::write(path, jpeg).map_err(|e| Error::ReportWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        written.push(path.to_path_buf());
    }

    Ok(written)
}
