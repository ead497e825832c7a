//! Single file processing pipeline.

use crate::constants::{ANNOTATED_EXTENSION, HEATMAP_EXTENSION};
use crate::detection::{filter_by_confidence, load_detections_for};
use crate::error::{Error, Result};
use crate::location::ReverseGeocoder;
use crate::output::{write_artifact_images, write_report, write_report_to};
use crate::pipeline::{Analyzer, output_path_for, report_path_for};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Per-run options for [`process_file`].
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Detection file to use instead of the sibling file.
    pub detections: Option<PathBuf>,
    /// Detections below this confidence are dropped.
    pub min_confidence: f32,
    /// Also write the annotated and heatmap JPEG files.
    pub write_images: bool,
    /// Write the report to stdout instead of a file.
    pub to_stdout: bool,
}

/// Result of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Number of detections after filtering.
    pub detections: usize,
    /// Processing duration in seconds.
    pub duration_secs: f64,
    /// Report file written, if any.
    pub report_path: Option<PathBuf>,
}

/// Analyze one image and write its report.
///
/// # Errors
///
/// Fails when the image or its detection file cannot be read, the image
/// cannot be decoded, or the report cannot be written.
pub async fn process_file<G: ReverseGeocoder>(
    input_path: &Path,
    output_dir: &Path,
    analyzer: &Analyzer<G>,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let bytes = tokio::fs::read(input_path)
        .await
        .map_err(|source| Error::ImageRead {
            path: input_path.to_path_buf(),
            source,
        })?;

    let detections = load_detections_for(input_path, options.detections.as_deref())?;
    let total = detections.len();
    let detections = filter_by_confidence(detections, options.min_confidence);
    debug!(
        "Kept {} of {} detections at or above {:.1}% confidence",
        detections.len(),
        total,
        options.min_confidence * 100.0
    );
    let detection_count = detections.len();

    let mut report = analyzer.analyze(bytes, detections).await?;
    report.source_file = Some(input_path.display().to_string());
    info!("{}", report.location.name);

    let report_path = if options.to_stdout {
        write_report_to(std::io::stdout().lock(), &report)?;
        None
    } else {
        std::fs::create_dir_all(output_dir).map_err(|source| Error::OutputDirCreateFailed {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let path = report_path_for(input_path, output_dir);
        write_report(&report, &path)?;
        Some(path)
    };

    if options.write_images {
        std::fs::create_dir_all(output_dir).map_err(|source| Error::OutputDirCreateFailed {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let written = write_artifact_images(
            &report,
            &output_path_for(input_path, output_dir, ANNOTATED_EXTENSION),
            &output_path_for(input_path, output_dir, HEATMAP_EXTENSION),
        )?;
        debug!("Wrote {} image file(s)", written.len());
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Processed {} ({} detections) in {:.2}s",
        input_path.display(),
        detection_count,
        duration_secs
    );

    Ok(ProcessResult {
        detections: detection_count,
        duration_secs,
        report_path,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::location::DisabledGeocoder;
    use crate::output::AnalysisReport;
    use crate::pipeline::AnalysisSettings;
    use image::{Rgb, RgbImage};

    fn write_png(path: &Path) {
        RgbImage::from_pixel(40, 30, Rgb([10, 120, 200]))
            .save(path)
            .unwrap();
    }

    fn analyzer() -> Analyzer<DisabledGeocoder> {
        Analyzer::new(DisabledGeocoder, AnalysisSettings::default())
    }

    #[tokio::test]
    async fn test_process_file_writes_report_with_sibling_detections() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("street.png");
        write_png(&input);
        std::fs::write(
            dir.path().join("street.detections.json"),
            r#"[{"class": 0, "class_name": "person", "confidence": 0.9, "bbox": [2, 2, 20, 20]},
                {"class": 2, "class_name": "car", "confidence": 0.2, "bbox": [5, 5, 30, 25]}]"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        let options = ProcessOptions {
            min_confidence: 0.5,
            ..ProcessOptions::default()
        };
        let result = process_file(&input, &out, &analyzer(), &options).await.unwrap();

        assert_eq!(result.detections, 1);
        let report_path = result.report_path.unwrap();
        assert_eq!(report_path, out.join("street.geolens.json"));

        let report: AnalysisReport =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].class_name, "person");
        assert!(report.source_file.unwrap().ends_with("street.png"));
        assert!(!out.join("street.annotated.jpg").exists());
    }

    #[tokio::test]
    async fn test_process_file_writes_images_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plaza.png");
        write_png(&input);

        let options = ProcessOptions {
            write_images: true,
            ..ProcessOptions::default()
        };
        process_file(&input, dir.path(), &analyzer(), &options)
            .await
            .unwrap();

        assert!(dir.path().join("plaza.annotated.jpg").is_file());
        assert!(dir.path().join("plaza.heatmap.jpg").is_file());
    }

    #[tokio::test]
    async fn test_process_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_file(
            &dir.path().join("missing.jpg"),
            dir.path(),
            &analyzer(),
            &ProcessOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(Error::ImageRead { .. })));
    }
}
