//! Pipeline coordination for file processing.

use crate::constants::{
    ANNOTATED_EXTENSION, HEATMAP_EXTENSION, IMAGE_EXTENSIONS, REPORT_EXTENSION,
};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - report already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Output path for `input` with the given suffix (e.g. `.geolens.json`).
pub fn output_path_for(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    // Non-UTF-8 stems are kept lossily rather than rejected
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );
    output_dir.join(format!("{stem}{suffix}"))
}

/// Report file path for an input image.
pub fn report_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_path_for(input, output_dir, REPORT_EXTENSION)
}

/// Check if a file should be processed.
pub fn should_process(input: &Path, output_dir: &Path, force: bool) -> ProcessCheck {
    if !force && report_path_for(input, output_dir).exists() {
        return ProcessCheck::SkipExists;
    }
    ProcessCheck::Process
}

/// Collect input images from paths (files and directories).
///
/// Directories are searched recursively. Images written by a previous
/// run (`*.annotated.jpg`, `*.heatmap.jpg`) are ignored.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_image_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_image_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) && !is_generated_artifact(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported image extension.
fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        // Compare as OsStr to handle non-UTF-8 filenames
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

fn is_generated_artifact(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        let name = name.to_string_lossy().to_ascii_lowercase();
        name.ends_with(ANNOTATED_EXTENSION) || name.ends_with(HEATMAP_EXTENSION)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_for_with_explicit() {
        let input = Path::new("/data/street.jpg");
        let output = output_dir_for(input, Some(Path::new("/results")));
        assert_eq!(output, PathBuf::from("/results"));
    }

    #[test]
    fn test_output_dir_for_without_explicit() {
        assert_eq!(
            output_dir_for(Path::new("/data/street.jpg"), None),
            PathBuf::from("/data")
        );
        assert_eq!(
            output_dir_for(Path::new("street.jpg"), None),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_report_path_for() {
        let path = report_path_for(Path::new("photos/street.jpg"), Path::new("/output"));
        assert_eq!(path, PathBuf::from("/output/street.geolens.json"));
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("photo.jpg")));
        assert!(is_image_file(Path::new("photo.JPEG")));
        assert!(is_image_file(Path::new("scan.tif")));
        assert!(is_image_file(Path::new("shot.png")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("street.detections.json")));
    }

    #[test]
    fn test_is_image_file_with_unicode() {
        assert!(is_image_file(Path::new("kävelykatu.jpg")));
        assert!(is_image_file(Path::new("写真.png")));
    }

    #[test]
    fn test_output_path_for_unicode() {
        let path = output_path_for(
            Path::new("kävelykatu.jpg"),
            Path::new("/output"),
            ANNOTATED_EXTENSION,
        );
        assert!(path.to_string_lossy().ends_with("kävelykatu.annotated.jpg"));
    }

    #[test]
    fn test_collect_skips_generated_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "a.jpg",
            "b.png",
            "a.annotated.jpg",
            "a.heatmap.jpg",
            "a.geolens.json",
            "a.detections.csv",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.tiff"), b"").unwrap();

        let files = collect_input_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.tiff"]);
    }

    #[test]
    fn test_should_process_respects_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("street.jpg");

        assert_eq!(should_process(&input, dir.path(), false), ProcessCheck::Process);

        std::fs::write(report_path_for(&input, dir.path()), "{}").unwrap();
        assert_eq!(should_process(&input, dir.path(), false), ProcessCheck::SkipExists);
        assert_eq!(should_process(&input, dir.path(), true), ProcessCheck::Process);
    }
}
