//! Single image analysis.
//!
//! Location resolution and visualization share no data, so they run
//! concurrently: the location lookup on the async runtime, rendering
//! and encoding on blocking threads. Only a failure to load the image
//! aborts an analysis.

use std::sync::Arc;

use chrono::Utc;
use image::DynamicImage;
use tokio::task::{JoinHandle, spawn_blocking};
use tracing::{debug, warn};

use crate::codec::{encode_data_uri, load_image};
use crate::config::Config;
use crate::describe::{classify_scene, describe, tags};
use crate::detection::Detection;
use crate::error::{Error, Result};
use crate::location::{ReverseGeocoder, resolve_location};
use crate::output::{AnalysisReport, Dimensions, EncodedImages};
use crate::render::{HeatmapSettings, RenderSettings, composite_heatmap, render_annotations};

/// Settings shared by every analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Annotation renderer settings.
    pub render: RenderSettings,
    /// Heatmap compositor settings.
    pub heatmap: HeatmapSettings,
    /// JPEG quality for encoded images.
    pub jpeg_quality: u8,
    /// Zoom level for map links.
    pub maps_zoom: u8,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AnalysisSettings {
    fn from(config: &Config) -> Self {
        Self {
            render: RenderSettings::from(&config.render),
            heatmap: HeatmapSettings::from(&config.heatmap),
            jpeg_quality: config.output.jpeg_quality,
            maps_zoom: config.output.maps_zoom,
        }
    }
}

/// Turns an image and its detections into an [`AnalysisReport`].
///
/// Cloning is cheap; clones share the geocoder and settings.
pub struct Analyzer<G> {
    geocoder: Arc<G>,
    settings: Arc<AnalysisSettings>,
}

impl<G> Clone for Analyzer<G> {
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<G: ReverseGeocoder> Analyzer<G> {
    /// Create an analyzer.
    pub fn new(geocoder: G, settings: AnalysisSettings) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            settings: Arc::new(settings),
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze an encoded image.
    ///
    /// # Errors
    ///
    /// Returns an error only if the image cannot be loaded or a
    /// rendering task dies. Missing metadata, geocoding failures and
    /// encoding failures degrade to default values.
    pub async fn analyze(
        &self,
        bytes: Vec<u8>,
        detections: Vec<Detection>,
    ) -> Result<AnalysisReport> {
        let bytes: Arc<[u8]> = bytes.into();

        let image = {
            let bytes = Arc::clone(&bytes);
            spawn_blocking(move || load_image(&bytes))
                .await
                .map_err(|e| Error::TaskFailed {
                    reason: e.to_string(),
                })??
        };
        let dimensions = Dimensions {
            width: image.width(),
            height: image.height(),
        };
        debug!(
            "Loaded {}x{} image with {} detection(s)",
            dimensions.width,
            dimensions.height,
            detections.len()
        );

        let detections: Arc<[Detection]> = detections.into();
        let (location, images) = tokio::join!(
            resolve_location(&bytes, self.geocoder.as_ref()),
            visualize(
                Arc::new(image),
                Arc::clone(&detections),
                Arc::clone(&self.settings)
            ),
        );
        let images = images?;

        let classification = classify_scene(&detections);
        let description = describe(&detections, &classification, &location);
        let tags = tags(&detections, &classification, &location);
        let maps_url = location.maps_url(self.settings.maps_zoom);

        Ok(AnalysisReport {
            source_file: None,
            analysis_date: Utc::now(),
            dimensions,
            objects: detections.to_vec(),
            classification,
            location,
            maps_url,
            description,
            tags,
            images,
        })
    }
}

/// Render both visualizations and encode all three images.
///
/// The original is encoded while the others are still being rendered.
async fn visualize(
    image: Arc<DynamicImage>,
    detections: Arc<[Detection]>,
    settings: Arc<AnalysisSettings>,
) -> Result<EncodedImages> {
    let quality = settings.jpeg_quality;
    let original = spawn_encode(Arc::clone(&image), quality);

    let (annotated, heatmap) = spawn_blocking(move || {
        let rgb = image.to_rgb8();
        let annotated = render_annotations(&rgb, &detections, &settings.render);
        let heatmap = composite_heatmap(&rgb, &detections, &settings.heatmap);
        (annotated, heatmap)
    })
    .await
    .map_err(|e| Error::TaskFailed {
        reason: e.to_string(),
    })?;

    let annotated = spawn_encode(Arc::new(DynamicImage::ImageRgb8(annotated)), quality);
    let heatmap = spawn_encode(Arc::new(DynamicImage::ImageRgb8(heatmap)), quality);

    let (original, annotated, heatmap) = tokio::join!(
        finish_encode(original),
        finish_encode(annotated),
        finish_encode(heatmap)
    );

    Ok(EncodedImages {
        original,
        annotated,
        heatmap,
    })
}

fn spawn_encode(image: Arc<DynamicImage>, quality: u8) -> JoinHandle<String> {
    spawn_blocking(move || encode_data_uri(&image, quality))
}

/// A dead encoding task yields an empty artifact like any encoding failure.
async fn finish_encode(task: JoinHandle<String>) -> String {
    task.await.unwrap_or_else(|e| {
        warn!("Encoding task failed: {e}");
        String::new()
    })
}
