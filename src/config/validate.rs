//! Configuration validation.

use crate::config::Config;
use crate::constants::location::MAX_MAPS_ZOOM;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_geocoder(config)?;
    validate_render(config)?;
    validate_heatmap(config)?;
    validate_output(config)?;
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::ConfigValidation { message }
}

/// Validate geocoder settings.
fn validate_geocoder(config: &Config) -> Result<()> {
    let geocoder = &config.geocoder;

    if geocoder.timeout_secs == 0 {
        return Err(invalid("geocoder.timeout_secs must be at least 1".to_string()));
    }

    let url = reqwest::Url::parse(&geocoder.endpoint).map_err(|e| {
        invalid(format!(
            "geocoder.endpoint is not a valid URL '{}': {e}",
            geocoder.endpoint
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "geocoder.endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if geocoder.user_agent.trim().is_empty() {
        return Err(invalid("geocoder.user_agent must not be empty".to_string()));
    }

    Ok(())
}

/// Validate confidence tier settings.
fn validate_render(config: &Config) -> Result<()> {
    let render = &config.render;

    for (name, value) in [
        ("render.high_threshold", render.high_threshold),
        ("render.medium_threshold", render.medium_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(format!(
                "{name} must be between 0.0 and 1.0, got {value}"
            )));
        }
    }

    if render.medium_threshold >= render.high_threshold {
        return Err(invalid(format!(
            "render.medium_threshold ({}) must be below render.high_threshold ({})",
            render.medium_threshold, render.high_threshold
        )));
    }

    if render.line_width == 0 {
        return Err(invalid("render.line_width must be at least 1".to_string()));
    }

    if render.label_scale == 0 {
        return Err(invalid("render.label_scale must be at least 1".to_string()));
    }

    Ok(())
}

/// Validate heatmap settings.
fn validate_heatmap(config: &Config) -> Result<()> {
    let weight = config.heatmap.original_weight;
    if !(0.0..=1.0).contains(&weight) {
        return Err(invalid(format!(
            "heatmap.original_weight must be between 0.0 and 1.0, got {weight}"
        )));
    }
    Ok(())
}

/// Validate output settings.
fn validate_output(config: &Config) -> Result<()> {
    let output = &config.output;

    if !(1..=100).contains(&output.jpeg_quality) {
        return Err(invalid(format!(
            "output.jpeg_quality must be between 1 and 100, got {}",
            output.jpeg_quality
        )));
    }

    if output.maps_zoom > MAX_MAPS_ZOOM {
        return Err(invalid(format!(
            "output.maps_zoom must be at most {MAX_MAPS_ZOOM}, got {}",
            output.maps_zoom
        )));
    }

    Ok(())
}
