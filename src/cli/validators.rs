//! CLI argument validators.

/// Parse and validate confidence value (0.0-1.0).
pub fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a timeout in whole seconds (at least 1).
pub fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number of seconds"))?;

    if value == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }

    Ok(value)
}
