//! Help message display for CLI.

#![allow(clippy::print_stdout)]

/// Print help message based on whether a configuration file exists.
pub fn print_smart_help(config_exists: bool) {
    if config_exists {
        print_configured_help();
    } else {
        print_first_time_help();
    }
}

/// Print a short setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No configuration found. Get started with geolens:");
    println!();
    println!("1. Optionally create a configuration file:");
    println!("   geolens config init");
    println!();
    println!("2. Put detector output next to each image:");
    println!("   street.jpg");
    println!("   street.detections.json   (or street.detections.csv)");
    println!();
    println!("3. Analyze images:");
    println!("   geolens street.jpg");
    println!();
    println!("Location names are looked up with OpenStreetMap Nominatim. Use --offline");
    println!("to skip the lookup and report raw coordinates instead.");
    println!();
    println!("Run 'geolens -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: geolens [IMAGES]... [OPTIONS]");
    println!();
    println!("Example: geolens photos/ -c 0.4 --write-images");
    println!();
    println!("Run 'geolens -h' for all options or 'geolens config show' to see settings.");
}
