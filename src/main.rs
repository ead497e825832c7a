//! Geolens CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = geolens::run() {
        eprintln!("error: {e}");
        let code = match e {
            geolens::Error::Usage { .. } => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
