//! Classify one statement from the command line and print the result as JSON.
//!
//! `detect "some text"` or `echo "some text" | detect`

use anyhow::Context;
use std::io::Read;
use tracing_subscriber::EnvFilter;

use truth_guard::{Detector, Settings};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let settings = Settings::from_env();
    let detector = Detector::from_settings(&settings)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading statement from stdin")?;
        buf
    } else {
        args.join(" ")
    };

    let result = detector.classify(&text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
