//! Detect sources in a run file and write a per-detection catalog.
//!
//! ```bash
//! sourcedetect <run.json|run.yaml> [config.yaml] [catalog.json]
//! ```
//!
//! The catalog defaults to `catalog.json` next to the run file. Logs go to
//! `logs/` and the console; `RUST_LOG` overrides the default `info` level.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sourcedetect::{save_catalog, CircularAperture, Config, RunInput, SourceDetector};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: {} <run_file> [config_file] [catalog_file]", args[0]);
        std::process::exit(1);
    }

    common::log_setup::setup_logging("info", "logs", "sourcedetect")?;

    let run_path = Path::new(&args[1]);
    let config = match args.get(2) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let catalog_path = args.get(3).map(PathBuf::from).unwrap_or_else(|| {
        run_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("catalog.json")
    });

    let frames = RunInput::from_file(run_path)?
        .into_frames()
        .with_context(|| format!("Invalid run file '{}'", run_path.display()))?;
    tracing::info!("Loaded {} frames from {}", frames.len(), run_path.display());

    let aperture = CircularAperture::new(config.aperture_radius);
    let detector = SourceDetector::from_config(config);
    let run = detector.detect(&frames)?;
    let rows = run.catalog(&frames, &aperture)?;
    save_catalog(&catalog_path, &rows)?;

    let diagnostics = &run.diagnostics;
    println!("Frames:              {}", frames.len());
    println!("Cells visited:       {}", diagnostics.cells);
    println!("Detections:          {}", run.detections.len());
    println!("Distinct positions:  {}", run.identities.len());
    println!("Cross-frame groups:  {}", run.groups.len());
    println!("Catalog written to   {}", catalog_path.display());

    Ok(())
}
