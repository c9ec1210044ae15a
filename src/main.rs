//! # Tide Predictor Application Entry Point
//!
//! Prints today's tide curve for the configured station. All options come
//! from `tide-config.toml` in the working directory; without one, the
//! bundled station table and the default station are used.

use anyhow::Context;
use std::sync::Arc;
use tide_predictor_lib::{config::Config, renderer::draw_ascii, StationCatalog, TidePredictor};
use tracing::info;

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load();

    // The catalog is loaded once; nothing works without it
    let catalog = match &config.catalog.path {
        Some(path) => StationCatalog::from_path(path)
            .with_context(|| format!("loading station table {}", path.display()))?,
        None => StationCatalog::bundled().context("loading bundled station table")?,
    };
    let catalog = match &config.catalog.default_station {
        Some(name) => catalog
            .with_default(name)
            .context("selecting default station")?,
        None => catalog,
    };

    let tide = TidePredictor::new(Arc::new(catalog), config.station.name.as_deref(), None)
        .context("creating tide predictor")?;
    info!(station = tide.station_name(), date = %tide.date(), "predicting");

    println!("{tide} (UTC{})", tide.timezone_offset());
    println!();
    draw_ascii(&tide.curve(config.step_minutes()), config.display.rows);

    Ok(())
}
