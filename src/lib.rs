#![allow(clippy::too_many_arguments)]

mod compare_floats;
pub mod core;
pub mod engine;
pub mod errors;
pub mod input;
mod statistics;

#[macro_use]
extern crate is_close;

pub use crate::core::building::{Building, BuildingType};
pub use crate::core::load_shapes::LoadShapeRegistry;
pub use crate::core::systems::schematic::{PrimaryCurve, Schematic, SizingResults, System};
pub use crate::core::systems::simulation::{SimulationOverrides, SimulationResults};
pub use crate::engine::{SizingEngine, SizingReport};
pub use crate::errors::EcosizerError;
use crate::input::ingest_input;
use std::io::Read;
use tracing::info;

/// Size the system described by JSON construction parameters, and trace its sizing curve.
pub fn run_sizing(input: impl Read) -> Result<SizingReport, anyhow::Error> {
    let input = ingest_input(input)?;

    let engine = SizingEngine::from_input(&input)?;
    let report = engine.report()?;

    info!(
        "Sized {} system with {} points on the sizing curve",
        report.schematic,
        report.curve.heat_hours.len()
    );

    Ok(report)
}
