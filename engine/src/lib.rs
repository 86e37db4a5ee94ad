//! Numerical differentiation on uniform grids with Runge–Romberg refinement
//! and L1/L2/L∞ error analysis against a closed-form derivative.

pub mod analysis;
pub mod analytic;
pub mod config;
pub mod errors;
pub mod grid;
pub mod io;
pub mod richardson;
pub mod runtime;
pub mod telemetry;
pub mod utils;

pub use analysis::{compare, magnitude, ErrorNorms, ErrorSummary, Norms};
pub use analytic::{evaluate, sample, AnalyticFunction, Quantity, Sine};
pub use config::{GridConfig, IntervalConfig, IoConfig, PipelineConfig, VizRefinement};
pub use errors::{DiffError, Result};
pub use grid::{generate_uniform_grid, refine_and_resample, refine_within, Grid, GridSpec, SampledGrid};
pub use io::{read_report, render_error_table, write_report, PlotData};
pub use richardson::{extrapolate, Extrapolation};
pub use runtime::{Pipeline, PipelineReport};
pub use utils::differentiate;

/// Emit a textual banner used by CLI integrations and smoke tests.
pub fn banner() -> String {
    const MSG: &str = "rrdiff :: finite differences with Runge-Romberg refinement";
    tracing::info!(target: "rrdiff", "{}", MSG);
    MSG.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_mentions_runge_romberg() {
        let b = banner();
        assert!(b.contains("Runge-Romberg"));
    }
}
