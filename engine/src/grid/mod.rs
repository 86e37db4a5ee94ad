//! Uniform grids over a closed interval and the samples carried on them.

use serde::{Deserialize, Serialize};

use crate::{
    config::PipelineConfig,
    errors::{DiffError, Result},
};

pub mod refine;

pub use refine::{refine_and_resample, refine_within, refined_len};

/// Ordered node coordinates spanning `[a, b]`.
pub type Grid = Vec<f64>;

/// Interval and node count of a freshly generated grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridSpec {
    pub a: f64,
    pub b: f64,
    pub nodes: usize,
}

impl GridSpec {
    pub fn new(a: f64, b: f64, nodes: usize) -> Self {
        Self { a, b, nodes }
    }

    /// Coarse working grid described by a pipeline configuration.
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self::new(cfg.interval.a, cfg.interval.b, cfg.grid.nodes)
    }

    /// Spacing of a uniform grid with `nodes` points over `[a, b]`.
    pub fn step(&self) -> f64 {
        (self.b - self.a).abs() / (self.nodes.max(2) - 1) as f64
    }
}

/// A grid together with the function and its exact derivative sampled on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampledGrid {
    pub x: Grid,
    pub f: Vec<f64>,
    pub df: Vec<f64>,
}

impl SampledGrid {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn validate(&self) -> bool {
        self.x.len() == self.f.len() && self.f.len() == self.df.len()
    }
}

/// Build `count_nodes` points `a + step * i`, then pin the last one to `b`
/// so accumulated rounding never moves the right endpoint.
pub fn generate_uniform_grid(step: f64, count_nodes: usize, a: f64, b: f64) -> Result<Grid> {
    if count_nodes == 0 {
        return Err(DiffError::invalid("grid needs at least one node"));
    }
    if b - a <= f64::EPSILON {
        return Err(DiffError::invalid(format!("invalid range: [{a}, {b}]")));
    }
    let mut grid: Grid = (0..count_nodes).map(|i| a + step * i as f64).collect();
    if let Some(last) = grid.last_mut() {
        *last = b;
    }
    Ok(grid)
}
