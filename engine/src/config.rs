use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::{DiffError, Result};

/// Closed interval `[a, b]` the study is run on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IntervalConfig {
    #[serde(default = "default_a")]
    pub a: f64,
    #[serde(default = "default_b")]
    pub b: f64,
}

const fn default_a() -> f64 {
    -4.0
}

const fn default_b() -> f64 {
    4.0
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
        }
    }
}

impl IntervalConfig {
    pub fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }
}

/// How the dense plotting grid is derived from the fine working grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizRefinement {
    /// Subdivide every fine interval `viz_ratio` times, reusing samples.
    Ratio,
    /// Merge an evenly spaced candidate set into the fine grid.
    Insert,
}

impl Default for VizRefinement {
    fn default() -> Self {
        Self::Ratio
    }
}

/// Node counts for the working and visualization grids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Nodes of the coarse grid (step `h`). The fine grid has `2 * nodes - 1`.
    #[serde(default = "GridConfig::default_nodes")]
    pub nodes: usize,
    /// Subdivision factor of the fine grid used for plotting.
    #[serde(default = "GridConfig::default_viz_ratio")]
    pub viz_ratio: usize,
    #[serde(default)]
    pub viz_refinement: VizRefinement,
}

impl GridConfig {
    const fn default_nodes() -> usize {
        30
    }
    const fn default_viz_ratio() -> usize {
        20
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nodes: Self::default_nodes(),
            viz_ratio: Self::default_viz_ratio(),
            viz_refinement: VizRefinement::default(),
        }
    }
}

/// Output locations for the report document and the plot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IoConfig {
    #[serde(default = "IoConfig::default_output")]
    pub output: String,
    #[serde(default = "IoConfig::default_plot")]
    pub plot: bool,
    #[serde(default = "IoConfig::default_plot_path")]
    pub plot_path: String,
}

impl IoConfig {
    fn default_output() -> String {
        "data.json".to_string()
    }
    const fn default_plot() -> bool {
        true
    }
    fn default_plot_path() -> String {
        "plot.svg".to_string()
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            output: Self::default_output(),
            plot: Self::default_plot(),
            plot_path: Self::default_plot_path(),
        }
    }
}

/// Pipeline configuration loaded from TOML/YAML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub interval: IntervalConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub io: IoConfig,
}

impl PipelineConfig {
    /// Load a configuration from a TOML file on disk.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&raw)?;
        Ok(cfg)
    }

    /// Load a configuration from a YAML file on disk.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_yaml::from_str(&raw)?;
        Ok(cfg)
    }

    /// Pick the loader from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_path(path),
            Some("yaml") | Some("yml") => Self::from_yaml_path(path),
            other => Err(DiffError::other(format!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.interval.a.is_finite() || !self.interval.b.is_finite() {
            return Err(DiffError::invalid("interval bounds must be finite"));
        }
        if !self.interval.width().is_finite() {
            return Err(DiffError::invalid(format!(
                "interval width overflows: [{}, {}]",
                self.interval.a, self.interval.b
            )));
        }
        if self.interval.b - self.interval.a <= f64::EPSILON {
            return Err(DiffError::invalid(format!(
                "invalid range: [{}, {}]",
                self.interval.a, self.interval.b
            )));
        }
        if self.grid.nodes < 3 {
            return Err(DiffError::invalid(format!(
                "coarse grid needs at least 3 nodes, got {}",
                self.grid.nodes
            )));
        }
        if self.grid.viz_ratio == 0 {
            return Err(DiffError::invalid("viz_ratio must be at least 1"));
        }
        Ok(())
    }

    /// Step `h` of the coarse grid.
    pub fn step(&self) -> f64 {
        self.interval.width() / (self.grid.nodes.max(2) - 1) as f64
    }

    /// Step `h / 2` of the fine grid.
    pub fn fine_step(&self) -> f64 {
        self.step() / 2.0
    }

    pub fn fine_nodes(&self) -> usize {
        self.grid.nodes.saturating_mul(2).saturating_sub(1)
    }
}
