use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DiffError, Result};

use super::{load_json, write_json};

/// Named arrays consumed by the plotting step, serialized as a single JSON
/// object in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    #[serde(rename = "grid_M_viz")]
    pub grid_viz: Vec<f64>,
    pub grid_h: Vec<f64>,
    pub grid_h_2: Vec<f64>,
    /// Exact derivative on `grid_M_viz`.
    pub derivative_analytics: Vec<f64>,
    pub derivative_in_h: Vec<f64>,
    pub derivative_in_h_2: Vec<f64>,
    /// Richardson-refined derivative, aligned with `grid_h`.
    pub updated_runge: Vec<f64>,
}

impl PlotData {
    fn named(&self) -> [(&'static str, &[f64]); 7] {
        [
            ("grid_M_viz", &self.grid_viz),
            ("grid_h", &self.grid_h),
            ("grid_h_2", &self.grid_h_2),
            ("derivative_analytics", &self.derivative_analytics),
            ("derivative_in_h", &self.derivative_in_h),
            ("derivative_in_h_2", &self.derivative_in_h_2),
            ("updated_runge", &self.updated_runge),
        ]
    }

    /// Every array must be non-empty and match the length of its grid.
    pub fn validate(&self) -> Result<()> {
        for (name, values) in self.named() {
            if values.is_empty() {
                return Err(DiffError::invalid(format!("array `{name}` is empty")));
            }
        }
        let pairs = [
            ("derivative_analytics", &self.derivative_analytics, "grid_M_viz", &self.grid_viz),
            ("derivative_in_h", &self.derivative_in_h, "grid_h", &self.grid_h),
            ("derivative_in_h_2", &self.derivative_in_h_2, "grid_h_2", &self.grid_h_2),
            ("updated_runge", &self.updated_runge, "grid_h", &self.grid_h),
        ];
        for (name, values, grid_name, grid) in pairs {
            if values.len() != grid.len() {
                return Err(DiffError::invalid(format!(
                    "array `{name}` has {} values but `{grid_name}` has {} nodes",
                    values.len(),
                    grid.len()
                )));
            }
        }
        Ok(())
    }
}

/// Validate and write the report. Nothing touches the filesystem when
/// validation fails.
pub fn write_report<P: AsRef<Path>>(path: P, data: &PlotData) -> Result<()> {
    data.validate()?;
    write_json(&path, data)?;
    tracing::info!(target: "rrdiff", path = %path.as_ref().display(), "report written");
    Ok(())
}

pub fn read_report<P: AsRef<Path>>(path: P) -> Result<PlotData> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlotData {
        PlotData {
            grid_viz: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            grid_h: vec![0.0, 1.0],
            grid_h_2: vec![0.0, 0.5, 1.0],
            derivative_analytics: vec![1.0, 0.97, 0.88, 0.73, 0.54],
            derivative_in_h: vec![0.8, 0.6],
            derivative_in_h_2: vec![0.9, 0.85, 0.55],
            updated_runge: vec![1.0 / 3.0, -2.0],
        }
    }

    #[test]
    fn round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let data = sample();
        write_report(&path, &data).unwrap();
        let back = read_report(&path).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn keys_use_report_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_report(&path, &sample()).unwrap();
        let raw: serde_json::Value = load_json(&path).unwrap();
        let obj = raw.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert!(obj.contains_key("grid_M_viz"));
        assert_eq!(obj["grid_h_2"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn empty_array_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut data = sample();
        data.derivative_in_h_2.clear();
        let err = write_report(&path, &data).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!path.exists());
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let mut data = sample();
        data.updated_runge.push(0.0);
        assert!(data.validate().is_err());
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("data.json");
        let err = write_report(&path, &sample()).unwrap_err();
        assert!(matches!(err, DiffError::Io(_)));
    }
}
