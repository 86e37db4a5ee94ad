use serde::{Deserialize, Serialize};

use crate::errors::{DiffError, Result};

/// Resolution ratio between the two estimates.
pub const RATIO: usize = 2;
/// Order of the schemes being combined.
pub const ORDER: i32 = 2;

/// Refined derivative and the truncation error it removed, both on the
/// coarse grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extrapolation {
    pub refined: Vec<f64>,
    pub leading_error: Vec<f64>,
}

/// Runge–Romberg combination of second-order estimates on grids with steps
/// `h` and `h / 2`. Coarse node `j` coincides with fine node `2 * j`.
pub fn extrapolate(
    derivative_fine: &[f64],
    derivative_coarse: &[f64],
    step_fine: f64,
    step_coarse: f64,
) -> Result<Extrapolation> {
    let fine_count = derivative_fine.len();
    let coarse_count = derivative_coarse.len();
    if fine_count < 2 || coarse_count < 2 {
        return Err(DiffError::invalid(format!(
            "extrapolation needs at least 2 nodes per grid, got fine={fine_count} coarse={coarse_count}"
        )));
    }
    if coarse_count > fine_count || fine_count < RATIO * (coarse_count - 1) + 1 {
        return Err(DiffError::invalid(format!(
            "fine grid ({fine_count}) is not a {RATIO}x refinement of coarse grid ({coarse_count})"
        )));
    }
    if !((step_fine - step_coarse).abs() > f64::EPSILON) {
        return Err(DiffError::invalid(format!(
            "steps {step_fine} and {step_coarse} are indistinguishable"
        )));
    }

    let denom = (RATIO as f64).powi(ORDER) - 1.0;
    let mut out = Extrapolation {
        refined: Vec::with_capacity(coarse_count),
        leading_error: Vec::with_capacity(coarse_count),
    };
    for (j, coarse) in derivative_coarse.iter().enumerate() {
        let fine = derivative_fine[RATIO * j];
        let err = (fine - coarse) / denom;
        out.leading_error.push(err);
        out.refined.push(fine + err);
    }
    Ok(out)
}
