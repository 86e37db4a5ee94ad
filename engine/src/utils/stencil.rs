use crate::errors::{DiffError, Result};

/// First derivative of uniformly spaced samples, second order everywhere:
/// central differences inside, three-point one-sided stencils at both edges.
pub fn differentiate(samples: &[f64], step: f64) -> Result<Vec<f64>> {
    let n = samples.len();
    if n < 3 {
        return Err(DiffError::invalid(format!(
            "differentiation needs at least 3 samples, got {n}"
        )));
    }
    if !(step.abs() > f64::EPSILON) {
        return Err(DiffError::invalid(format!("step {step} is too small")));
    }
    let two_h = 2.0 * step;
    let mut out = vec![0.0; n];
    out[0] = (-3.0 * samples[0] + 4.0 * samples[1] - samples[2]) / two_h;
    for i in 1..n - 1 {
        out[i] = (samples[i + 1] - samples[i - 1]) / two_h;
    }
    out[n - 1] = (3.0 * samples[n - 1] - 4.0 * samples[n - 2] + samples[n - 3]) / two_h;
    Ok(out)
}
