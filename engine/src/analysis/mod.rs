//! L1 / L2 / L∞ error norms between analytic and numerical results.

use serde::{Deserialize, Serialize};

use crate::errors::{DiffError, Result};

/// The three norms of one error sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Norms {
    pub l1: f64,
    pub l2: f64,
    pub linf: f64,
}

impl Norms {
    pub fn as_array(&self) -> [f64; 3] {
        [self.l1, self.l2, self.linf]
    }
}

/// Absolute and relative norms of one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorNorms {
    pub absolute: Norms,
    pub relative: Norms,
    /// Points whose analytic value was large enough to divide by.
    pub relative_samples: usize,
}

/// Everything the error table reports for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Estimate on the coarse grid (step `h`).
    pub h: ErrorNorms,
    /// Estimate on the fine grid (step `h / 2`).
    pub h_2: ErrorNorms,
    /// Richardson-refined estimate, measured on the coarse grid.
    pub runge: ErrorNorms,
    /// Magnitude of the extracted leading error term.
    pub leading_error: Norms,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    sum_sq: f64,
    max: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.max = self.max.max(value);
        self.count += 1;
    }

    fn finish(self) -> Norms {
        Norms {
            l1: self.sum,
            l2: self.sum_sq.sqrt(),
            linf: self.max,
        }
    }
}

/// Compare a numerical result with its analytic reference point by point.
///
/// Relative errors are only accumulated where `|analytical[i]|` exceeds
/// machine epsilon; other points are left out of the relative norms.
pub fn compare(analytical: &[f64], numerical: &[f64]) -> Result<ErrorNorms> {
    if analytical.is_empty() || numerical.is_empty() {
        return Err(DiffError::invalid("cannot compare empty sequences"));
    }
    if analytical.len() != numerical.len() {
        return Err(DiffError::invalid(format!(
            "length mismatch: analytical={} numerical={}",
            analytical.len(),
            numerical.len()
        )));
    }

    let mut absolute = Accumulator::default();
    let mut relative = Accumulator::default();
    for (&exact, &estimate) in analytical.iter().zip(numerical) {
        let abs_err = (exact - estimate).abs();
        absolute.push(abs_err);
        if exact.abs() > f64::EPSILON {
            relative.push(abs_err / exact.abs());
        }
    }

    let skipped = analytical.len() - relative.count;
    if skipped > 0 {
        tracing::debug!(target: "rrdiff", skipped, "near-zero reference values left out of relative norms");
    }
    let relative_samples = relative.count;
    Ok(ErrorNorms {
        absolute: absolute.finish(),
        relative: relative.finish(),
        relative_samples,
    })
}

/// Norms of `|values[i]|` on their own.
pub fn magnitude(values: &[f64]) -> Result<Norms> {
    if values.is_empty() {
        return Err(DiffError::invalid("cannot take norms of an empty sequence"));
    }
    let mut acc = Accumulator::default();
    for v in values {
        acc.push(v.abs());
    }
    Ok(acc.finish())
}
