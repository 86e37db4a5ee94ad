//! Closed-form test functions and the sampler that evaluates them on a grid.

use crate::errors::{DiffError, Result};

pub mod sine;

pub use sine::Sine;

/// A smooth function with a known derivative, used as the reference for
/// numerical differentiation.
pub trait AnalyticFunction {
    fn evaluate(&self, x: f64) -> f64;
    fn differentiate_exact(&self, x: f64) -> f64;
    fn name(&self) -> &str;
}

/// Which of the two closed forms to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// The function itself.
    Primal,
    /// Its exact first derivative.
    Derivative,
}

impl Quantity {
    pub fn from_primal_flag(is_primal: bool) -> Self {
        if is_primal {
            Self::Primal
        } else {
            Self::Derivative
        }
    }
}

/// Evaluate `function` (or its exact derivative) at every coordinate.
pub fn sample<F>(function: &F, quantity: Quantity, coordinates: &[f64]) -> Result<Vec<f64>>
where
    F: AnalyticFunction + ?Sized,
{
    if coordinates.is_empty() {
        return Err(DiffError::invalid("cannot sample on an empty set of coordinates"));
    }
    let values = match quantity {
        Quantity::Primal => coordinates.iter().map(|&x| function.evaluate(x)).collect(),
        Quantity::Derivative => coordinates
            .iter()
            .map(|&x| function.differentiate_exact(x))
            .collect(),
    };
    Ok(values)
}

/// Sample the built-in test function: sine when `is_primal`, cosine otherwise.
pub fn evaluate(is_primal: bool, coordinates: &[f64]) -> Result<Vec<f64>> {
    sample(&Sine, Quantity::from_primal_flag(is_primal), coordinates)
}
