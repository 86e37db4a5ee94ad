use super::AnalyticFunction;

/// `sin(x)` with derivative `cos(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sine;

impl AnalyticFunction for Sine {
    fn evaluate(&self, x: f64) -> f64 {
        x.sin()
    }

    fn differentiate_exact(&self, x: f64) -> f64 {
        x.cos()
    }

    fn name(&self) -> &str {
        "sin"
    }
}
