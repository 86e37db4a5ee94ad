//! Convergence behaviour of the finite-difference scheme and the
//! Runge–Romberg refinement on the built-in sine study.

use rrdiff::{
    analysis, differentiate, extrapolate, generate_uniform_grid, AnalyticFunction,
    Pipeline, PipelineConfig, Quantity,
};

fn sine_error_linf(nodes: usize) -> f64 {
    let (a, b) = (-4.0, 4.0);
    let h = (b - a) / (nodes - 1) as f64;
    let x = generate_uniform_grid(h, nodes, a, b).unwrap();
    let f = rrdiff::evaluate(true, &x).unwrap();
    let exact = rrdiff::evaluate(false, &x).unwrap();
    let df = differentiate(&f, h).unwrap();
    analysis::compare(&exact, &df).unwrap().absolute.linf
}

#[test]
fn differentiation_is_second_order() {
    let nodes = [16, 31, 61, 121];
    let errors: Vec<f64> = nodes.iter().map(|&n| sine_error_linf(n)).collect();
    for pair in errors.windows(2) {
        let ratio = pair[0] / pair[1];
        println!("halving h: error ratio {ratio}");
        assert!(
            ratio > 3.0 && ratio < 5.0,
            "ratio {ratio} is not second order"
        );
    }
}

#[test]
fn pipeline_errors_shrink_with_resolution() {
    let report = Pipeline::new(PipelineConfig::default()).run().unwrap();
    let errors = &report.errors;
    let ratio = errors.h.absolute.linf / errors.h_2.absolute.linf;
    assert!(ratio > 3.0 && ratio < 5.0, "ratio {ratio}");
}

#[test]
fn richardson_beats_both_inputs() {
    let report = Pipeline::new(PipelineConfig::default()).run().unwrap();
    let errors = &report.errors;
    assert!(errors.runge.absolute.l2 < errors.h.absolute.l2);
    assert!(errors.runge.absolute.l2 < errors.h_2.absolute.l2);
    assert!(errors.runge.absolute.linf < errors.h_2.absolute.linf);
}

#[test]
fn leading_error_tracks_coarse_error() {
    // The extracted term estimates the fine grid's error, a quarter of the
    // coarse one for a second-order scheme.
    let report = Pipeline::new(PipelineConfig::default()).run().unwrap();
    let leading = report.errors.leading_error.l1;
    let coarse = report.errors.h.absolute.l1;
    let ratio = coarse / leading;
    assert!(ratio > 3.0 && ratio < 5.0, "ratio {ratio}");
}

#[test]
fn extrapolation_of_exact_quadratic_estimates_is_exact() {
    // For f = x^2 every stencil is exact, so both estimates agree and the
    // leading error term vanishes.
    let h = 0.5;
    let coarse: Vec<f64> = (0..5).map(|i| (i as f64 * h).powi(2)).collect();
    let fine: Vec<f64> = (0..9).map(|i| (i as f64 * h / 2.0).powi(2)).collect();
    let d_coarse = differentiate(&coarse, h).unwrap();
    let d_fine = differentiate(&fine, h / 2.0).unwrap();
    let ex = extrapolate(&d_fine, &d_coarse, h / 2.0, h).unwrap();
    for (j, (r, e)) in ex.refined.iter().zip(&ex.leading_error).enumerate() {
        assert!((r - 2.0 * j as f64 * h).abs() < 1e-12);
        assert!(e.abs() < 1e-12);
    }
}

struct Exponential;

impl AnalyticFunction for Exponential {
    fn evaluate(&self, x: f64) -> f64 {
        x.exp()
    }
    fn differentiate_exact(&self, x: f64) -> f64 {
        x.exp()
    }
    fn name(&self) -> &str {
        "exp"
    }
}

#[test]
fn pipeline_accepts_other_functions() {
    let mut cfg = PipelineConfig::default();
    cfg.interval.a = 0.0;
    cfg.interval.b = 1.0;
    cfg.grid.nodes = 21;
    let report = Pipeline::with_function(cfg, Exponential).run().unwrap();
    assert_eq!(report.function, "exp");
    assert_eq!(report.errors.h.relative_samples, 21);
    assert!(report.errors.runge.absolute.linf < report.errors.h_2.absolute.linf);
    let exact = rrdiff::sample(&Exponential, Quantity::Derivative, &report.coarse.x).unwrap();
    assert_eq!(exact, report.coarse.df);
}
