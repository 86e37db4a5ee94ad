use crate::{
    analytic::{sample, AnalyticFunction, Quantity},
    errors::{DiffError, Result},
};

use super::{generate_uniform_grid, Grid, GridSpec, SampledGrid};

/// Merge `extra_node_count` evenly spaced points over the span of `old_grid`
/// into it. The shared endpoints collapse, so the result holds
/// `old_grid.len() + extra_node_count - 2` nodes.
pub fn refine_within(old_grid: &[f64], extra_node_count: usize) -> Result<Grid> {
    if old_grid.len() < 2 {
        return Err(DiffError::invalid(format!(
            "grid to refine needs at least 2 nodes, got {}",
            old_grid.len()
        )));
    }
    if extra_node_count < 2 {
        return Err(DiffError::invalid(format!(
            "extra node count must be at least 2, got {extra_node_count}"
        )));
    }
    let first = old_grid[0];
    let last = old_grid[old_grid.len() - 1];
    let step = (last - first).abs() / (extra_node_count - 1) as f64;
    let candidates = generate_uniform_grid(step, extra_node_count, first, last)?;
    let interior = &candidates[1..extra_node_count - 1];

    let mut merged = Vec::with_capacity(old_grid.len() + interior.len());
    let (mut i, mut j) = (0, 0);
    while i < old_grid.len() && j < interior.len() {
        if old_grid[i] <= interior[j] {
            merged.push(old_grid[i]);
            i += 1;
        } else {
            merged.push(interior[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&old_grid[i..]);
    merged.extend_from_slice(&interior[j..]);
    Ok(merged)
}

/// Produce a grid `ratio` times denser than `prior`, or a fresh one from
/// `init` when there is no prior grid.
///
/// Node `i` of the prior grid lands on index `i * ratio` and keeps its
/// coordinate and samples untouched; only the `ratio - 1` nodes inserted in
/// each interval are evaluated. A fresh grid requires `ratio == 1`. `init`
/// only describes the fresh grid and is ignored once a prior is given.
pub fn refine_and_resample<F>(
    function: &F,
    prior: Option<&SampledGrid>,
    init: &GridSpec,
    ratio: usize,
) -> Result<SampledGrid>
where
    F: AnalyticFunction + ?Sized,
{
    if ratio == 0 {
        return Err(DiffError::invalid("refinement ratio must be at least 1"));
    }

    let Some(prior) = prior else {
        if ratio != 1 {
            return Err(DiffError::invalid(format!(
                "cannot refine by {ratio} without a base grid"
            )));
        }
        if init.nodes < 2 {
            return Err(DiffError::invalid(format!(
                "initial grid needs at least 2 nodes, got {}",
                init.nodes
            )));
        }
        if init.b - init.a <= f64::EPSILON {
            return Err(DiffError::invalid(format!(
                "invalid range: [{}, {}]",
                init.a, init.b
            )));
        }
        let x = generate_uniform_grid(init.step(), init.nodes, init.a, init.b)?;
        let f = sample(function, Quantity::Primal, &x)?;
        let df = sample(function, Quantity::Derivative, &x)?;
        return Ok(SampledGrid { x, f, df });
    };

    if !prior.validate() {
        return Err(DiffError::invalid(
            "base grid samples are not aligned with its nodes",
        ));
    }
    if prior.len() < 2 {
        return Err(DiffError::invalid(format!(
            "base grid needs at least 2 nodes, got {}",
            prior.len()
        )));
    }
    if ratio == 1 {
        return Ok(prior.clone());
    }

    let inserted = ratio - 1;
    let new_len = refined_len(prior.len(), ratio)?;
    let mut fresh_x = Vec::with_capacity(new_len - prior.len());
    for pair in prior.x.windows(2) {
        let h = (pair[1] - pair[0]) / ratio as f64;
        fresh_x.extend((1..ratio).map(|k| pair[0] + k as f64 * h));
    }
    let fresh_f = sample(function, Quantity::Primal, &fresh_x)?;
    let fresh_df = sample(function, Quantity::Derivative, &fresh_x)?;

    let mut out = SampledGrid {
        x: Vec::with_capacity(new_len),
        f: Vec::with_capacity(new_len),
        df: Vec::with_capacity(new_len),
    };
    for i in 0..prior.len() {
        out.x.push(prior.x[i]);
        out.f.push(prior.f[i]);
        out.df.push(prior.df[i]);
        if i + 1 < prior.len() {
            let span = i * inserted..(i + 1) * inserted;
            out.x.extend_from_slice(&fresh_x[span.clone()]);
            out.f.extend_from_slice(&fresh_f[span.clone()]);
            out.df.extend_from_slice(&fresh_df[span]);
        }
    }
    debug_assert_eq!(out.len(), new_len);
    tracing::debug!(
        target: "rrdiff",
        from = prior.len(),
        to = out.len(),
        ratio,
        "refined grid"
    );
    Ok(out)
}

/// Node count of a grid with `nodes` nodes after subdividing every interval
/// `ratio` times: `(nodes - 1) * ratio + 1`.
pub fn refined_len(nodes: usize, ratio: usize) -> Result<usize> {
    nodes
        .saturating_sub(1)
        .checked_mul(ratio)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| DiffError::invalid("refined grid size overflows"))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::analytic::Sine;

    fn pi_spec() -> GridSpec {
        GridSpec::new(0.0, PI, 4)
    }

    #[test]
    fn fresh_grid_on_zero_pi() {
        let grid = refine_and_resample(&Sine, None, &pi_spec(), 1).unwrap();
        let expected = [0.0, PI / 3.0, 2.0 * PI / 3.0, PI];
        assert_eq!(grid.len(), 4);
        for (x, e) in grid.x.iter().zip(expected) {
            assert_relative_eq!(*x, e, epsilon = 1e-15);
        }
        assert_eq!(grid.x[3], PI);
        for i in 0..4 {
            assert_eq!(grid.f[i], grid.x[i].sin());
            assert_eq!(grid.df[i], grid.x[i].cos());
        }
    }

    #[test]
    fn ratio_two_keeps_old_samples_bit_for_bit() {
        let coarse = refine_and_resample(&Sine, None, &pi_spec(), 1).unwrap();
        let fine = refine_and_resample(&Sine, Some(&coarse), &pi_spec(), 2).unwrap();
        assert_eq!(fine.len(), 7);
        for (i, j) in [0usize, 2, 4, 6].into_iter().enumerate() {
            assert_eq!(fine.x[j].to_bits(), coarse.x[i].to_bits());
            assert_eq!(fine.f[j].to_bits(), coarse.f[i].to_bits());
            assert_eq!(fine.df[j].to_bits(), coarse.df[i].to_bits());
        }
        assert_relative_eq!(fine.x[1], PI / 6.0, epsilon = 1e-15);
        assert_relative_eq!(fine.f[1], 0.5, epsilon = 1e-15);
        assert!(fine.x.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn general_ratio_length() {
        let coarse = refine_and_resample(&Sine, None, &GridSpec::new(-4.0, 4.0, 30), 1).unwrap();
        let dense = refine_and_resample(&Sine, Some(&coarse), &GridSpec::new(-4.0, 4.0, 30), 5)
            .unwrap();
        assert_eq!(dense.len(), 30 * 5 - 4);
        assert!(dense.validate());
        assert_eq!(*dense.x.last().unwrap(), 4.0);
    }

    #[test]
    fn unit_ratio_returns_prior_unchanged() {
        let coarse = refine_and_resample(&Sine, None, &pi_spec(), 1).unwrap();
        // `init` is not consulted once a base grid exists
        let unused = GridSpec::new(1.0, 1.0, 0);
        let same = refine_and_resample(&Sine, Some(&coarse), &unused, 1).unwrap();
        assert_eq!(same, coarse);
    }

    #[test]
    fn oversized_ratio_is_rejected() {
        let coarse = refine_and_resample(&Sine, None, &pi_spec(), 1).unwrap();
        let err = refine_and_resample(&Sine, Some(&coarse), &pi_spec(), usize::MAX / 2)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(refined_len(3, usize::MAX).is_err());
        assert_eq!(refined_len(21, 4).unwrap(), 81);
    }

    #[test]
    fn ratio_without_base_is_rejected() {
        let err = refine_and_resample(&Sine, None, &pi_spec(), 2).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn bad_preconditions_are_rejected() {
        assert!(refine_and_resample(&Sine, None, &GridSpec::new(0.0, PI, 1), 1).is_err());
        assert!(refine_and_resample(&Sine, None, &GridSpec::new(1.0, 1.0, 4), 1).is_err());
        assert!(refine_and_resample(&Sine, None, &pi_spec(), 0).is_err());
        let broken = SampledGrid {
            x: vec![0.0, 1.0],
            f: vec![0.0],
            df: vec![1.0, 1.0],
        };
        assert!(refine_and_resample(&Sine, Some(&broken), &pi_spec(), 2).is_err());
    }

    #[test]
    fn insertion_refinement_length() {
        let old = vec![0.0, 1.0, 2.0, 3.0];
        let merged = refine_within(&old, 7).unwrap();
        assert_eq!(merged.len(), old.len() + 7 - 2);
        assert_eq!(merged[0], 0.0);
        assert_eq!(*merged.last().unwrap(), 3.0);
        assert!(merged.windows(2).all(|w| w[0] <= w[1]));
        assert!(merged.contains(&0.5));
    }

    #[test]
    fn insertion_refinement_rejects_small_inputs() {
        assert!(refine_within(&[1.0], 5).is_err());
        assert!(refine_within(&[0.0, 1.0], 1).is_err());
        assert!(refine_within(&[], 5).unwrap_err().is_invalid_argument());
    }
}
