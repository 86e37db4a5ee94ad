use serde::{Deserialize, Serialize};

use crate::{
    analysis::{self, ErrorSummary},
    analytic::{sample, AnalyticFunction, Quantity, Sine},
    config::{PipelineConfig, VizRefinement},
    errors::Result,
    grid::{refine_and_resample, refine_within, refined_len, GridSpec, SampledGrid},
    io::PlotData,
    richardson::{self, Extrapolation},
    telemetry,
    utils::differentiate,
};

/// Derivative estimates on the two working grids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Estimates {
    pub h: Vec<f64>,
    pub h_2: Vec<f64>,
}

/// Everything produced by one run of the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    pub function: String,
    pub step: f64,
    pub coarse: SampledGrid,
    pub fine: SampledGrid,
    pub estimates: Estimates,
    pub extrapolation: Extrapolation,
    pub errors: ErrorSummary,
    pub plot: PlotData,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "f={}, nodes={}/{}, l2(h)={:.3e}, l2(h/2)={:.3e}, l2(runge)={:.3e}",
            self.function,
            self.coarse.len(),
            self.fine.len(),
            self.errors.h.absolute.l2,
            self.errors.h_2.absolute.l2,
            self.errors.runge.absolute.l2,
        )
    }
}

/// Differentiation study over a fixed analytic function.
pub struct Pipeline<F = Sine> {
    cfg: PipelineConfig,
    function: F,
}

impl Pipeline<Sine> {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self::with_function(cfg, Sine)
    }
}

impl<F: AnalyticFunction> Pipeline<F> {
    pub fn with_function(cfg: PipelineConfig, function: F) -> Self {
        Self { cfg, function }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn run(&self) -> Result<PipelineReport> {
        let cfg = &self.cfg;
        cfg.validate()?;
        let spec = GridSpec::from_config(cfg);
        let (h, h_2) = (cfg.step(), cfg.fine_step());
        tracing::info!(
            target: "rrdiff",
            function = self.function.name(),
            a = cfg.interval.a,
            b = cfg.interval.b,
            nodes = cfg.grid.nodes,
            "starting differentiation study"
        );

        let coarse = refine_and_resample(&self.function, None, &spec, 1)?;
        let fine = refine_and_resample(&self.function, Some(&coarse), &spec, richardson::RATIO)?;

        let estimates = Estimates {
            h: differentiate(&coarse.f, h)?,
            h_2: differentiate(&fine.f, h_2)?,
        };
        let extrapolation = richardson::extrapolate(&estimates.h_2, &estimates.h, h_2, h)?;

        let (grid_viz, derivative_viz) = self.visualization_grid(&fine)?;

        let errors = ErrorSummary {
            h: analysis::compare(&coarse.df, &estimates.h)?,
            h_2: analysis::compare(&fine.df, &estimates.h_2)?,
            runge: analysis::compare(&coarse.df, &extrapolation.refined)?,
            leading_error: analysis::magnitude(&extrapolation.leading_error)?,
        };

        telemetry::record_run(coarse.len());
        telemetry::record_errors("h", &errors.h);
        telemetry::record_errors("h_2", &errors.h_2);
        telemetry::record_errors("runge", &errors.runge);
        telemetry::record_leading_error(&errors.leading_error);

        let plot = PlotData {
            grid_viz,
            grid_h: coarse.x.clone(),
            grid_h_2: fine.x.clone(),
            derivative_analytics: derivative_viz,
            derivative_in_h: estimates.h.clone(),
            derivative_in_h_2: estimates.h_2.clone(),
            updated_runge: extrapolation.refined.clone(),
        };

        let report = PipelineReport {
            function: self.function.name().to_string(),
            step: h,
            coarse,
            fine,
            estimates,
            extrapolation,
            errors,
            plot,
        };
        tracing::info!(target: "rrdiff", "{}", report.summary());
        Ok(report)
    }

    /// Dense grid and exact derivative used only for plotting.
    fn visualization_grid(&self, fine: &SampledGrid) -> Result<(Vec<f64>, Vec<f64>)> {
        let ratio = self.cfg.grid.viz_ratio;
        match self.cfg.grid.viz_refinement {
            VizRefinement::Ratio => {
                let spec = GridSpec::new(self.cfg.interval.a, self.cfg.interval.b, fine.len());
                let dense = refine_and_resample(&self.function, Some(fine), &spec, ratio)?;
                Ok((dense.x, dense.df))
            }
            VizRefinement::Insert => {
                let extra = refined_len(fine.len(), ratio)?;
                let x = refine_within(&fine.x, extra)?;
                let df = sample(&self.function, Quantity::Derivative, &x)?;
                Ok((x, df))
            }
        }
    }
}
