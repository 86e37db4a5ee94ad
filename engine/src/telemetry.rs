use metrics::{counter, gauge};

use crate::analysis::{ErrorNorms, Norms};

fn record_norms(prefix: &'static str, resolution: &'static str, kind: &'static str, norms: &Norms) {
    gauge!(format!("{prefix}.l1"), norms.l1, "resolution" => resolution, "kind" => kind);
    gauge!(format!("{prefix}.l2"), norms.l2, "resolution" => resolution, "kind" => kind);
    gauge!(format!("{prefix}.linf"), norms.linf, "resolution" => resolution, "kind" => kind);
}

/// Publish the absolute/relative norms of one resolution (`h`, `h_2`, `runge`).
pub fn record_errors(resolution: &'static str, errors: &ErrorNorms) {
    record_norms("rrdiff.error", resolution, "absolute", &errors.absolute);
    record_norms("rrdiff.error", resolution, "relative", &errors.relative);
    gauge!(
        "rrdiff.error.relative_samples",
        errors.relative_samples as f64,
        "resolution" => resolution
    );
}

pub fn record_leading_error(norms: &Norms) {
    record_norms("rrdiff.leading_error", "h", "magnitude", norms);
}

pub fn record_run(nodes: usize) {
    counter!("rrdiff.pipeline.runs", 1);
    gauge!("rrdiff.pipeline.coarse_nodes", nodes as f64);
}
