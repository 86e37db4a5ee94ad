//! SVG chart of the report: the exact derivative as a line on the dense grid,
//! and the three numerical estimates as markers on their own grids.

use std::error::Error;

use plotters::prelude::*;
use rrdiff::PlotData;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 800;

fn bounds<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> (f64, f64) {
    series
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

pub fn render(path: &str, data: &PlotData) -> Result<(), Box<dyn Error>> {
    data.validate()?;
    let (x_min, x_max) = bounds([data.grid_viz.as_slice()]);
    let (y_lo, y_hi) = bounds([
        data.derivative_analytics.as_slice(),
        data.derivative_in_h.as_slice(),
        data.derivative_in_h_2.as_slice(),
        data.updated_runge.as_slice(),
    ]);
    let pad = 0.1 * (y_hi - y_lo).max(f64::EPSILON);

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Derivative: analytic vs finite differences", ("sans-serif", 30.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, (y_lo - pad)..(y_hi + pad))?;

    chart.configure_mesh().x_desc("X").y_desc("Y").draw()?;

    chart
        .draw_series(LineSeries::new(
            data.grid_viz
                .iter()
                .zip(&data.derivative_analytics)
                .map(|(x, y)| (*x, *y)),
            BLUE.stroke_width(2),
        ))?
        .label("analyt")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    let markers: [(&str, &[f64], &[f64], RGBColor, i32); 3] = [
        ("h", &data.grid_h, &data.derivative_in_h, RGBColor(128, 0, 128), 6),
        ("h_2", &data.grid_h_2, &data.derivative_in_h_2, RED, 5),
        ("runge", &data.grid_h, &data.updated_runge, GREEN, 4),
    ];
    for (label, xs, ys, color, size) in markers {
        chart
            .draw_series(
                xs.iter()
                    .zip(ys)
                    .map(move |(x, y)| Circle::new((*x, *y), size, color.filled())),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), size, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path, "plot written");
    Ok(())
}
