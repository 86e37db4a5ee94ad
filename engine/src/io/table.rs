use prettytable::{format, row, Cell, Row, Table};

use crate::analysis::{ErrorSummary, Norms};

fn norm_row(label: &str, norms: &Norms) -> Row {
    let mut cells = vec![Cell::new(label)];
    cells.extend(
        norms
            .as_array()
            .iter()
            .map(|v| Cell::new(&format!("{v:.6e}")).style_spec("r")),
    );
    Row::new(cells)
}

/// Render the error table: absolute and relative norms for both resolutions
/// and the refined estimate, then the leading error term next to the coarse
/// grid's absolute error.
pub fn render_error_table(summary: &ErrorSummary) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["error", c->"L1", c->"L2", c->"L∞"]);

    table.add_row(norm_row("h, absolute", &summary.h.absolute));
    table.add_row(norm_row("h, relative", &summary.h.relative));
    table.add_row(norm_row("h/2, absolute", &summary.h_2.absolute));
    table.add_row(norm_row("h/2, relative", &summary.h_2.relative));
    table.add_row(norm_row("runge, absolute", &summary.runge.absolute));
    table.add_row(norm_row("runge, relative", &summary.runge.relative));

    table.add_row(row![b->"leading term vs h", bc->"L1", bc->"L2", bc->"L∞"]);
    table.add_row(norm_row("leading error term", &summary.leading_error));
    table.add_row(norm_row("h, absolute", &summary.h.absolute));

    table.to_string()
}
