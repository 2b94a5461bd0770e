//! Tabla alineada y sin bordes para la salida en consola.

use crate::error::ReportError;
use crate::report::Report;
use comfy_table::presets::NOTHING;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

pub fn build_table(report: &Report) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(report.spec.columns.iter().map(String::as_str));

    for cells in report.cells() {
        table.add_row(cells);
    }

    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Left);
    }

    table
}

/// Imprime el reporte en stdout; sin columnas no imprime nada.
pub fn print_report(report: &Report) -> Result<(), ReportError> {
    if report.spec.columns.is_empty() {
        return Ok(());
    }

    let table = build_table(report);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{table}")?;
    stdout.flush()?;
    Ok(())
}
