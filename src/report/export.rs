//! Exportación del reporte como texto delimitado.
//!
//! Los valores se escriben tal cual: no se agregan comillas ni se escapan
//! delimitadores contenidos en los valores.

use crate::error::ReportError;
use crate::report::Report;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Escribe la cabecera y una línea por fila en `writer`.
pub fn write_delimited<W: Write>(report: &Report, writer: W, delimiter: u8) -> csv::Result<()> {
    match report.spec.columns.len() {
        0 => return Ok(()),
        1 => return write_single_column(report, writer),
        _ => {}
    }

    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(&report.spec.columns)?;
    for cells in report.cells() {
        csv_writer.write_record(&cells)?;
    }
    csv_writer.flush()?;
    Ok(())
}

// csv escribe `""` para un registro con un único campo vacío, aun sin comillas.
fn write_single_column<W: Write>(report: &Report, writer: W) -> csv::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", report.spec.columns[0])?;
    for cells in report.cells() {
        writeln!(writer, "{}", cells[0])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_delimited(report: &Report, path: &Path, delimiter: u8) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    write_delimited(report, file, delimiter).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
