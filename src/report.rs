//! Ensamblado del reporte: filas por mensaje y selección de columnas.

pub mod export;
pub mod renderer;

use crate::config::FieldSelection;
use crate::error::ReportError;
use crate::metadata::{DigestKind, FieldSet, MetadataRow};
use std::path::{Path, PathBuf};

pub const FILENAME_FIELD: &str = "filename";
pub const PATH_FIELD: &str = "path";

/// Destino del reporte; solo se produce una de las dos salidas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sink {
    Console,
    Delimited { path: PathBuf, delimiter: u8 },
}

/// Columnas finales y destino elegido.
#[derive(Clone, Debug)]
pub struct ReportSpec {
    pub columns: Vec<String>,
    pub sink: Sink,
}

#[derive(Clone, Debug)]
pub struct Report {
    pub spec: ReportSpec,
    pub rows: Vec<MetadataRow>,
}

impl Report {
    /// Celdas de cada fila en el orden de las columnas.
    pub fn cells(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|row| {
            self.spec
                .columns
                .iter()
                .map(|column| row.value_or_empty(column))
                .collect()
        })
    }

    pub fn render(&self) -> Result<(), ReportError> {
        match &self.spec.sink {
            Sink::Console => renderer::print_report(self),
            Sink::Delimited { path, delimiter } => {
                export::export_delimited(self, path, *delimiter)
            }
        }
    }
}

/// Acumula las filas procesadas y los campos vistos.
#[derive(Debug)]
pub struct ReportBuilder<'a> {
    selection: &'a FieldSelection,
    digests: &'a [DigestKind],
    rows: Vec<MetadataRow>,
    fields_hit: FieldSet,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(selection: &'a FieldSelection, digests: &'a [DigestKind]) -> Self {
        Self {
            selection,
            digests,
            rows: Vec::new(),
            fields_hit: FieldSet::new(),
        }
    }

    /// Agrega la fila de `path`, sumando `filename` y `path` si se pidieron.
    pub fn push(&mut self, path: &Path, mut row: MetadataRow) {
        if self.selection.includes(FILENAME_FIELD) {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            row.insert(FILENAME_FIELD, filename);
        }
        if self.selection.includes(PATH_FIELD) {
            row.insert(PATH_FIELD, path.display().to_string());
        }

        self.fields_hit.extend(row.field_names());
        self.rows.push(row);
    }

    /// Columnas efectivas: la unión ordenada con `all`, la lista tal cual en
    /// otro caso; los digests se agregan al final si aún no figuran.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = match self.selection {
            FieldSelection::All => self.fields_hit.sorted(),
            FieldSelection::Explicit(fields) => fields.clone(),
        };

        for digest in self.digests {
            let name = digest.field_name();
            if !columns.iter().any(|column| column == name) {
                columns.push(name.to_string());
            }
        }

        columns
    }

    pub fn finish(self, sink: Sink) -> Report {
        let columns = self.columns();
        Report {
            spec: ReportSpec { columns, sink },
            rows: self.rows,
        }
    }
}
