//! Opciones de línea de comandos y configuración validada de una ejecución.

use crate::error::ConfigError;
use crate::metadata::DigestKind;
use crate::report::Sink;
use clap::Parser;
use std::path::PathBuf;

const ALL_FIELDS: &str = "all";

#[derive(Parser, Debug)]
#[command(name = "emlmr")]
#[command(about = "Genera un reporte con la metadata de cabecera de archivos EML", long_about = None)]
#[command(version)]
pub struct Options {
    /// Archivos, directorios o patrones glob a analizar
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Incluye FIELD en el reporte; `all` incluye todos los campos encontrados
    #[arg(
        short = 'f',
        long = "field",
        value_name = "FIELD",
        default_value = ALL_FIELDS,
        value_delimiter = ','
    )]
    pub fields: Vec<String>,

    /// Calcula el digest indicado para cada mensaje
    #[arg(long = "digest", value_enum, value_name = "KIND")]
    pub digests: Vec<DigestKind>,

    /// Lee todos los archivos bajo cada directorio, recursivamente
    #[arg(short, long)]
    pub recursive: bool,

    /// Usa DELIM en lugar de la coma como separador de campos
    #[arg(short, long, value_name = "DELIM", default_value = ",")]
    pub delimiter: String,

    /// Escribe el reporte delimitado en FILE en lugar de la tabla en stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Solo lista los campos de metadata encontrados
    #[arg(short, long)]
    pub list_fields: bool,

    /// No muestra la barra de progreso
    #[arg(long)]
    pub no_progress: bool,
}

/// Qué columnas pidió el usuario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldSelection {
    All,
    Explicit(Vec<String>),
}

impl FieldSelection {
    /// Normaliza los nombres a minúsculas; `all` en cualquier posición gana.
    pub fn from_requested(requested: &[String]) -> Self {
        let fields: Vec<String> = requested
            .iter()
            .map(|field| field.trim().to_lowercase())
            .filter(|field| !field.is_empty())
            .collect();

        if fields.is_empty() || fields.iter().any(|field| field == ALL_FIELDS) {
            FieldSelection::All
        } else {
            FieldSelection::Explicit(fields)
        }
    }

    pub fn includes(&self, field: &str) -> bool {
        match self {
            FieldSelection::All => true,
            FieldSelection::Explicit(fields) => fields.iter().any(|name| name == field),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Report,
    ListFields,
}

/// Configuración de una ejecución, construida una sola vez a partir de
/// [`Options`] y pasada explícitamente a cada etapa.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub patterns: Vec<String>,
    pub recursive: bool,
    pub selection: FieldSelection,
    pub digests: Vec<DigestKind>,
    pub sink: Sink,
    pub mode: Mode,
    pub show_progress: bool,
}

impl ReportConfig {
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        if options.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }

        let delimiter = parse_delimiter(&options.delimiter)?;
        let sink = match options.output {
            Some(path) => Sink::Delimited { path, delimiter },
            None => Sink::Console,
        };

        let mut digests = Vec::with_capacity(options.digests.len());
        for digest in options.digests {
            if !digests.contains(&digest) {
                digests.push(digest);
            }
        }

        Ok(Self {
            patterns: options.files,
            recursive: options.recursive,
            selection: FieldSelection::from_requested(&options.fields),
            digests,
            sink,
            mode: if options.list_fields {
                Mode::ListFields
            } else {
                Mode::Report
            },
            show_progress: !options.no_progress,
        })
    }
}

/// Acepta un único carácter ASCII, o `tab` / `\t` para el tabulador.
pub fn parse_delimiter(input: &str) -> Result<u8, ConfigError> {
    match input {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        _ => {}
    }

    match input.as_bytes() {
        [byte] if byte.is_ascii() && *byte != b'\n' && *byte != b'\r' => Ok(*byte),
        _ => Err(ConfigError::InvalidDelimiter(input.to_string())),
    }
}
