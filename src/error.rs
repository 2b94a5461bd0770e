//! Tipos de error de emlmr.
//!
//! Los errores por archivo (`ExtractError`) se registran y nunca detienen la
//! ejecución; los de configuración y de destino sí terminan el proceso.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fallos al interpretar un mensaje individual.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no se pudo interpretar el mensaje: {0}")]
    Parse(String),

    #[error("el mensaje no contiene campos de cabecera")]
    NoHeaders,
}

/// Opciones inválidas detectadas antes de tocar el sistema de archivos.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se especificaron archivos")]
    NoFiles,

    #[error("delimitador inválido `{0}`: debe ser un único carácter ASCII, `tab` o `\\t`")]
    InvalidDelimiter(String),
}

/// Fallos del destino del reporte; siempre son fatales.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no se pudo crear `{path}`: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("no se pudo escribir `{path}`: {source}")]
    Write { path: PathBuf, source: csv::Error },

    #[error("no se pudo escribir en la salida estándar: {0}")]
    Stdout(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl AppError {
    /// Código de salida del proceso para este error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Report(_) => 1,
        }
    }
}
