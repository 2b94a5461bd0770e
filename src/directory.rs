//! Resolución de rutas: patrones glob, archivos y directorios a una lista
//! plana de rutas absolutas.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Expande los patrones de entrada a rutas absolutas de archivos.
///
/// El resultado no tiene duplicados y sigue el orden de los patrones; dentro
/// de cada directorio los hijos se visitan por nombre, en profundidad. Los
/// errores de cada ruta se registran y la ruta se omite.
pub fn resolve_paths(patterns: &[String], recursive: bool) -> Vec<PathBuf> {
    let expanded: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| expand_pattern(pattern))
        .collect();

    let mut pending: Vec<PathBuf> = expanded.into_iter().rev().collect();
    let mut visited_dirs = HashSet::new();
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    while let Some(path) = pending.pop() {
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                warn!(path = %path.display(), %error, "no se pudo obtener la metadata de la ruta");
                continue;
            }
        };

        if metadata.is_dir() {
            if !recursive {
                debug!(path = %path.display(), "directorio omitido sin --recursive");
                continue;
            }

            let real_path = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if !visited_dirs.insert(real_path) {
                debug!(path = %path.display(), "directorio ya visitado");
                continue;
            }

            let children = list_children(&path);
            pending.extend(children.into_iter().rev());
        } else if seen.insert(path.clone()) {
            resolved.push(path);
        }
    }

    resolved
}

fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let matches: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(error) => {
                    warn!(pattern, %error, "no se pudo leer una coincidencia del patrón");
                    None
                }
            })
            .collect(),
        Err(error) => {
            warn!(pattern, %error, "patrón glob inválido, se usará como ruta literal");
            Vec::new()
        }
    };

    let matches = if matches.is_empty() {
        vec![PathBuf::from(pattern)]
    } else {
        matches
    };

    matches
        .into_iter()
        .filter_map(|path| match std::path::absolute(&path) {
            Ok(absolute) => Some(absolute),
            Err(error) => {
                warn!(path = %path.display(), %error, "no se pudo convertir a ruta absoluta");
                None
            }
        })
        .collect()
}

fn list_children(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(error) => {
                warn!(path = %dir.display(), %error, "no se pudo listar el directorio");
                None
            }
        })
        .collect()
}
