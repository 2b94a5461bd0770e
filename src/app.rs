use crate::config::{Mode, ReportConfig};
use crate::directory;
use crate::error::ReportError;
use crate::metadata::{
    FieldSet, HeaderSource, MailHeaderSource, MetadataRow, compute_digests, extract_metadata,
};
use crate::report::{Report, ReportBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resultado del recorrido: cuántos archivos entraron y cuántos se omitieron.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub processed: usize,
    pub skipped: usize,
}

pub fn run(config: &ReportConfig) -> Result<(), ReportError> {
    let source = MailHeaderSource;
    match config.mode {
        Mode::Report => {
            let (report, _) = build_report(config, &source);
            report.render()
        }
        Mode::ListFields => {
            let (fields, _) = collect_fields(config, &source);
            let mut stdout = io::stdout().lock();
            for field in fields.sorted() {
                writeln!(stdout, "{field}")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Resuelve las rutas, extrae cada mensaje y arma el reporte.
pub fn build_report(config: &ReportConfig, source: &dyn HeaderSource) -> (Report, ScanSummary) {
    let paths = directory::resolve_paths(&config.patterns, config.recursive);
    let mut builder = ReportBuilder::new(&config.selection, &config.digests);

    let summary = scan_files(&paths, source, config.show_progress, |path, content, mut row| {
        for (field, value) in compute_digests(content, &config.digests) {
            row.insert(field, value);
        }
        builder.push(path, row);
    });

    (builder.finish(config.sink.clone()), summary)
}

/// Igual que el reporte, pero solo acumula los nombres de cabecera.
pub fn collect_fields(config: &ReportConfig, source: &dyn HeaderSource) -> (FieldSet, ScanSummary) {
    let paths = directory::resolve_paths(&config.patterns, config.recursive);
    let mut fields = FieldSet::new();

    let summary = scan_files(&paths, source, config.show_progress, |_, _, row| {
        fields.extend(row.field_names());
    });

    (fields, summary)
}

fn scan_files<F>(
    paths: &[PathBuf],
    source: &dyn HeaderSource,
    show_progress: bool,
    mut on_row: F,
) -> ScanSummary
where
    F: FnMut(&Path, &[u8], MetadataRow),
{
    let progress = progress_bar(paths.len(), show_progress);
    let mut summary = ScanSummary::default();

    for path in paths {
        progress.inc(1);

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(error) => {
                progress.suspend(|| {
                    warn!(path = %path.display(), %error, "no se pudo leer el archivo")
                });
                summary.skipped += 1;
                continue;
            }
        };

        match extract_metadata(source, &content) {
            Ok(row) => {
                on_row(path, &content, row);
                summary.processed += 1;
            }
            Err(error) => {
                progress.suspend(|| {
                    warn!(path = %path.display(), %error, "mensaje descartado del reporte")
                });
                summary.skipped += 1;
            }
        }
    }

    progress.finish_and_clear();
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "análisis completado"
    );
    summary
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        progress.set_style(style);
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldSelection;
    use crate::metadata::DigestKind;
    use crate::report::Sink;
    use tempfile::tempdir;

    fn config(patterns: Vec<String>, selection: FieldSelection, digests: Vec<DigestKind>) -> ReportConfig {
        ReportConfig {
            patterns,
            recursive: true,
            selection,
            digests,
            sink: Sink::Console,
            mode: Mode::Report,
            show_progress: false,
        }
    }

    #[test]
    fn directory_with_one_unparsable_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("a.eml"),
            "From: a@example.com\r\nSubject: Uno\r\n\r\nHola\r\n",
        )?;
        fs::write(
            dir.path().join("b.eml"),
            "From: b@example.com\r\nDate: Tue, 6 Oct 2026 09:00:00 +0000\r\n\r\nHola\r\n",
        )?;
        fs::write(
            dir.path().join("broken.eml"),
            "just some text without colon\nsecond line\n",
        )?;

        let config = config(
            vec![dir.path().display().to_string()],
            FieldSelection::All,
            Vec::new(),
        );
        let (report, summary) = build_report(&config, &MailHeaderSource);

        assert_eq!(summary, ScanSummary { processed: 2, skipped: 1 });
        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.spec.columns,
            vec!["date", "filename", "from", "path", "subject"]
        );
        assert_eq!(report.rows[0].get("filename"), Some("a.eml"));
        Ok(())
    }

    #[test]
    fn md5_column_follows_explicit_fields() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("a.eml");
        fs::write(&file, "Subject: Uno\r\n\r\nHola\r\n")?;

        let config = config(
            vec![file.display().to_string()],
            FieldSelection::Explicit(vec!["subject".to_string()]),
            vec![DigestKind::Md5],
        );
        let (report, _) = build_report(&config, &MailHeaderSource);

        assert_eq!(report.spec.columns, vec!["subject", "md5"]);
        let cells: Vec<Vec<&str>> = report.cells().collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0][0], "Uno");
        assert_eq!(cells[0][1].len(), 32);
        assert!(cells[0][1].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        Ok(())
    }

    #[test]
    fn listed_fields_are_the_sorted_header_union() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("a.eml"),
            "Subject: Uno\r\nFrom: a@example.com\r\n\r\n",
        )?;
        fs::write(
            dir.path().join("b.eml"),
            "Subject: Dos\r\nDate: Tue, 6 Oct 2026 09:00:00 +0000\r\n\r\n",
        )?;

        let mut config = config(
            vec![dir.path().display().to_string()],
            FieldSelection::All,
            vec![DigestKind::Sha1],
        );
        config.mode = Mode::ListFields;
        let (fields, summary) = collect_fields(&config, &MailHeaderSource);

        assert_eq!(summary.processed, 2);
        assert_eq!(fields.sorted(), vec!["date", "from", "subject"]);
        Ok(())
    }

    #[test]
    fn no_inputs_no_rows() {
        let config = config(Vec::new(), FieldSelection::All, Vec::new());
        let (report, summary) = build_report(&config, &MailHeaderSource);

        assert_eq!(summary, ScanSummary::default());
        assert!(report.rows.is_empty());
        assert!(report.spec.columns.is_empty());
    }
}
