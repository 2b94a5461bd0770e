//! Extracción de la metadata de cabecera de un mensaje.
//!
//! El análisis MIME se delega a un [`HeaderSource`]; aquí solo se normalizan
//! los nombres y se arma la fila del reporte.

mod fields;
mod hashing;

pub use fields::FieldSet;
pub use hashing::{DigestKind, compute_digests};

use crate::error::ExtractError;
use std::collections::BTreeMap;

/// Un campo de cabecera con su valor ya decodificado.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

/// Fuente externa capaz de leer las cabeceras de un mensaje.
///
/// Debe devolver los campos en el orden del mensaje, con los valores
/// decodificados (encoded words incluidos).
pub trait HeaderSource {
    fn headers(&self, raw: &[u8]) -> Result<Vec<HeaderField>, ExtractError>;
}

/// Implementación basada en `mailparse`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MailHeaderSource;

impl HeaderSource for MailHeaderSource {
    fn headers(&self, raw: &[u8]) -> Result<Vec<HeaderField>, ExtractError> {
        let (headers, body_offset) =
            mailparse::parse_headers(raw).map_err(|err| ExtractError::Parse(err.to_string()))?;
        check_header_block(&raw[..body_offset])?;

        Ok(headers
            .iter()
            .map(|header| HeaderField {
                name: header.get_key(),
                value: header.get_value(),
            })
            .collect())
    }
}

/// Rechaza bloques con líneas que no son `nombre: valor` ni continuaciones.
///
/// `mailparse` acepta una línea sin `:` como cabecera con valor vacío, lo que
/// convierte cualquier texto o binario en un mensaje.
fn check_header_block(block: &[u8]) -> Result<(), ExtractError> {
    for line in block.split(|byte| *byte == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() || line[0] == b' ' || line[0] == b'\t' {
            continue;
        }

        let valid = match line.iter().position(|byte| *byte == b':') {
            Some(colon) => {
                let name = line[..colon].trim_ascii_end();
                !name.is_empty() && name.iter().all(|byte| (33..=126).contains(byte))
            }
            None => false,
        };
        if !valid {
            return Err(ExtractError::Parse(format!(
                "línea de cabecera mal formada: `{}`",
                String::from_utf8_lossy(line)
            )));
        }
    }
    Ok(())
}

/// Campos de un mensaje: nombre en minúsculas → valor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataRow {
    fields: BTreeMap<String, String>,
}

impl MetadataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Valor del campo o cadena vacía si el mensaje no lo tiene.
    pub fn value_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Agrega o reemplaza un campo sintético (`filename`, `path`, digests).
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = MetadataRow::new();
        for (field, value) in iter {
            row.insert(field, value);
        }
        row
    }
}

/// Convierte las cabeceras del mensaje en una fila del reporte.
///
/// Si una cabecera se repite, se conserva la primera aparición.
pub fn extract_metadata(source: &dyn HeaderSource, raw: &[u8]) -> Result<MetadataRow, ExtractError> {
    let headers = source.headers(raw)?;
    if headers.is_empty() {
        return Err(ExtractError::NoHeaders);
    }

    let mut row = MetadataRow::new();
    for header in headers {
        let name = header.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        row.fields.entry(name).or_insert(header.value);
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<(&'static str, &'static str)>);

    impl HeaderSource for FixedSource {
        fn headers(&self, _raw: &[u8]) -> Result<Vec<HeaderField>, ExtractError> {
            Ok(self
                .0
                .iter()
                .map(|(name, value)| HeaderField {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect())
        }
    }

    struct FailingSource;

    impl HeaderSource for FailingSource {
        fn headers(&self, _raw: &[u8]) -> Result<Vec<HeaderField>, ExtractError> {
            Err(ExtractError::Parse("contenido ilegible".to_string()))
        }
    }

    #[test]
    fn names_are_lowercased_and_first_value_wins() -> Result<(), Box<dyn std::error::Error>> {
        let source = FixedSource(vec![
            ("Subject", "Hola"),
            ("Received", "primero"),
            ("RECEIVED", "segundo"),
        ]);

        let row = extract_metadata(&source, b"")?;

        assert_eq!(row.get("subject"), Some("Hola"));
        assert_eq!(row.get("received"), Some("primero"));
        assert_eq!(row.field_names().count(), 2);
        Ok(())
    }

    #[test]
    fn source_errors_propagate() {
        let result = extract_metadata(&FailingSource, b"From: x");
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[test]
    fn empty_header_block_is_rejected() {
        let result = extract_metadata(&MailHeaderSource, b"");
        assert!(matches!(result, Err(ExtractError::NoHeaders)));

        let result = extract_metadata(&MailHeaderSource, b"\r\nsolo cuerpo");
        assert!(matches!(result, Err(ExtractError::NoHeaders)));
    }

    #[test]
    fn lines_without_colon_are_not_headers() {
        let result = extract_metadata(&MailHeaderSource, b"just some text without colon\n");
        assert!(matches!(result, Err(ExtractError::Parse(_))));

        let result = extract_metadata(
            &MailHeaderSource,
            b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<< /Type /Catalog >>\n",
        );
        assert!(matches!(result, Err(ExtractError::Parse(_))));

        let result = extract_metadata(&MailHeaderSource, b"Subject: Hola\r\nsin dos puntos\r\n\r\n");
        assert!(matches!(result, Err(ExtractError::Parse(message)) if message.contains("sin dos puntos")));
    }

    #[test]
    fn folded_values_and_space_before_colon_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let raw = b"Subject: Reporte\r\n  mensual\r\nX-Tag : uno\r\n\r\ncuerpo sin: formato\r\n";

        let row = extract_metadata(&MailHeaderSource, raw)?;

        assert!(row.get("subject").is_some_and(|value| value.contains("mensual")));
        assert_eq!(row.get("x-tag"), Some("uno"));
        Ok(())
    }

    #[test]
    fn parses_real_headers() -> Result<(), Box<dyn std::error::Error>> {
        let raw = b"From: Alice <alice@example.com>\r\n\
                    To: bob@example.com\r\n\
                    Subject: Reporte mensual\r\n\
                    Date: Mon, 5 Oct 2026 10:00:00 +0000\r\n\
                    \r\n\
                    Cuerpo del mensaje\r\n";

        let row = extract_metadata(&MailHeaderSource, raw)?;

        assert_eq!(row.get("from"), Some("Alice <alice@example.com>"));
        assert_eq!(row.get("to"), Some("bob@example.com"));
        assert_eq!(row.get("subject"), Some("Reporte mensual"));
        assert_eq!(row.get("date"), Some("Mon, 5 Oct 2026 10:00:00 +0000"));
        assert_eq!(
            row.field_names().collect::<Vec<_>>(),
            vec!["date", "from", "subject", "to"]
        );
        Ok(())
    }

    #[test]
    fn decodes_encoded_words() -> Result<(), Box<dyn std::error::Error>> {
        let raw = b"Subject: =?UTF-8?B?T2xhIG11bmRv?=\r\n\r\n";

        let row = extract_metadata(&MailHeaderSource, raw)?;

        assert_eq!(row.get("subject"), Some("Ola mundo"));
        Ok(())
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let row: MetadataRow = [("subject", "Hola")].into_iter().collect();
        assert_eq!(row.value_or_empty("from"), "");
        assert_eq!(row.value_or_empty("subject"), "Hola");
    }
}
