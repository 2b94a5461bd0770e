use std::collections::BTreeSet;

/// Conjunto de nombres de campo vistos durante el análisis.
///
/// Solo crece; `sorted` entrega siempre el mismo orden lexicográfico.
#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    fields: BTreeSet<String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta el nombre si no estaba; devuelve `true` si era nuevo.
    pub fn insert(&mut self, field: &str) -> bool {
        if self.fields.contains(field) {
            return false;
        }
        self.fields.insert(field.to_string())
    }

    pub fn extend<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            self.insert(field);
        }
    }

    pub fn sorted(&self) -> Vec<String> {
        self.fields.iter().cloned().collect()
    }
}
