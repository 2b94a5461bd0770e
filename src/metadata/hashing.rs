//! Cálculo de digests sobre el contenido completo de cada mensaje.

use clap::ValueEnum;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Digests disponibles; el nombre en minúsculas es también el de la columna.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum DigestKind {
    Md5,
    Sha1,
    Sha256,
}

impl DigestKind {
    pub fn field_name(self) -> &'static str {
        match self {
            DigestKind::Md5 => "md5",
            DigestKind::Sha1 => "sha1",
            DigestKind::Sha256 => "sha256",
        }
    }

    /// Devuelve el digest en hexadecimal en minúsculas.
    pub fn compute(self, content: &[u8]) -> String {
        match self {
            DigestKind::Md5 => format!("{:x}", Md5::digest(content)),
            DigestKind::Sha1 => format!("{:x}", Sha1::digest(content)),
            DigestKind::Sha256 => format!("{:x}", Sha256::digest(content)),
        }
    }
}

/// Calcula cada digest pedido sobre el mismo búfer en memoria.
pub fn compute_digests(content: &[u8], kinds: &[DigestKind]) -> Vec<(&'static str, String)> {
    kinds
        .iter()
        .map(|kind| (kind.field_name(), kind.compute(content)))
        .collect()
}
