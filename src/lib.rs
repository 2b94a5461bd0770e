//! Motor de emlmr: resuelve rutas de mensajes EML, extrae su metadata de
//! cabecera y genera un reporte en tabla o texto delimitado.

pub mod app;
pub mod config;
pub mod directory;
pub mod error;
pub mod metadata;
pub mod report;
