//! Shared library for `gymevo`
//! Contains student records, the evolution-history pipeline, report export
//! and the REST client used by the CLI

pub mod core;

pub use crate::core::{api, config, dashboard, evolution, forms, models, report};
