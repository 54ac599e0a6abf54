//! Core module - reconciliation pipeline and its supporting pieces

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod resolver;
pub mod store;

pub use catalog::{BrickRecord, CatalogClient, HttpCatalogClient, LookupResponse};
pub use config::Config;
pub use error::ReconcileError;
pub use export::{ExportWriter, OutputRow, COLUMNS};
pub use normalize::{normalize, ColorPatternCounts};
pub use pipeline::{run_export, ExportSummary, ProgressEvent};
pub use reference::{CheckReport, ReferenceData};
pub use resolver::{CatalogResolver, CatalogResult, ResolvedColorRecord};
