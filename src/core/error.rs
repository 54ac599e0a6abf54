//! Reconciliation errors
//!
//! Every failure is fatal for a run. Each variant carries enough context for
//! an operator to fix the reference tables and re-run from scratch.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ReconcileError {
    #[error("Unknown part label '{label}'")]
    #[diagnostic(
        code(slopes::inventory::unknown_part),
        help("add the part to parts.yaml or fix the inventory label")
    )]
    UnknownPart { label: String },

    #[error("Inventory entry '{label}' under color '{color}' has zero quantity")]
    #[diagnostic(code(slopes::inventory::quantity))]
    InvalidQuantity { color: String, label: String },

    #[error("Quantity for design {design_id}, color '{color}', print '{pattern}' overflows")]
    #[diagnostic(code(slopes::inventory::overflow))]
    QuantityOverflow {
        design_id: u32,
        color: String,
        pattern: String,
    },

    #[error("Part label '{label}' has zero in {field}")]
    #[diagnostic(
        code(slopes::parts::dimension),
        help("width, length and height must be positive")
    )]
    InvalidDimension { label: String, field: &'static str },

    #[error("Failed to build HTTP client: {0}")]
    #[diagnostic(code(slopes::catalog::client))]
    HttpClient(#[source] reqwest::Error),

    #[error("Part label '{label}' reuses design id {design_id} with a different descriptor")]
    #[diagnostic(code(slopes::parts::conflict))]
    ConflictingDesignId { design_id: u32, label: String },

    #[error("Color '{color}' has no entry in the color alias table")]
    #[diagnostic(
        code(slopes::colors::unknown),
        help("add '{color}' with its vendor spellings to colors.yaml")
    )]
    UnknownColor { color: String },

    #[error("Lookup for design id {requested} returned records for {found:?}")]
    #[diagnostic(
        code(slopes::catalog::design_id_mismatch),
        help("the catalog response is corrupt or misaligned; it is never retried")
    )]
    DesignIdMismatch { requested: u32, found: Vec<u32> },

    #[error("Element {element_id} of design {design_id} has asset path '{asset}', expected '{expected}'")]
    #[diagnostic(code(slopes::catalog::asset_path_mismatch))]
    AssetPathMismatch {
        design_id: u32,
        element_id: String,
        asset: String,
        expected: String,
    },

    #[error("No vendor color for '{color}' on design {design_id} ({description}); tried {aliases:?}")]
    #[diagnostic(
        code(slopes::catalog::missing_color),
        help("add the vendor spelling to colors.yaml, or whitelist ({design_id}, {color}) in known_missing.yaml")
    )]
    MissingColorMapping {
        design_id: u32,
        description: String,
        color: String,
        aliases: Vec<String>,
    },

    #[error("Row columns {found:?} differ from the header {expected:?}")]
    #[diagnostic(code(slopes::export::schema_mismatch))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Catalog lookup for design id {design_id} failed: {message}")]
    #[diagnostic(code(slopes::catalog::lookup))]
    Lookup { design_id: u32, message: String },

    #[error("Invalid reference data in {file}: {message}")]
    #[diagnostic(code(slopes::reference::parse))]
    ReferenceData { file: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Store(#[from] rusqlite::Error),
}
