//! End-to-end reconciliation run
//!
//! Normalizes the whole inventory first, then walks design ids in ascending
//! order: one lookup, validate, write that design's rows, next. The first
//! failure stops the run before any later design id is looked up.

use std::io::Write;

use crate::core::catalog::CatalogClient;
use crate::core::error::ReconcileError;
use crate::core::export::{rows_for, ExportWriter, OutputRow};
use crate::core::normalize::normalize;
use crate::core::reference::ReferenceData;
use crate::core::resolver::CatalogResolver;

/// Notable steps of a run, for callers that report progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// Inventory normalized into this many design ids
    Normalized { designs: usize, rows: usize },
    /// About to look up a design id
    Lookup { design_id: u32, index: usize, total: usize },
    /// A design id resolved and its rows were written
    Resolved {
        design_id: u32,
        description: &'a str,
        rows: usize,
    },
    /// A required color was absent but whitelisted
    KnownMissing { design_id: u32, color: &'a str },
}

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub designs: usize,
    pub rows: Vec<OutputRow>,
    /// (design id, color) pairs exported with an empty element id
    pub known_missing: Vec<(u32, String)>,
}

impl ExportSummary {
    pub fn total_amount(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.amount)).sum()
    }
}

/// Run the whole pipeline, writing CSV to `out`
pub fn run_export<C, W>(
    reference: &ReferenceData,
    client: C,
    out: W,
    mut on_progress: impl FnMut(ProgressEvent<'_>),
) -> Result<(ExportSummary, W), ReconcileError>
where
    C: CatalogClient,
    W: Write,
{
    let counts = normalize(&reference.inventory, &reference.parts)?;
    on_progress(ProgressEvent::Normalized {
        designs: counts.len(),
        rows: counts.triple_count(),
    });

    let resolver = CatalogResolver::new(client, &reference.colors, &reference.known_missing);
    let mut writer = ExportWriter::new(out);
    let mut summary = ExportSummary {
        designs: counts.len(),
        ..ExportSummary::default()
    };

    let total = counts.len();
    for (index, (design_id, needed)) in counts.iter().enumerate() {
        on_progress(ProgressEvent::Lookup {
            design_id,
            index,
            total,
        });

        let result = resolver.resolve(design_id, needed)?;
        let part = reference
            .parts
            .by_design_id(design_id)
            .ok_or_else(|| ReconcileError::UnknownPart {
                label: design_id.to_string(),
            })?;

        for record in result.colors.values().filter(|r| r.is_known_missing()) {
            on_progress(ProgressEvent::KnownMissing {
                design_id,
                color: &record.color,
            });
            summary.known_missing.push((design_id, record.color.clone()));
        }

        let rows = rows_for(part, &result);
        for row in &rows {
            writer.write_row(row)?;
        }
        on_progress(ProgressEvent::Resolved {
            design_id,
            description: &result.description,
            rows: rows.len(),
        });
        summary.rows.extend(rows);
    }

    let out = writer.finish()?;
    Ok((summary, out))
}
