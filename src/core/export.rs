//! Export writer
//!
//! Flattens resolved catalog data into a fixed-column CSV table:
//!
//! | #  | Column        | Source                              |
//! |----|---------------|-------------------------------------|
//! | 1  | `design_id`   | part descriptor                     |
//! | 2  | `width`       | part descriptor                     |
//! | 3  | `length`      | part descriptor                     |
//! | 4  | `height`      | part descriptor                     |
//! | 5  | `slope_angle` | part descriptor                     |
//! | 6  | `orientation` | part descriptor                     |
//! | 7  | `description` | catalog, distinct values joined     |
//! | 8  | `category`    | catalog, distinct values joined     |
//! | 9  | `element_id`  | catalog, empty for known-missing    |
//! | 10 | `color`       | inventory color                     |
//! | 11 | `print`       | inventory pattern, empty for none   |
//! | 12 | `amount`      | inventory quantity                  |
//!
//! Rows are ordered by design id, then color, then pattern. The header is
//! taken from the first row; every later row must present the same columns
//! in the same order.

use std::io::Write;

use crate::core::error::ReconcileError;
use crate::core::resolver::CatalogResult;
use crate::entities::part::{Orientation, PartDescriptor};

/// Column names in output order
pub const COLUMNS: [&str; 12] = [
    "design_id",
    "width",
    "length",
    "height",
    "slope_angle",
    "orientation",
    "description",
    "category",
    "element_id",
    "color",
    "print",
    "amount",
];

/// One exported line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub design_id: u32,
    pub width: u32,
    pub length: u32,
    pub height: u32,
    pub slope_angle: u32,
    pub orientation: Orientation,
    pub description: String,
    pub category: String,
    pub element_id: String,
    pub color: String,
    pub pattern: String,
    pub amount: u32,
}

impl OutputRow {
    /// (column, value) pairs in output order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("design_id", self.design_id.to_string()),
            ("width", self.width.to_string()),
            ("length", self.length.to_string()),
            ("height", self.height.to_string()),
            ("slope_angle", self.slope_angle.to_string()),
            ("orientation", self.orientation.to_string()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("element_id", self.element_id.clone()),
            ("color", self.color.clone()),
            ("print", self.pattern.clone()),
            ("amount", self.amount.to_string()),
        ]
    }
}

/// Flatten one design's catalog result into rows, color then pattern ascending
pub fn rows_for(part: &PartDescriptor, result: &CatalogResult) -> Vec<OutputRow> {
    result
        .colors
        .values()
        .flat_map(|record| {
            record
                .pattern_counts
                .iter()
                .map(move |(pattern, &amount)| OutputRow {
                    design_id: part.design_id,
                    width: part.width,
                    length: part.length,
                    height: part.height,
                    slope_angle: part.slope_angle,
                    orientation: part.orientation,
                    description: result.description.clone(),
                    category: result.category.clone(),
                    element_id: record.element_id.clone(),
                    color: record.color.clone(),
                    pattern: pattern.clone(),
                    amount,
                })
        })
        .collect()
}

/// CSV writer that pins the column layout to the first row written
pub struct ExportWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Option<Vec<&'static str>>,
    rows_written: usize,
}

impl<W: Write> ExportWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        Self {
            writer,
            columns: None,
            rows_written: 0,
        }
    }

    /// Write one row given as (column, value) pairs
    pub fn write_fields(&mut self, fields: &[(&'static str, String)]) -> Result<(), ReconcileError> {
        let columns: Vec<&'static str> = fields.iter().map(|(name, _)| *name).collect();

        if let Some(expected) = self.columns.as_ref() {
            if *expected != columns {
                return Err(ReconcileError::SchemaMismatch {
                    expected: expected.iter().map(|c| c.to_string()).collect(),
                    found: columns.iter().map(|c| c.to_string()).collect(),
                });
            }
        } else {
            self.writer.write_record(&columns)?;
            self.columns = Some(columns);
        }

        self.writer
            .write_record(fields.iter().map(|(_, value)| value.as_str()))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), ReconcileError> {
        self.write_fields(&row.fields())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W, ReconcileError> {
        self.writer
            .into_inner()
            .map_err(|e| ReconcileError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::PatternCounts;
    use crate::core::resolver::ResolvedColorRecord;
    use std::collections::BTreeMap;

    fn part_3040() -> PartDescriptor {
        PartDescriptor {
            design_id: 3040,
            width: 1,
            length: 2,
            height: 1,
            slope_angle: 45,
            orientation: Orientation::Normal,
        }
    }

    fn record(color: &str, element_id: &str, patterns: &[(&str, u32)]) -> ResolvedColorRecord {
        ResolvedColorRecord {
            color: color.to_string(),
            element_id: element_id.to_string(),
            pattern_counts: patterns
                .iter()
                .map(|(p, q)| (p.to_string(), *q))
                .collect::<PatternCounts>(),
        }
    }

    fn result() -> CatalogResult {
        let mut colors = BTreeMap::new();
        for r in [
            record("white", "304001", &[("logo", 1), ("", 3)]),
            record("tan", "4121921", &[("", 15)]),
        ] {
            colors.insert(r.color.clone(), r);
        }
        CatalogResult {
            design_id: 3040,
            description: "ROOF TILE 1X2/45°".to_string(),
            category: "BRICKS WITH SLOPE".to_string(),
            colors,
        }
    }

    #[test]
    fn test_fields_match_columns() {
        let rows = rows_for(&part_3040(), &result());
        let names: Vec<&str> = rows[0].fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, COLUMNS.to_vec());
    }

    #[test]
    fn test_rows_sorted_by_color_then_pattern() {
        let rows = rows_for(&part_3040(), &result());
        let keys: Vec<(&str, &str, u32)> = rows
            .iter()
            .map(|r| (r.color.as_str(), r.pattern.as_str(), r.amount))
            .collect();

        assert_eq!(
            keys,
            vec![("tan", "", 15), ("white", "", 3), ("white", "logo", 1)]
        );
        assert!(rows.iter().all(|r| r.design_id == 3040 && r.width == 1));
    }

    #[test]
    fn test_writer_emits_header_once() {
        let mut writer = ExportWriter::new(Vec::new());
        for row in rows_for(&part_3040(), &result()) {
            writer.write_row(&row).unwrap();
        }
        assert_eq!(writer.rows_written(), 3);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "3040,1,2,1,45,normal,ROOF TILE 1X2/45°,BRICKS WITH SLOPE,4121921,tan,,15"
        );
        assert!(!out.contains('\r'));
    }

    #[test]
    fn test_writer_quotes_commas() {
        let mut result = result();
        result.description = "ROOF TILE 1X2,ROOF TILE 1X2/45°".to_string();

        let mut writer = ExportWriter::new(Vec::new());
        writer.write_row(&rows_for(&part_3040(), &result)[0]).unwrap();

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(out.contains("\"ROOF TILE 1X2,ROOF TILE 1X2/45°\""));
    }

    #[test]
    fn test_writer_rejects_reordered_columns() {
        let mut writer = ExportWriter::new(Vec::new());
        writer
            .write_fields(&[("design_id", "3040".to_string()), ("color", "tan".to_string())])
            .unwrap();

        let err = writer
            .write_fields(&[("color", "tan".to_string()), ("design_id", "3040".to_string())])
            .unwrap_err();
        assert!(matches!(err, ReconcileError::SchemaMismatch { .. }));
        assert_eq!(writer.rows_written(), 1);
    }
}
