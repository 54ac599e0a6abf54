//! SQLite mirror of the export table
//!
//! Every run drops and recreates the table; nothing is kept between runs.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::core::error::ReconcileError;
use crate::core::export::OutputRow;

/// Bumped whenever the table layout changes
const SCHEMA_VERSION: i32 = 1;

/// Replace the `slopes` table in the database at `path` with `rows`
pub fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<usize, ReconcileError> {
    let mut conn = Connection::open(path)?;
    write_rows_to(&mut conn, rows)
}

pub(crate) fn write_rows_to(conn: &mut Connection, rows: &[OutputRow]) -> Result<usize, ReconcileError> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        r#"
        DROP TABLE IF EXISTS slopes;
        CREATE TABLE slopes (
            design_id INTEGER NOT NULL,
            width INTEGER NOT NULL,
            length INTEGER NOT NULL,
            height INTEGER NOT NULL,
            slope_angle INTEGER NOT NULL,
            orientation TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            element_id TEXT NOT NULL,
            color TEXT NOT NULL,
            print TEXT NOT NULL,
            amount INTEGER NOT NULL,
            PRIMARY KEY (design_id, color, print)
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        DELETE FROM schema_version;
        "#,
    )?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        params![SCHEMA_VERSION],
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO slopes (design_id, width, length, height, slope_angle, orientation,
                                 description, category, element_id, color, print, amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )?;
        for row in rows {
            stmt.execute(params![
                row.design_id,
                row.width,
                row.length,
                row.height,
                row.slope_angle,
                row.orientation.to_string(),
                row.description,
                row.category,
                row.element_id,
                row.color,
                row.pattern,
                row.amount,
            ])?;
        }
    }

    tx.commit()?;
    Ok(rows.len())
}
