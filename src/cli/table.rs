//! Table formatting for CLI list commands
//!
//! Every list command hands over a header and string rows; the selected
//! output format decides how they are rendered.

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

/// Render rows in the requested format
pub fn render(format: OutputFormat, headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let out = match format {
        OutputFormat::Auto | OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for row in rows {
                builder.push_record(row.iter().map(String::as_str));
            }
            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::sharp());
            }
            format!("{}\n", table)
        }
        OutputFormat::Tsv => delimited(headers, rows, "\t", |s| s.replace('\t', " ")),
        OutputFormat::Csv => delimited(headers, rows, ",", escape_csv),
        OutputFormat::Json => {
            let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .zip(row)
                        .map(|(h, v)| (h.to_string(), serde_json::Value::String(v.clone())))
                        .collect()
                })
                .collect();
            format!("{}\n", serde_json::to_string_pretty(&objects).into_diagnostic()?)
        }
    };
    Ok(out)
}

fn delimited(
    headers: &[&str],
    rows: &[Vec<String>],
    sep: &str,
    escape: impl Fn(&str) -> String,
) -> String {
    let mut out = String::new();
    out.push_str(&headers.iter().map(|h| escape(*h)).collect::<Vec<_>>().join(sep));
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().map(|v| escape(v.as_str())).collect::<Vec<_>>().join(sep));
        out.push('\n');
    }
    out
}
