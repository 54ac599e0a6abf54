//! `slopes export` command - run the full reconciliation and write the table

use console::style;
use miette::{IntoDiagnostic, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::cli::helpers::{load_reference, note, success, warn};
use crate::cli::GlobalOpts;
use crate::core::pipeline::{run_export, ProgressEvent};
use crate::core::store;
use crate::core::{Config, HttpCatalogClient};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output CSV file (default: slopes.csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Catalog lookup endpoint
    #[arg(long, env = "SLOPES_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Also mirror the rows into this SQLite database
    #[arg(long)]
    pub sqlite: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let reference = load_reference(global, &config)?;

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.endpoint().to_string());
    let client = HttpCatalogClient::new(&endpoint, config.timeout())?
        .with_region(config.age(), config.country());

    let output = args.output.clone().unwrap_or_else(|| config.output());
    // Write next to the target and rename, so a failed run leaves no partial file
    let staging = staging_path(&output);
    let file = File::create(&staging).into_diagnostic()?;

    let result = run_export(&reference, &client, BufWriter::new(file), |event| {
        report(global, &event)
    });

    let summary = match result {
        Ok((summary, writer)) => {
            writer.into_inner().into_diagnostic()?;
            fs::rename(&staging, &output).into_diagnostic()?;
            summary
        }
        Err(e) => {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
    };

    if let Some(ref db) = args.sqlite {
        let written = store::write_rows(db, &summary.rows)?;
        if global.verbose {
            note(global, &format!("Mirrored {} row(s) into {}", written, db.display()));
        }
    }

    for (design_id, color) in &summary.known_missing {
        warn(
            global,
            &format!(
                "Design {} has no catalog element in {} (known missing)",
                design_id, color
            ),
        );
    }

    let digest = Sha256::digest(fs::read(&output).into_diagnostic()?);
    success(
        global,
        &format!(
            "Exported {} row(s) for {} design id(s) to {}",
            summary.rows.len(),
            summary.designs,
            style(output.display()).cyan()
        ),
    );
    if !global.quiet {
        eprintln!("  Pieces:        {}", summary.total_amount());
        eprintln!("  Known missing: {}", summary.known_missing.len());
        eprintln!("  SHA-256:       {:x}", digest);
    }

    Ok(())
}

fn report(global: &GlobalOpts, event: &ProgressEvent<'_>) {
    match event {
        ProgressEvent::Normalized { designs, rows } => {
            note(
                global,
                &format!("Inventory normalized: {} design id(s), {} row(s)", designs, rows),
            );
        }
        ProgressEvent::Lookup {
            design_id,
            index,
            total,
        } if global.verbose => {
            note(
                global,
                &format!("[{}/{}] Looking up design {}", index + 1, total, design_id),
            );
        }
        ProgressEvent::Resolved {
            design_id,
            description,
            rows,
        } if global.verbose => {
            note(
                global,
                &format!("Design {} ({}): {} row(s)", design_id, description, rows),
            );
        }
        _ => {}
    }
}

/// `<output>.partial`, keeping the full file name
fn staging_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}
