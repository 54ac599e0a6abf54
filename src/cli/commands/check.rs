//! `slopes check` command - validate reference tables offline
//!
//! Catches the problems that would otherwise only surface halfway through an
//! export: unparseable labels, zero quantities, inventory colors without
//! vendor aliases and whitelist entries for unknown design ids.

use console::style;
use miette::Result;

use crate::cli::helpers::{load_reference, success};
use crate::cli::GlobalOpts;
use crate::core::{normalize, Config};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Treat orphaned whitelist entries as errors too
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    // Labels and quantities are validated while loading
    let reference = load_reference(global, &config)?;
    let counts = normalize(&reference.inventory, &reference.parts)?;
    let report = reference.check();

    for color in &report.colors_without_aliases {
        eprintln!(
            "{} Color '{}' has no vendor aliases in colors.yaml",
            style("✗").red(),
            color
        );
    }
    for (design_id, color) in &report.orphan_known_missing {
        eprintln!(
            "{} Known-missing ({}, {}) does not match any part",
            style("!").yellow(),
            design_id,
            color
        );
    }

    let failed = !report.colors_without_aliases.is_empty()
        || (args.strict && !report.orphan_known_missing.is_empty());
    if failed {
        return Err(miette::miette!("Reference data check failed"));
    }

    success(
        global,
        &format!(
            "{} part(s), {} color(s), {} inventory line(s), {} design id(s) to look up",
            reference.parts.len(),
            reference.colors.len(),
            reference.inventory.len(),
            counts.len()
        ),
    );
    Ok(())
}
