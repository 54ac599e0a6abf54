//! `slopes inventory` command - show normalized counts without any lookups

use miette::Result;

use crate::cli::helpers::{load_reference, success};
use crate::cli::table::render;
use crate::cli::GlobalOpts;
use crate::core::{normalize, Config};

#[derive(clap::Args, Debug)]
pub struct InventoryArgs {
    /// Only show this design id
    #[arg(long)]
    pub design: Option<u32>,

    /// Only show this color
    #[arg(long)]
    pub color: Option<String>,

    /// Show only the row count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: InventoryArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let reference = load_reference(global, &config)?;
    let counts = normalize(&reference.inventory, &reference.parts)?;

    let mut rows = Vec::new();
    for (design_id, colors) in counts.iter() {
        if args.design.is_some_and(|d| d != design_id) {
            continue;
        }
        let part_key = reference
            .parts
            .iter()
            .find(|(_, p)| p.design_id == design_id)
            .map(|(k, _)| k.to_string())
            .unwrap_or_default();

        for (color, patterns) in colors {
            if args.color.as_ref().is_some_and(|c| c != color) {
                continue;
            }
            for (pattern, amount) in patterns {
                rows.push(vec![
                    design_id.to_string(),
                    part_key.clone(),
                    color.clone(),
                    pattern.clone(),
                    amount.to_string(),
                ]);
            }
        }
    }

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    print!(
        "{}",
        render(
            global.format,
            &["design_id", "part", "color", "print", "amount"],
            &rows
        )?
    );

    success(
        global,
        &format!("{} row(s) across {} design id(s)", rows.len(), counts.len()),
    );
    Ok(())
}
