//! `slopes parts` command - list the part catalog

use miette::Result;

use crate::cli::helpers::load_reference;
use crate::cli::table::render;
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::entities::Orientation;

#[derive(clap::Args, Debug)]
pub struct PartsArgs {
    /// Only list parts with this orientation
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Sort by design id instead of label
    #[arg(long)]
    pub by_design: bool,
}

pub fn run(args: PartsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let reference = load_reference(global, &config)?;

    let mut parts: Vec<_> = reference
        .parts
        .iter()
        .filter(|(_, p)| args.orientation.map_or(true, |o| p.orientation == o))
        .collect();
    if args.by_design {
        parts.sort_by_key(|(_, p)| p.design_id);
    }

    let rows: Vec<Vec<String>> = parts
        .into_iter()
        .map(|(label, p)| {
            vec![
                label.to_string(),
                p.design_id.to_string(),
                p.width.to_string(),
                p.length.to_string(),
                p.height.to_string(),
                p.slope_angle.to_string(),
                p.orientation.to_string(),
            ]
        })
        .collect();

    print!(
        "{}",
        render(
            global.format,
            &[
                "part",
                "design_id",
                "width",
                "length",
                "height",
                "slope_angle",
                "orientation"
            ],
            &rows
        )?
    );
    Ok(())
}
