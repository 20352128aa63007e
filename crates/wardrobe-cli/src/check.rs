//! Check command - loads and compiles a wardrobe definition.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use wardrobe_engine::Catalog;

use crate::output::Output;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Wardrobe definition (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub wardrobe: PathBuf,

    /// Exit with 1 when the definition produced warnings
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: CheckArgs, output: &Output) -> Result<u8> {
    let catalog = Catalog::load_file(&args.wardrobe)?;

    output.warnings(catalog.warnings());
    for rule in catalog.rules() {
        output.verbose(&rule.to_string());
    }

    let summary = format!(
        "{}: {} garments, {} colors, {} rules, {} warnings",
        args.wardrobe.display(),
        catalog.garments().len(),
        catalog.colors().len(),
        catalog.rules().len(),
        catalog.warnings().len()
    );

    if output.is_quiet() {
        return Ok(if args.strict && !catalog.warnings().is_empty() { 1 } else { 0 });
    }

    output.result(&summary);

    if catalog.warnings().is_empty() {
        output.success("Wardrobe definition is valid");
        Ok(0)
    } else if args.strict {
        output.info("Warnings are treated as errors (--strict)");
        Ok(1)
    } else {
        Ok(0)
    }
}
