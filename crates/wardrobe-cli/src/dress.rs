//! Dress command - prints every valid dressing for an inventory.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use wardrobe_engine::catalog::Entity;
use wardrobe_engine::dressing::EntityEntry;
use wardrobe_engine::{Catalog, ConfigLoader, Dressing, Wardrobe};

use crate::config::{resolve_engine_config, OutputFormat, WardrobeToml};
use crate::output::Output;

#[derive(Args, Debug)]
pub struct DressArgs {
    /// Wardrobe definition (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub wardrobe: PathBuf,

    /// Inventory file, one `garment,color` pair per line
    #[arg(value_name = "INVENTORY")]
    pub inventory: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Per-candidate solver timeout in milliseconds (0 disables it)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Check candidates one after another
    #[arg(long)]
    pub sequential: bool,
}

/// A cloth as rendered by front ends
#[derive(Debug, Serialize)]
pub struct ClothView {
    pub garment: EntityEntry,
    pub color: EntityEntry,
    pub image: String,
    pub z_index: i32,
}

/// Render a dressing with image paths and stacking order
pub fn view(catalog: &Catalog, dressing: &Dressing) -> Vec<ClothView> {
    dressing
        .iter()
        .filter_map(|cloth| {
            let garment = catalog.garment(cloth.garment)?;
            let color = catalog.color(cloth.color)?;
            Some(ClothView {
                garment: EntityEntry {
                    id: garment.raw_id(),
                    name: garment.name().to_string(),
                },
                color: EntityEntry {
                    id: color.raw_id(),
                    name: color.name().to_string(),
                },
                image: format!("{}/{}.png", garment.key(), color.key()),
                z_index: garment.z_index(),
            })
        })
        .collect()
}

pub fn execute(args: DressArgs, output: &mut Output, config: Option<&WardrobeToml>) -> Result<u8> {
    let format = args
        .format
        .or_else(|| config.map(|c| c.output.format))
        .unwrap_or_default();
    output.set_json_mode(format == OutputFormat::Json);
    let progress = config.map_or(true, |c| c.output.progress);

    let engine_config = resolve_engine_config(
        config,
        &ConfigLoader::new(true),
        args.timeout_ms,
        args.sequential,
    )?;

    let catalog = Catalog::load_file(&args.wardrobe)?;
    output.warnings(catalog.warnings());

    let text = std::fs::read_to_string(&args.inventory)
        .with_context(|| format!("Failed to read inventory {}", args.inventory.display()))?;

    let wardrobe = Wardrobe::new(catalog, engine_config);
    let inventory = wardrobe.inventory(&text);
    output.warnings(inventory.warnings());
    output.verbose(&format!(
        "{} owned pairs, {} rules",
        inventory.len(),
        wardrobe.catalog().rules().len()
    ));

    let spinner = output.spinner("Checking candidate dressings...", progress);
    let report = wardrobe.dress(&inventory);
    spinner.finish_and_clear();

    output.warnings(&report.warnings);

    if output.is_json() {
        let dressings: Vec<Vec<ClothView>> = report
            .dressings
            .iter()
            .map(|d| view(wardrobe.catalog(), d))
            .collect();
        output.json(&dressings)?;
    } else {
        for dressing in &report.dressings {
            output.result(&dressing.display(wardrobe.catalog()).to_string());
        }
        output.success(&format!(
            "{} dressings from {} candidates",
            report.dressings.len(),
            report.candidates
        ));
    }

    Ok(0)
}
