//! Catalog command - lists the garments and colors of a wardrobe.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use wardrobe_engine::catalog::Entity;
use wardrobe_engine::Catalog;

use crate::output::Output;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Wardrobe definition (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub wardrobe: PathBuf,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    garments: Vec<Item<'a>>,
    colors: Vec<Item<'a>>,
}

#[derive(Debug, Serialize)]
struct Item<'a> {
    id: u32,
    name: &'a str,
    key: &'a str,
}

impl<'a> Item<'a> {
    fn of(entity: &'a impl Entity) -> Self {
        Self {
            id: entity.raw_id(),
            name: entity.name(),
            key: entity.key(),
        }
    }
}

fn listing(catalog: &Catalog) -> Listing<'_> {
    Listing {
        garments: catalog.garments().iter().map(Item::of).collect(),
        colors: catalog.colors().iter().map(Item::of).collect(),
    }
}

pub fn execute(args: CatalogArgs, output: &mut Output) -> Result<u8> {
    output.set_json_mode(args.json);

    let catalog = Catalog::load_file(&args.wardrobe)?;
    output.warnings(catalog.warnings());

    let listing = listing(&catalog);
    if output.is_json() {
        output.json(&listing)?;
        return Ok(0);
    }

    let widths = [6, 24];
    for (title, items) in [("Garments", &listing.garments), ("Colors", &listing.colors)] {
        output.section(title);
        for item in items {
            let id = item.id.to_string();
            output.table_row(&[id.as_str(), item.name, item.key], &widths);
        }
    }

    Ok(0)
}
