//! The garment/color pairs a user actually owns.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Catalog, Color, ColorId, Entity, Garment, GarmentId};
use crate::error::Warning;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    owned: BTreeMap<GarmentId, BTreeSet<ColorId>>,
    warnings: Vec<Warning>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline separated `garment,color` lines.
    pub fn build(catalog: &Catalog, text: &str) -> Self {
        Self::from_lines(catalog, text.lines())
    }

    /// Resolve `garment,color` pairs against the catalog.
    ///
    /// Lines that do not split into exactly two fields are noise and dropped
    /// without a word. Unknown names and repeated pairs are dropped with a
    /// warning.
    pub fn from_lines<I, S>(catalog: &Catalog, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inventory = Self::new();

        for line in lines {
            let fields: Vec<&str> = line.as_ref().trim().split(',').collect();
            let &[garment_name, color_name] = fields.as_slice() else {
                continue;
            };
            let (garment_name, color_name) = (garment_name.trim(), color_name.trim());

            let Some(garment) = catalog.resolve_garment(garment_name) else {
                inventory.warn(Warning::UnknownGarment(garment_name.to_string()));
                continue;
            };
            let Some(color) = catalog.resolve_color(color_name) else {
                inventory.warn(Warning::UnknownColor(color_name.to_string()));
                continue;
            };

            inventory.insert(garment, color);
        }

        log::debug!(
            "Inventory holds {} pairs over {} garments",
            inventory.len(),
            inventory.owned.len()
        );
        inventory
    }

    /// Record an owned pair. Returns false, with a warning, when it was already there.
    pub fn insert(&mut self, garment: &Garment, color: &Color) -> bool {
        let inserted = self.owned.entry(garment.id()).or_default().insert(color.id());
        if !inserted {
            self.warn(Warning::DuplicatePair {
                garment: garment.name().to_string(),
                color: color.name().to_string(),
            });
        }
        inserted
    }

    pub fn contains(&self, garment: GarmentId, color: ColorId) -> bool {
        self.owned.get(&garment).is_some_and(|colors| colors.contains(&color))
    }

    /// Colors owned for a garment, ascending by id
    pub fn colors_of(&self, garment: GarmentId) -> Option<&BTreeSet<ColorId>> {
        self.owned.get(&garment).filter(|colors| !colors.is_empty())
    }

    /// Garments with at least one owned color, ascending by id
    pub fn garments(&self) -> impl Iterator<Item = GarmentId> + '_ {
        self.owned
            .iter()
            .filter(|(_, colors)| !colors.is_empty())
            .map(|(garment, _)| *garment)
    }

    pub fn has_garment(&self, garment: GarmentId) -> bool {
        self.colors_of(garment).is_some()
    }

    /// Number of owned pairs
    pub fn len(&self) -> usize {
        self.owned.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning.emit());
    }
}
