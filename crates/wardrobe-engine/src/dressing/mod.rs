//! Cloths, dressings, and how candidates are produced and collected.

mod dedup;
mod enumerator;

pub use dedup::finalize;
pub use enumerator::{enumerate, DressingEnumerator};

use std::fmt;

use serde::Serialize;

use crate::catalog::{Catalog, ColorId, Entity, GarmentId};
use crate::rules::{Proposition, Variable};

/// One garment worn in one color.
///
/// Ordering is by garment id, then color id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cloth {
    pub garment: GarmentId,
    pub color: ColorId,
}

impl Cloth {
    pub fn new(garment: GarmentId, color: ColorId) -> Self {
        Self { garment, color }
    }

    pub fn variable(&self) -> Variable {
        Variable::Cloth(self.garment, self.color)
    }

    /// `cloth => garment & color`
    pub fn rule(&self) -> Proposition {
        Proposition::implies(
            Proposition::var(self.variable()),
            Proposition::and(vec![
                Proposition::var(Variable::Garment(self.garment)),
                Proposition::var(Variable::Color(self.color)),
            ]),
        )
    }
}

/// A set of cloths, at most one per garment, kept in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dressing {
    cloths: Vec<Cloth>,
}

impl Dressing {
    /// Build a dressing; cloths are sorted into canonical order.
    pub fn new(mut cloths: Vec<Cloth>) -> Self {
        cloths.sort();
        debug_assert!(
            cloths.windows(2).all(|w| w[0].garment != w[1].garment),
            "a dressing holds at most one cloth per garment"
        );
        Self { cloths }
    }

    pub fn cloths(&self) -> &[Cloth] {
        &self.cloths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cloth> {
        self.cloths.iter()
    }

    pub fn len(&self) -> usize {
        self.cloths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloths.is_empty()
    }

    pub fn wears(&self, garment: GarmentId) -> bool {
        self.cloths.iter().any(|c| c.garment == garment)
    }

    pub fn carries(&self, color: ColorId) -> bool {
        self.cloths.iter().any(|c| c.color == color)
    }

    /// Keep the cloths matching `keep`, in order
    pub fn subset<F>(&self, mut keep: F) -> Dressing
    where
        F: FnMut(&Cloth) -> bool,
    {
        Dressing {
            cloths: self.cloths.iter().copied().filter(|c| keep(c)).collect(),
        }
    }

    /// Names and ids of each cloth, ready for serialization
    pub fn entries(&self, catalog: &Catalog) -> Vec<ClothEntry> {
        self.cloths
            .iter()
            .filter_map(|cloth| {
                let garment = catalog.garment(cloth.garment)?;
                let color = catalog.color(cloth.color)?;
                Some(ClothEntry {
                    garment: EntityEntry {
                        id: garment.raw_id(),
                        name: garment.name().to_string(),
                    },
                    color: EntityEntry {
                        id: color.raw_id(),
                        name: color.name().to_string(),
                    },
                })
            })
            .collect()
    }

    /// Human readable form, e.g. `Shirt (Red), Pants (Blue)`
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> DisplayDressing<'a> {
        DisplayDressing { dressing: self, catalog }
    }
}

impl<'a> IntoIterator for &'a Dressing {
    type Item = &'a Cloth;
    type IntoIter = std::slice::Iter<'a, Cloth>;

    fn into_iter(self) -> Self::IntoIter {
        self.cloths.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothEntry {
    pub garment: EntityEntry,
    pub color: EntityEntry,
}

pub struct DisplayDressing<'a> {
    dressing: &'a Dressing,
    catalog: &'a Catalog,
}

impl fmt::Display for DisplayDressing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cloth) in self.dressing.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let garment = self.catalog.garment(cloth.garment).map_or("?", |g| g.name());
            let color = self.catalog.color(cloth.color).map_or("?", |c| c.name());
            write!(f, "{} ({})", garment, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloth(g: u32, c: u32) -> Cloth {
        Cloth::new(GarmentId(g), ColorId(c))
    }

    #[test]
    fn test_cloth_ordering_is_garment_first() {
        assert!(cloth(0, 5) < cloth(1, 0));
        assert!(cloth(1, 0) < cloth(1, 2));
    }

    #[test]
    fn test_dressing_is_canonical() {
        let a = Dressing::new(vec![cloth(2, 0), cloth(0, 1)]);
        let b = Dressing::new(vec![cloth(0, 1), cloth(2, 0)]);
        assert_eq!(a, b);
        assert_eq!(a.cloths(), &[cloth(0, 1), cloth(2, 0)]);
        assert!(a.wears(GarmentId(2)));
        assert!(!a.wears(GarmentId(1)));
    }

    #[test]
    fn test_cloth_rule() {
        let rule = cloth(1, 2).rule();
        assert_eq!(rule.to_string(), "Implies(cloth_1_2, And(garment_1, color_2))");
    }

    #[test]
    fn test_display_and_entries() {
        let catalog = Catalog::with_entities(&["Shirt", "Pants"], &["Red", "Blue"]);
        let dressing = Dressing::new(vec![cloth(1, 1), cloth(0, 0)]);

        assert_eq!(dressing.display(&catalog).to_string(), "Shirt (Red), Pants (Blue)");

        let entries = dressing.entries(&catalog);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].garment.name, "Pants");
        assert_eq!(entries[1].color.id, 1);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["garment"]["name"], "Shirt");
        assert_eq!(json["color"]["id"], 0);
    }

    #[test]
    fn test_subset_keeps_order() {
        let dressing = Dressing::new(vec![cloth(0, 0), cloth(1, 0), cloth(2, 1)]);
        let subset = dressing.subset(|c| c.garment != GarmentId(1));
        assert_eq!(subset.cloths(), &[cloth(0, 0), cloth(2, 1)]);
    }
}
