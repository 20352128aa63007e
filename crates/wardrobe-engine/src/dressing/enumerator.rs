use super::{Cloth, Dressing};
use crate::catalog::{ColorId, GarmentId};
use crate::inventory::Inventory;

/// Every candidate dressing of an inventory.
pub fn enumerate(inventory: &Inventory) -> DressingEnumerator {
    DressingEnumerator::new(inventory)
}

/// Lazy Cartesian product over the owned colors of each garment.
///
/// Garments come in ascending id order and the last garment varies fastest,
/// so candidates appear in lexicographic order. An inventory without
/// garments yields nothing at all.
#[derive(Debug, Clone)]
pub struct DressingEnumerator {
    slots: Vec<(GarmentId, Vec<ColorId>)>,
    cursor: Vec<usize>,
    done: bool,
}

impl DressingEnumerator {
    pub fn new(inventory: &Inventory) -> Self {
        let slots: Vec<_> = inventory
            .garments()
            .filter_map(|garment| {
                let colors: Vec<_> = inventory.colors_of(garment)?.iter().copied().collect();
                Some((garment, colors))
            })
            .collect();

        Self {
            cursor: vec![0; slots.len()],
            done: slots.is_empty(),
            slots,
        }
    }

    /// Total number of candidates, saturating on overflow
    pub fn candidate_count(&self) -> usize {
        if self.slots.is_empty() {
            return 0;
        }
        self.slots
            .iter()
            .fold(1usize, |acc, (_, colors)| acc.saturating_mul(colors.len()))
    }

    fn current(&self) -> Dressing {
        let cloths = self
            .slots
            .iter()
            .zip(&self.cursor)
            .map(|((garment, colors), &i)| Cloth::new(*garment, colors[i]))
            .collect();
        Dressing::new(cloths)
    }

    /// Move the cursor like an odometer. Returns false once it wraps around.
    fn advance(&mut self) -> bool {
        for slot in (0..self.slots.len()).rev() {
            self.cursor[slot] += 1;
            if self.cursor[slot] < self.slots[slot].1.len() {
                return true;
            }
            self.cursor[slot] = 0;
        }
        false
    }
}

impl Iterator for DressingEnumerator {
    type Item = Dressing;

    fn next(&mut self) -> Option<Dressing> {
        if self.done {
            return None;
        }
        let dressing = self.current();
        self.done = !self.advance();
        Some(dressing)
    }
}
