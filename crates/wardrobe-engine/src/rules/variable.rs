use std::fmt;

use crate::catalog::{ColorId, GarmentId};
use crate::solver::Literal;

/// Identity of a boolean variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// The garment is worn
    Garment(GarmentId),
    /// The color is worn
    Color(ColorId),
    /// This garment is worn in this color
    Cloth(GarmentId, ColorId),
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Garment(g) => write!(f, "garment_{}", g.0),
            Variable::Color(c) => write!(f, "color_{}", c.0),
            Variable::Cloth(g, c) => write!(f, "cloth_{}_{}", g.0, c.0),
        }
    }
}

/// Bijection between [`Variable`]s of one catalog and solver literals.
///
/// Garments take `1..=G`, colors `G+1..=G+C` and cloths the remaining
/// `G*C` slots in garment-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableMap {
    garments: u32,
    colors: u32,
}

impl VariableMap {
    pub fn new(garments: u32, colors: u32) -> Self {
        Self { garments, colors }
    }

    /// Number of variables in the mapping
    pub fn len(&self) -> u32 {
        self.garments + self.colors + self.garments * self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positive literal for a variable
    pub fn literal(&self, variable: Variable) -> Literal {
        let index = match variable {
            Variable::Garment(g) => {
                debug_assert!(g.0 < self.garments);
                g.0 + 1
            }
            Variable::Color(c) => {
                debug_assert!(c.0 < self.colors);
                self.garments + c.0 + 1
            }
            Variable::Cloth(g, c) => {
                debug_assert!(g.0 < self.garments && c.0 < self.colors);
                self.garments + self.colors + g.0 * self.colors + c.0 + 1
            }
        };
        index as Literal
    }

    /// Variable behind a literal, sign ignored
    pub fn variable(&self, literal: Literal) -> Option<Variable> {
        let index = literal.unsigned_abs();
        if index == 0 || index > self.len() {
            return None;
        }

        let offset = index - 1;
        if offset < self.garments {
            return Some(Variable::Garment(GarmentId(offset)));
        }

        let offset = offset - self.garments;
        if offset < self.colors {
            return Some(Variable::Color(ColorId(offset)));
        }

        let offset = offset - self.colors;
        Some(Variable::Cloth(
            GarmentId(offset / self.colors),
            ColorId(offset % self.colors),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_layout() {
        let map = VariableMap::new(2, 3);
        assert_eq!(map.literal(Variable::Garment(GarmentId(0))), 1);
        assert_eq!(map.literal(Variable::Garment(GarmentId(1))), 2);
        assert_eq!(map.literal(Variable::Color(ColorId(0))), 3);
        assert_eq!(map.literal(Variable::Color(ColorId(2))), 5);
        assert_eq!(map.literal(Variable::Cloth(GarmentId(0), ColorId(0))), 6);
        assert_eq!(map.literal(Variable::Cloth(GarmentId(1), ColorId(2))), 11);
        assert_eq!(map.len(), 11);
    }

    #[test]
    fn test_mapping_is_invertible() {
        let map = VariableMap::new(3, 4);
        for literal in 1..=map.len() as Literal {
            let variable = map.variable(literal).unwrap();
            assert_eq!(map.literal(variable), literal);
            assert_eq!(map.variable(-literal), Some(variable));
        }
        assert_eq!(map.variable(0), None);
        assert_eq!(map.variable(map.len() as Literal + 1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::Cloth(GarmentId(2), ColorId(5)).to_string(), "cloth_2_5");
        assert_eq!(Variable::Color(ColorId(1)).to_string(), "color_1");
    }
}
