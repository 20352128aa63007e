//! Rule-driven outfit enumeration.
//!
//! A wardrobe definition declares garments, colors and constraints between
//! them. The engine compiles the constraints once, enumerates every candidate
//! dressing an inventory allows and keeps the ones a SAT check accepts.
//!
//! ```
//! use wardrobe_engine::{Catalog, EngineConfig, Wardrobe};
//!
//! let catalog = Catalog::load(
//!     "inline",
//!     r#"{
//!         "garments": ["Shirt", "Pants"],
//!         "colors": ["Red", "Blue"],
//!         "constraints": [
//!             {"type": "implies", "object": "garment", "values": [["Shirt", "Pants"]]}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let wardrobe = Wardrobe::new(catalog, EngineConfig::default());
//! let inventory = wardrobe.inventory("Shirt,Red\nPants,Blue\n");
//! let report = wardrobe.dress(&inventory);
//!
//! let lines: Vec<String> = report
//!     .dressings
//!     .iter()
//!     .map(|d| d.display(wardrobe.catalog()).to_string())
//!     .collect();
//! assert_eq!(lines, vec!["Shirt (Red), Pants (Blue)"]);
//! ```

pub mod catalog;
pub mod config;
pub mod dressing;
pub mod error;
pub mod inventory;
pub mod oracle;
pub mod rules;
pub mod solver;
pub mod wardrobe;

pub use catalog::{Catalog, Color, ColorId, ConstraintSpec, EntityKind, Garment, GarmentId, WardrobeDefinition};
pub use config::{ConfigLoader, EngineConfig};
pub use dressing::{enumerate, finalize, Cloth, ClothEntry, Dressing, DressingEnumerator};
pub use error::{Result, WardrobeError, Warning, WARNING_TARGET};
pub use inventory::Inventory;
pub use oracle::{Rejection, SatBackend, SatOracle, SatisfiabilityOracle, Verdict};
pub use rules::{ConstraintCompiler, ConstraintKind, Proposition, Variable, VariableMap};
pub use wardrobe::{DressReport, Wardrobe};
