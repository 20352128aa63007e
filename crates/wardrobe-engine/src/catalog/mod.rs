//! Registry of the garments and colors known to a wardrobe.
//!
//! A [`Catalog`] is built once from a [`WardrobeDefinition`]: garments and
//! colors receive dense ids in declaration order, starting at 0, and the
//! declared constraints are compiled into the rule-set every candidate is
//! validated against. Nothing in a catalog changes after construction.

mod definition;
mod entity;

pub use definition::{ConstraintSpec, WardrobeDefinition};
pub use entity::{normalize_key, Color, ColorId, Entity, EntityKind, EntityRef, Garment, GarmentId};

use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, Warning};
use crate::rules::{ConstraintCompiler, Proposition, VariableMap};

#[derive(Debug, Clone)]
pub struct Catalog {
    garments: Vec<Garment>,
    colors: Vec<Color>,
    /// normalized key -> garment, first declaration wins
    garment_keys: IndexMap<String, GarmentId>,
    /// normalized key -> color, first declaration wins
    color_keys: IndexMap<String, ColorId>,
    /// Compiled rule-set
    rules: Vec<Proposition>,
    warnings: Vec<Warning>,
}

impl Catalog {
    /// Load a catalog from a JSON definition.
    pub fn load(source_name: &str, json: &str) -> Result<Self> {
        let definition = WardrobeDefinition::from_json(source_name, json)?;
        Ok(Self::from_definition(&definition))
    }

    /// Load a catalog from a definition file on disk.
    pub fn load_file(path: &Path) -> Result<Self> {
        let definition = WardrobeDefinition::from_path(path)?;
        Ok(Self::from_definition(&definition))
    }

    /// Build the catalog and compile its constraints.
    pub fn from_definition(definition: &WardrobeDefinition) -> Self {
        let mut catalog = Self::with_entities(&definition.garments, &definition.colors);

        let mut compiler = ConstraintCompiler::new(&catalog);
        let rules = compiler.compile(&definition.constraints);
        let warnings = compiler.into_warnings();

        log::debug!(
            "Catalog loaded: {} garments, {} colors, {} rules from {} constraints",
            catalog.garments.len(),
            catalog.colors.len(),
            rules.len(),
            definition.constraints.len()
        );

        catalog.rules = rules;
        catalog.warnings.extend(warnings);
        catalog
    }

    /// Build a catalog with entities only and an empty rule-set.
    pub fn with_entities<G, C>(garments: &[G], colors: &[C]) -> Self
    where
        G: AsRef<str>,
        C: AsRef<str>,
    {
        let mut catalog = Self {
            garments: Vec::with_capacity(garments.len()),
            colors: Vec::with_capacity(colors.len()),
            garment_keys: IndexMap::new(),
            color_keys: IndexMap::new(),
            rules: Vec::new(),
            warnings: Vec::new(),
        };

        for (i, name) in garments.iter().enumerate() {
            let garment = Garment::new(GarmentId(i as u32), name.as_ref());
            match catalog.garment_keys.get(garment.key()) {
                Some(&kept) => {
                    let warning = Warning::AmbiguousName {
                        kind: EntityKind::Garment,
                        kept: catalog.garments[kept.index()].name().to_string(),
                        dropped: garment.name().to_string(),
                    };
                    catalog.warnings.push(warning.emit());
                }
                None => {
                    catalog.garment_keys.insert(garment.key().to_string(), garment.id());
                }
            }
            catalog.garments.push(garment);
        }

        for (i, name) in colors.iter().enumerate() {
            let color = Color::new(ColorId(i as u32), name.as_ref());
            match catalog.color_keys.get(color.key()) {
                Some(&kept) => {
                    let warning = Warning::AmbiguousName {
                        kind: EntityKind::Color,
                        kept: catalog.colors[kept.index()].name().to_string(),
                        dropped: color.name().to_string(),
                    };
                    catalog.warnings.push(warning.emit());
                }
                None => {
                    catalog.color_keys.insert(color.key().to_string(), color.id());
                }
            }
            catalog.colors.push(color);
        }

        catalog
    }

    /// Resolve a free-text name against entities of the given kind.
    pub fn resolve(&self, kind: EntityKind, raw_name: &str) -> Option<EntityRef<'_>> {
        match kind {
            EntityKind::Garment => self.resolve_garment(raw_name).map(EntityRef::Garment),
            EntityKind::Color => self.resolve_color(raw_name).map(EntityRef::Color),
        }
    }

    pub fn resolve_garment(&self, raw_name: &str) -> Option<&Garment> {
        self.garment_keys
            .get(&normalize_key(raw_name))
            .and_then(|id| self.garment(*id))
    }

    pub fn resolve_color(&self, raw_name: &str) -> Option<&Color> {
        self.color_keys
            .get(&normalize_key(raw_name))
            .and_then(|id| self.color(*id))
    }

    pub fn garment(&self, id: GarmentId) -> Option<&Garment> {
        self.garments.get(id.index())
    }

    pub fn color(&self, id: ColorId) -> Option<&Color> {
        self.colors.get(id.index())
    }

    pub fn garments(&self) -> &[Garment] {
        &self.garments
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The compiled rule-set shared by every candidate.
    pub fn rules(&self) -> &[Proposition] {
        &self.rules
    }

    /// Literal numbering for this catalog's variables
    pub fn variables(&self) -> VariableMap {
        VariableMap::new(self.garments.len() as u32, self.colors.len() as u32)
    }

    /// Warnings raised while loading the catalog and compiling its constraints
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
