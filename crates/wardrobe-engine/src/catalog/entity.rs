use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::Variable;

lazy_static! {
    /// Everything that is not a letter or digit, underscores included
    static ref SEARCH_PATTERN: Regex = Regex::new(r"[\W_]+").unwrap();
}

/// Build the lookup key for a name: punctuation and whitespace stripped, case folded.
pub fn normalize_key(name: &str) -> String {
    SEARCH_PATTERN.replace_all(name, "").to_lowercase()
}

/// The two kinds of catalog entries. Also the scope of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Garment,
    Color,
}

impl EntityKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "garment" => Some(EntityKind::Garment),
            "color" => Some(EntityKind::Color),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Garment => "garment",
            EntityKind::Color => "color",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a garment in its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentId(pub u32);

/// Index of a color in its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u32);

impl GarmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ColorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Behaviour shared by garments and colors.
pub trait Entity {
    const KIND: EntityKind;

    fn raw_id(&self) -> u32;
    fn name(&self) -> &str;
    fn key(&self) -> &str;
    /// The boolean variable owned by this entity
    fn variable(&self) -> Variable;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garment {
    id: GarmentId,
    name: String,
    key: String,
    z_index: i32,
}

impl Garment {
    pub fn new(id: GarmentId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: normalize_key(&name),
            z_index: id.0 as i32,
            id,
            name,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn id(&self) -> GarmentId {
        self.id
    }

    /// Stacking order for renderers. Not used during validation.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }
}

impl Entity for Garment {
    const KIND: EntityKind = EntityKind::Garment;

    fn raw_id(&self) -> u32 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn variable(&self) -> Variable {
        Variable::Garment(self.id)
    }
}

impl fmt::Display for Garment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Garment(\"{}\")", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    id: ColorId,
    name: String,
    key: String,
}

impl Color {
    pub fn new(id: ColorId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: normalize_key(&name),
            id,
            name,
        }
    }

    pub fn id(&self) -> ColorId {
        self.id
    }
}

impl Entity for Color {
    const KIND: EntityKind = EntityKind::Color;

    fn raw_id(&self) -> u32 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn variable(&self) -> Variable {
        Variable::Color(self.id)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(\"{}\")", self.name)
    }
}

/// A resolved catalog entry of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    Garment(&'a Garment),
    Color(&'a Color),
}

impl<'a> EntityRef<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Garment(_) => EntityKind::Garment,
            EntityRef::Color(_) => EntityKind::Color,
        }
    }

    pub fn raw_id(&self) -> u32 {
        match self {
            EntityRef::Garment(g) => g.raw_id(),
            EntityRef::Color(c) => c.raw_id(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Garment(g) => &g.name,
            EntityRef::Color(c) => &c.name,
        }
    }

    pub fn variable(&self) -> Variable {
        match self {
            EntityRef::Garment(g) => g.variable(),
            EntityRef::Color(c) => c.variable(),
        }
    }
}
