//! The wardrobe definition file.
//!
//! ```json
//! {
//!   "garments": ["Shirt", "Pants"],
//!   "colors": ["Red", "Blue"],
//!   "constraints": [
//!     { "type": "implies", "object": "garment", "values": [["Shirt", "Pants"]] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardrobeError};

/// Raw contents of a wardrobe definition. All three fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeDefinition {
    pub garments: Vec<String>,
    pub colors: Vec<String>,
    pub constraints: Vec<ConstraintSpec>,
}

/// A constraint as declared. `type` and `object` stay free-form strings here;
/// the constraint compiler decides whether they mean anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub object: String,
    pub values: Vec<Vec<String>>,
}

impl ConstraintSpec {
    pub fn new(kind: impl Into<String>, object: impl Into<String>, values: Vec<Vec<&str>>) -> Self {
        Self {
            kind: kind.into(),
            object: object.into(),
            values: values
                .into_iter()
                .map(|group| group.into_iter().map(String::from).collect())
                .collect(),
        }
    }
}

impl WardrobeDefinition {
    /// Parse a definition from JSON. `source_name` only shows up in errors.
    pub fn from_json(source_name: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WardrobeError::missing_definition(source_name, e))
    }

    /// Read and parse a definition file
    pub fn from_path(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        if !path.is_file() {
            return Err(WardrobeError::missing_definition(source_name, "file does not exist"));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| WardrobeError::missing_definition(&source_name, e))?;
        Self::from_json(&source_name, &content)
    }
}
