//! Option catalog types and parsing

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One selectable value of a single- or multi-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
}

impl Choice {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named group of choices in a hierarchical multi-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Choice>,
}

/// A catalog field, discriminated by its `type` attribute
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OptionField {
    Text {
        #[serde(default)]
        default: String,
    },
    SingleSelect {
        #[serde(default)]
        default: String,
        #[serde(default)]
        values: Vec<Choice>,
    },
    HierarchicalMultiSelect {
        #[serde(default)]
        values: Vec<ChoiceGroup>,
    },
}

/// A catalog entry the generator cannot turn into a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedField {
    pub key: String,
    /// The `type` tag, when the entry carried one
    pub kind: Option<String>,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog is not a JSON object")]
    NotAnObject,

    #[error("catalog defines no supported options")]
    Empty,
}

/// Remote-supplied schema of project options, in service order
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    fields: Vec<(String, OptionField)>,
    unsupported: Vec<UnsupportedField>,
}

impl OptionCatalog {
    /// Parse a catalog document
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Parse an already decoded catalog document
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };
        let catalog = Self::from_map(map);
        if catalog.fields.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut catalog = Self::default();

        for (key, value) in map {
            // HAL metadata such as `_links`
            if key.starts_with('_') {
                continue;
            }

            let kind = value
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_string);

            match serde_json::from_value::<OptionField>(value) {
                Ok(field) => catalog.fields.push((key, field)),
                Err(e) => {
                    let reason = match &kind {
                        Some(_) => e.to_string(),
                        None => "missing `type` attribute".to_string(),
                    };
                    catalog.unsupported.push(UnsupportedField { key, kind, reason });
                }
            }
        }

        catalog
    }

    /// Build a catalog directly from fields (used by custom front ends and tests)
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, OptionField)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, f)| (k.into(), f)).collect(),
            unsupported: Vec::new(),
        }
    }

    /// Supported fields in catalog order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &OptionField)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn get(&self, key: &str) -> Option<&OptionField> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    /// Entries that were left out of the prompt schema
    pub fn unsupported(&self) -> &[UnsupportedField] {
        &self.unsupported
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
