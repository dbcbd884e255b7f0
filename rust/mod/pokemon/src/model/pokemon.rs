use serde::{Deserialize, Serialize};

/// Pokemon: one species record in the catalog.
///
/// `code` is the national dex number and travels as `no` on the wire.
/// Both `code` and `name` are unique across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pokemon {
    /// Store-assigned identifier (32 lowercase hex chars). Immutable.
    pub id: String,

    #[serde(rename = "no")]
    pub code: i64,

    /// Lowercase for records written through create/update. Seeded records
    /// keep the listing source's spelling.
    pub name: String,
}

/// Input for creating a single record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePokemon {
    #[serde(rename = "no")]
    pub code: i64,
    pub name: String,
}

impl CreatePokemon {
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self { code, name: name.into() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.code < 1 {
            return Err(format!("no must be a positive integer, got {}", self.code));
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        Ok(())
    }
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePokemon {
    #[serde(rename = "no", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UpdatePokemon {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(code) = self.code {
            if code < 1 {
                return Err(format!("no must be a positive integer, got {}", code));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name must not be empty".into());
            }
        }
        Ok(())
    }
}
