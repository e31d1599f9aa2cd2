//! Squirrel records
//!
//! The stored record and the form it is created/updated from.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SquirrelError};

/// Identifier assigned by the repository (always > 0)
pub type SquirrelId = u64;

/// A stored squirrel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squirrel {
    pub id: SquirrelId,
    pub name: String,
    pub size: String,
}

/// Mutable fields as submitted by a client; either may be missing
///
/// Decoded from `application/x-www-form-urlencoded` bodies. Unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquirrelForm {
    pub name: Option<String>,
    pub size: Option<String>,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSquirrel {
    pub name: String,
    pub size: String,
}

impl SquirrelForm {
    pub fn new(name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            size: Some(size.into()),
        }
    }

    /// Require both fields to be present and non-empty
    pub fn validate(self) -> Result<ValidSquirrel> {
        let name = required("name", self.name)?;
        let size = required("size", self.size)?;
        Ok(ValidSquirrel { name, size })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SquirrelError::Validation(format!(
            "missing required field '{}'",
            field
        ))),
    }
}
