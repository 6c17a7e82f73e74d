use serde::{Deserialize, Serialize};

use super::ApiType;

/// A named occurrence of a type: struct member, enum variant,
/// function parameter or module level type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Empty for the single member of a tuple-like struct
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub ty: ApiType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Synthesized during resolution (hoisted enum variant payloads)
    #[serde(default, rename = "isInternal", skip_serializing_if = "std::ops::Not::not")]
    pub is_internal: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: ApiType) -> Self {
        Field {
            name: name.into(),
            ty,
            summary: None,
            description: None,
            is_internal: false,
        }
    }
}

/// Literal value of an enum-of-consts member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstValue {
    None,
    Bool { value: String },
    String { value: String },
    Number { value: String },
}

/// A member of an enum of consts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,
    #[serde(flatten)]
    pub value: ConstValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
