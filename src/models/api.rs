use serde::{Deserialize, Serialize};

use super::{ApiType, Field};

/// Root of an api.json document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    /// Version of the described library
    pub version: String,
    /// Modules in declaration order
    pub modules: Vec<Module>,
}

/// A named group of types and functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Module level type definitions
    #[serde(default)]
    pub types: Vec<Field>,
    #[serde(default)]
    pub functions: Vec<Function>,
}

/// A function exposed by a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<Field>,
    pub result: ApiType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiError>>,
    /// Set on synthesized app object functions that never answer the caller
    #[serde(skip)]
    pub is_notification: bool,
}

/// An error a function is documented to return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Module {
    /// Find a function by name
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find a module level type by name
    pub fn type_def(&self, name: &str) -> Option<&Field> {
        self.types.iter().find(|t| t.name == name)
    }
}
