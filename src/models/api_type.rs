use serde::{Deserialize, Serialize};

use super::{Const, Field};

/// Stable position of a module level type: `modules[module].types[index]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId {
    pub module: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberType {
    #[default]
    UInt,
    Int,
    Float,
}

/// A type expression of the api schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ApiType {
    None,
    Any,
    Boolean,
    String,
    Number {
        #[serde(default)]
        number_type: NumberType,
        #[serde(default)]
        number_size: u32,
    },
    BigInt {
        #[serde(default)]
        number_type: NumberType,
        #[serde(default)]
        number_size: u32,
    },
    /// Reference to a module level type. After resolution `ref_name` is
    /// always `module.name` and `target` points at the referenced field.
    Ref {
        ref_name: String,
        #[serde(skip)]
        target: Option<TypeId>,
    },
    Optional {
        optional_inner: Box<ApiType>,
    },
    Array {
        array_item: Box<ApiType>,
    },
    Struct {
        struct_fields: Vec<Field>,
    },
    EnumOfConsts {
        enum_consts: Vec<Const>,
    },
    EnumOfTypes {
        enum_types: Vec<Field>,
    },
    Generic {
        generic_name: String,
        #[serde(default)]
        generic_args: Vec<ApiType>,
    },
}

impl ApiType {
    /// Unresolved reference by name
    pub fn reference(name: impl Into<String>) -> Self {
        ApiType::Ref {
            ref_name: name.into(),
            target: None,
        }
    }

    pub fn ref_name(&self) -> Option<&str> {
        match self {
            ApiType::Ref { ref_name, .. } => Some(ref_name),
            _ => None,
        }
    }

    /// Check for a generic application of the given name
    pub fn is_generic(&self, name: &str) -> bool {
        matches!(self, ApiType::Generic { generic_name, .. } if generic_name == name)
    }

    /// The single unnamed field of a tuple-like struct
    pub fn tuple_inner(&self) -> Option<&Field> {
        match self {
            ApiType::Struct { struct_fields } if struct_fields.len() == 1 => {
                struct_fields.first().filter(|f| f.name.is_empty())
            }
            _ => None,
        }
    }

    /// Tag name as it appears in api.json
    pub fn kind(&self) -> &'static str {
        match self {
            ApiType::None => "None",
            ApiType::Any => "Any",
            ApiType::Boolean => "Boolean",
            ApiType::String => "String",
            ApiType::Number { .. } => "Number",
            ApiType::BigInt { .. } => "BigInt",
            ApiType::Ref { .. } => "Ref",
            ApiType::Optional { .. } => "Optional",
            ApiType::Array { .. } => "Array",
            ApiType::Struct { .. } => "Struct",
            ApiType::EnumOfConsts { .. } => "EnumOfConsts",
            ApiType::EnumOfTypes { .. } => "EnumOfTypes",
            ApiType::Generic { .. } => "Generic",
        }
    }
}

/// Last segment of a possibly qualified type name
pub fn bare_name(ref_name: &str) -> &str {
    ref_name.rsplit('.').next().unwrap_or(ref_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ApiType {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse(r#"{"type":"None"}"#), ApiType::None);
        assert_eq!(parse(r#"{"type":"Any"}"#), ApiType::Any);
        assert_eq!(parse(r#"{"type":"Boolean"}"#), ApiType::Boolean);
        assert_eq!(parse(r#"{"type":"String","summary":"ignored"}"#), ApiType::String);
    }

    #[test]
    fn test_parse_number() {
        let ty = parse(r#"{"type":"Number","number_type":"Int","number_size":32}"#);
        assert_eq!(
            ty,
            ApiType::Number {
                number_type: NumberType::Int,
                number_size: 32
            }
        );

        let big = parse(r#"{"type":"BigInt"}"#);
        assert_eq!(
            big,
            ApiType::BigInt {
                number_type: NumberType::UInt,
                number_size: 0
            }
        );
    }

    #[test]
    fn test_parse_ref_is_unresolved() {
        let ty = parse(r#"{"type":"Ref","ref_name":"abi.Abi"}"#);
        assert_eq!(ty, ApiType::reference("abi.Abi"));
        assert_eq!(ty.ref_name(), Some("abi.Abi"));
    }

    #[test]
    fn test_parse_nested() {
        let ty = parse(
            r#"{
                "type": "Optional",
                "optional_inner": {
                    "type": "Array",
                    "array_item": { "type": "Ref", "ref_name": "Value" }
                }
            }"#,
        );
        match ty {
            ApiType::Optional { optional_inner } => match *optional_inner {
                ApiType::Array { array_item } => {
                    assert_eq!(array_item.ref_name(), Some("Value"));
                }
                other => panic!("Expected Array, got {:?}", other),
            },
            other => panic!("Expected Optional, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generic() {
        let ty = parse(
            r#"{"type":"Generic","generic_name":"ClientResult","generic_args":[{"type":"String"}]}"#,
        );
        assert!(ty.is_generic("ClientResult"));
        assert!(!ty.is_generic("Arc"));
    }

    #[test]
    fn test_unknown_tag_is_error() {
        let result: Result<ApiType, _> = serde_json::from_str(r#"{"type":"Tuple"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tuple_inner() {
        let ty = parse(
            r#"{"type":"Struct","struct_fields":[{"name":"","type":"String"}]}"#,
        );
        assert_eq!(ty.tuple_inner().map(|f| &f.ty), Some(&ApiType::String));

        let named = parse(
            r#"{"type":"Struct","struct_fields":[{"name":"value","type":"String"}]}"#,
        );
        assert!(named.tuple_inner().is_none());
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("abi.Abi"), "Abi");
        assert_eq!(bare_name("Abi"), "Abi");
    }
}
