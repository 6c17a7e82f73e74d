use crate::known_types;
use crate::models::{bare_name, ApiType, Const, ConstValue};

/// Convert a leaf api type to its TypeScript keyword
pub fn scalar_to_typescript(ty: &ApiType) -> Option<&'static str> {
    match ty {
        ApiType::None => Some("void"),
        ApiType::Any => Some("any"),
        ApiType::Boolean => Some("boolean"),
        ApiType::String => Some("string"),
        ApiType::Number { .. } => Some("number"),
        ApiType::BigInt { .. } => Some("bigint"),
        ApiType::Ref { .. }
        | ApiType::Optional { .. }
        | ApiType::Array { .. }
        | ApiType::Struct { .. }
        | ApiType::EnumOfConsts { .. }
        | ApiType::EnumOfTypes { .. }
        | ApiType::Generic { .. } => None,
    }
}

/// Identifier used for a reference to a named type
pub fn ref_to_typescript(ref_name: &str) -> String {
    if known_types::is_dynamic_ref(ref_name) {
        "any".to_string()
    } else {
        bare_name(ref_name).to_string()
    }
}

/// Sequence of an already rendered item type
pub fn array_of(item: &str) -> String {
    // Wrap in parentheses if it's a union type (contains |)
    if item.contains('|') {
        format!("({})[]", item)
    } else {
        format!("{}[]", item)
    }
}

/// Literal value of a const member
pub fn const_literal(value: &Const) -> String {
    match &value.value {
        ConstValue::None => format!("'{}'", value.name),
        ConstValue::String { value } => format!("'{}'", value),
        ConstValue::Number { value } | ConstValue::Bool { value } => value.clone(),
    }
}

/// Check if consts can form a TypeScript `enum` (no boolean members)
pub fn is_enumerable(consts: &[Const]) -> bool {
    !consts.is_empty()
        && consts
            .iter()
            .all(|c| !matches!(c.value, ConstValue::Bool { .. }))
}
