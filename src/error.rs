//! Error types of the generator core.

use thiserror::Error;

/// Fatal problems found while loading or resolving an api schema.
///
/// Any of these aborts the whole generation run; no output is produced.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or does not match the schema shape.
    #[error("Malformed api document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A reference names a type that no module defines.
    #[error("Unresolved type reference `{name}` in {context}")]
    UnresolvedRef { name: String, context: String },

    /// A bare reference matches same-named types in several modules.
    #[error("Ambiguous type reference `{name}` in {context}: candidates are {}", .candidates.join(", "))]
    AmbiguousRef {
        name: String,
        context: String,
        candidates: Vec<String>,
    },

    /// Two types share one qualified name.
    #[error("Duplicate type definition: {0}")]
    DuplicateType(String),

    /// An `AppObject` operand does not resolve to an enum of types.
    #[error("{role} type of an AppObject must be an enum: {name} (in {context})")]
    AppObjectNotEnum {
        role: &'static str,
        name: String,
        context: String,
    },

    /// A struct mixes an unnamed member with other members.
    #[error("Tuple struct in {context} must have exactly one unnamed field, found {found} fields")]
    TupleArity { context: String, found: usize },

    /// A sentinel generic has the wrong number of arguments.
    #[error("Generic `{name}` in {context} expects {expected} argument(s), found {found}")]
    GenericArity {
        name: String,
        context: String,
        expected: usize,
        found: usize,
    },
}

/// Invalid requests made at the command boundary.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Unsupported backend: {0}. Expected one of: ts, docs")]
    UnknownBackend(String),
}
