//! Known types module - reserved type names recognized by the resolver and the renderers
//!
//! This module provides a single source of truth for sentinel recognition,
//! so the resolver and every renderer agree on what is special.

/// Result wrapper of every client function, unwrapped during resolution
pub const CLIENT_RESULT: &str = "ClientResult";

/// Marker of a bidirectional callback object parameter
pub const APP_OBJECT: &str = "AppObject";

/// Shared pointer wrapper around context and request parameters
pub const ARC: &str = "Arc";

/// Execution context supplied by the transport, never part of a call surface
pub const CLIENT_CONTEXT: &str = "ClientContext";

/// Request-shaped marker of a response handler parameter
pub const REQUEST: &str = "Request";

/// Refs that stand for arbitrary JSON
pub const DYNAMIC_REFS: &[&str] = &["Value", "API"];

/// Generic names never rendered as parametric applications
pub const DYNAMIC_GENERICS: &[&str] = &[ARC, APP_OBJECT];

/// Name prefix of app object params enums
pub const PARAMS_OF_PREFIX: &str = "ParamsOf";

/// Name of the positional params argument
pub const PARAMS_ARG: &str = "params";

/// Check if a ref name denotes arbitrary JSON
pub fn is_dynamic_ref(name: &str) -> bool {
    DYNAMIC_REFS.contains(&name)
}

/// Check if a generic name renders as the dynamic marker
pub fn is_dynamic_generic(name: &str) -> bool {
    DYNAMIC_GENERICS.contains(&name)
}

/// Check if a ref name is a sentinel the resolver must leave untouched
pub fn is_sentinel_ref(name: &str) -> bool {
    is_dynamic_ref(name) || name == CLIENT_CONTEXT || name == REQUEST
}
