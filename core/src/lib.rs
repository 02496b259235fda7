#![deny(missing_docs)]

//! # Routegen Core
//!
//! Core library for the routes table generator.
//!
//! Pipeline: method registry -> skeleton table -> merge base specification and
//! extras overlay -> tidy -> render.

/// Shared error types.
pub mod error;

/// Naming helpers (deduplication, PascalCase, `$ref` type names).
pub mod naming;

/// Method registry model and extraction.
pub mod registry;

/// Specification shims (base and extras share the shape).
pub mod spec;

/// Routes table model and builder.
pub mod routes;

/// Recursive removal of empty values.
pub mod tidy;

/// Document loading and rendering.
pub mod document;

pub use document::{
    load_document, load_optional_document, parse_document, render_routes, DocumentFormat,
};
pub use error::{AppError, AppResult};
pub use registry::{Binding, MethodRegistry};
pub use routes::builder::{build_routes, RoutesBuilder};
pub use routes::{ParamSchema, RouteDescriptor, RoutesTable, DEFAULT_PARAM_TYPE};
pub use spec::{Operation, Parameter, PathItem, PathSpec};
pub use tidy::tidy;

/// Builds and renders the routes table in one call.
///
/// Nothing is rendered when the registry fails validation.
pub fn generate_routes(
    registry: &MethodRegistry,
    base: &PathSpec,
    extras: &PathSpec,
) -> AppResult<String> {
    let table = build_routes(registry, base, extras)?;
    tracing::info!(
        namespaces = table.namespaces().count(),
        routes = table.route_count(),
        "Generated routes table"
    );
    render_routes(&table)
}
