#![deny(missing_docs)]

//! # Routes Builder
//!
//! Assembles the routes table in two passes:
//!
//! 1. **Initialize**: one empty descriptor per declared (namespace, method name),
//!    rejecting namespaces that declare a method name twice.
//! 2. **Merge**: for every registry binding, fill in verb and URL, then fold in
//!    the base specification followed by the extras overlay.

use crate::error::{AppError, AppResult};
use crate::naming::{duplicates, ref_type_name, unique};
use crate::registry::{Binding, MethodRegistry};
use crate::routes::{RouteDescriptor, RoutesTable};
use crate::spec::{Operation, PathSpec};

/// Accumulates a [`RoutesTable`] across the generation passes.
#[derive(Debug, Clone, Default)]
pub struct RoutesBuilder {
    table: RoutesTable,
}

impl RoutesBuilder {
    /// Creates the skeleton table from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateMethodName`] for the first namespace that
    /// binds the same method name more than once.
    pub fn initialize(registry: &MethodRegistry) -> AppResult<Self> {
        let mut table = RoutesTable::default();

        for namespace in registry.namespaces() {
            let method_names = registry.method_names(namespace);

            let repeated = duplicates(&method_names);
            if !repeated.is_empty() {
                return Err(AppError::DuplicateMethodName {
                    namespace: namespace.to_string(),
                    names: repeated.into_iter().map(String::from).collect(),
                });
            }

            let methods = table.insert_namespace(namespace);
            for method_name in unique(method_names) {
                methods.insert(method_name.to_string(), RouteDescriptor::default());
            }
        }

        tracing::debug!(
            namespaces = table.0.len(),
            routes = table.route_count(),
            "Initialized routes table"
        );

        Ok(Self { table })
    }

    /// Merges verb, URL and both specifications into every bound descriptor.
    ///
    /// The base specification is applied before the extras overlay, so extras
    /// win on scalar fields while `accepts` and `params` accumulate.
    pub fn merge(mut self, registry: &MethodRegistry, base: &PathSpec, extras: &PathSpec) -> Self {
        for binding in registry.bindings() {
            let Some(descriptor) = self.table.get_mut(binding.namespace, binding.method_name)
            else {
                tracing::warn!(
                    namespace = binding.namespace,
                    method = binding.method_name,
                    "Binding has no initialized descriptor; skipping"
                );
                continue;
            };
            merge_binding(descriptor, &binding, base, extras);
        }
        self
    }

    /// Returns the accumulated table.
    pub fn build(self) -> RoutesTable {
        self.table
    }
}

/// Runs both passes: initialize then merge.
pub fn build_routes(
    registry: &MethodRegistry,
    base: &PathSpec,
    extras: &PathSpec,
) -> AppResult<RoutesTable> {
    Ok(RoutesBuilder::initialize(registry)?
        .merge(registry, base, extras)
        .build())
}

fn merge_binding(
    descriptor: &mut RouteDescriptor,
    binding: &Binding<'_>,
    base: &PathSpec,
    extras: &PathSpec,
) {
    descriptor.method = binding.http_method.to_uppercase();
    descriptor.url = binding.url.to_string();

    if let Some(item) = base.get(binding.url) {
        for parameter in &item.parameters {
            descriptor.merge_parameter(parameter);
        }
        if let Some(operation) = item.operation(binding.http_method) {
            apply_operation(descriptor, operation);
        }
    }

    if let Some(operation) = extras.operation(binding.url, binding.http_method) {
        if !operation.is_empty() {
            apply_operation(descriptor, operation);
        }
    }

    tracing::debug!(
        namespace = binding.namespace,
        method_name = binding.method_name,
        http_method = %descriptor.method,
        url = %descriptor.url,
        params = descriptor.params.len(),
        "Merged route"
    );
}

fn apply_operation(descriptor: &mut RouteDescriptor, operation: &Operation) {
    descriptor.merge_accepts(operation.media_types());

    for parameter in operation.parameters() {
        descriptor.merge_parameter(parameter);
    }

    for reference in operation.success_refs() {
        if let Some(type_name) = ref_type_name(reference) {
            descriptor.returns = Some(type_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn registry(value: Value) -> MethodRegistry {
        serde_json::from_value(value).unwrap()
    }

    fn spec(value: Value) -> PathSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_initialize_creates_one_descriptor_per_name() {
        let registry = registry(json!({
            "/users": {"get": {"users": "list", "admin": "listUsers"}},
            "/users/{id}": {"get": {"users": "get", "admin": ""}}
        }));
        let table = RoutesBuilder::initialize(&registry).unwrap().build();

        assert_eq!(table.route_count(), 3);
        assert_eq!(table.get("users", "list"), Some(&RouteDescriptor::default()));
        assert!(table.get("users", "get").is_some());
        assert!(table.get("admin", "listUsers").is_some());
    }

    #[test]
    fn test_initialize_rejects_duplicates() {
        let registry = registry(json!({
            "/a": {"get": {"users": "fetch", "admin": "fetch"}},
            "/b": {"get": {"users": "fetch"}}
        }));
        match RoutesBuilder::initialize(&registry).unwrap_err() {
            AppError::DuplicateMethodName { namespace, names } => {
                assert_eq!(namespace, "users");
                assert_eq!(names, vec!["fetch".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_merge_sets_verb_and_url_without_spec() {
        let registry = registry(json!({"/undocumented": {"patch": {"misc": "touch"}}}));
        let table = build_routes(&registry, &PathSpec::default(), &PathSpec::default()).unwrap();

        let descriptor = table.get("misc", "touch").unwrap();
        assert_eq!(descriptor.method, "PATCH");
        assert_eq!(descriptor.url, "/undocumented");
        assert!(descriptor.params.is_empty());
        assert!(descriptor.returns.is_none());
    }

    #[test]
    fn test_merge_applies_url_level_parameters() {
        let registry = registry(json!({"/users/{id}": {"get": {"users": "get"}}}));
        let base = spec(json!({
            "/users/{id}": {
                "parameters": [{"name": "id", "in": "path", "type": "string", "required": true}]
            }
        }));
        let table = build_routes(&registry, &base, &PathSpec::default()).unwrap();

        let id = &table.get("users", "get").unwrap().params["id"];
        assert_eq!(id.type_name(), "string");
        assert_eq!(id.location.as_deref(), Some("path"));
        assert_eq!(id.required, Some(true));
    }

    #[test]
    fn test_merge_extras_after_base() {
        let registry = registry(json!({"/users/{id}": {"get": {"users": "get"}}}));
        let base = spec(json!({
            "/users/{id}": {"get": {
                "consumes": ["application/json"],
                "parameters": [{"name": "id", "type": "string", "required": true}],
                "responses": {"200": {"schema": {"$ref": "#/definitions/user"}}}
            }}
        }));
        let extras = spec(json!({
            "/users/{id}": {"get": {
                "consumes": ["application/json", "text/plain"],
                "parameters": [{"name": "id", "enum": ["a", "b"]}],
                "responses": {"200": {"schema": {"$ref": "#/definitions/user_account"}}}
            }}
        }));
        let table = build_routes(&registry, &base, &extras).unwrap();
        let descriptor = table.get("users", "get").unwrap();

        let accepts: Vec<&str> = descriptor.accepts.iter().map(String::as_str).collect();
        assert_eq!(accepts, vec!["application/json", "text/plain"]);

        let id = &descriptor.params["id"];
        assert_eq!(id.type_name(), "string");
        assert_eq!(id.required, Some(true));
        assert_eq!(id.enum_values, Some(vec![json!("a"), json!("b")]));

        assert_eq!(descriptor.returns.as_deref(), Some("UserAccount"));
    }

    #[test]
    fn test_merge_openapi3_parameter_types() {
        let registry = registry(json!({"/users/{id}": {"get": {"users": "get"}}}));
        let base = spec(json!({
            "openapi": "3.0.3",
            "paths": {"/users/{id}": {"get": {"parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
            ]}}}
        }));
        let table = build_routes(&registry, &base, &PathSpec::default()).unwrap();

        let id = &table.get("users", "get").unwrap().params["id"];
        assert_eq!(id.type_name(), "string");
        assert_eq!(id.location.as_deref(), Some("path"));
        assert_eq!(id.required, Some(true));
    }

    #[test]
    fn test_merge_ignores_error_responses() {
        let registry = registry(json!({"/users": {"post": {"users": "create"}}}));
        let base = spec(json!({
            "/users": {"post": {"responses": {
                "400": {"schema": {"$ref": "#/definitions/error"}},
                "500": {"schema": {"$ref": "#/definitions/error"}}
            }}}
        }));
        let table = build_routes(&registry, &base, &PathSpec::default()).unwrap();
        assert!(table.get("users", "create").unwrap().returns.is_none());
    }

    #[test]
    fn test_merge_keeps_unbound_descriptors_at_defaults() {
        let registry = registry(json!({
            "/a": {"get": {"users": "fetch"}},
            "/b": {"get": {"users": ""}}
        }));
        let table = build_routes(&registry, &PathSpec::default(), &PathSpec::default()).unwrap();
        assert_eq!(table.route_count(), 1);
        assert!(table.namespace("users").is_some());
    }

    #[test]
    fn test_merge_url_level_parameters_come_from_base_only() {
        let registry = registry(json!({"/items": {"get": {"items": "list"}}}));
        let extras = spec(json!({
            "/items": {"parameters": [{"name": "ignored", "type": "string"}]}
        }));
        let table = build_routes(&registry, &PathSpec::default(), &extras).unwrap();
        assert!(table.get("items", "list").unwrap().params.is_empty());
    }
}
