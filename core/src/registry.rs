#![deny(missing_docs)]

//! # Method Registry
//!
//! The hand-authored list of API methods: URL template -> HTTP method ->
//! namespace -> method name. An empty (or `null`) method name means the
//! namespace has no binding for that URL/verb combination.

use crate::naming::unique;
use indexmap::IndexMap;
use serde::Deserialize;

/// Namespace -> method name bindings for one URL/verb pair.
pub type Bindings = IndexMap<String, Option<String>>;

/// The method registry, in document order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MethodRegistry(IndexMap<String, IndexMap<String, Bindings>>);

/// A single non-empty binding from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    /// URL template, e.g. `/users/{id}`.
    pub url: &'a str,
    /// HTTP method as written in the registry (lowercase by convention).
    pub http_method: &'a str,
    /// Namespace the method belongs to.
    pub namespace: &'a str,
    /// Method name exposed by the namespace.
    pub method_name: &'a str,
}

impl MethodRegistry {
    /// Iterates URL -> (HTTP method -> bindings) entries.
    pub fn urls(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Bindings>)> {
        self.0.iter().map(|(url, methods)| (url.as_str(), methods))
    }

    /// Every non-empty binding, walking URLs, then HTTP methods, then namespaces.
    pub fn bindings(&self) -> impl Iterator<Item = Binding<'_>> {
        self.urls().flat_map(|(url, methods)| {
            methods.iter().flat_map(move |(http_method, namespaces)| {
                namespaces.iter().filter_map(move |(namespace, name)| {
                    name.as_deref()
                        .filter(|name| !name.is_empty())
                        .map(|method_name| Binding {
                            url,
                            http_method,
                            namespace,
                            method_name,
                        })
                })
            })
        })
    }

    /// Every namespace declared anywhere in the registry, deduplicated, in encounter order.
    ///
    /// Namespaces whose bindings are all empty are still reported.
    pub fn namespaces(&self) -> Vec<&str> {
        unique(
            self.0
                .values()
                .flat_map(|methods| methods.values())
                .flat_map(|namespaces| namespaces.keys())
                .map(String::as_str),
        )
    }

    /// Every method name bound to `namespace`, in encounter order.
    ///
    /// Duplicates are kept: they are how the route initializer detects
    /// authoring errors.
    pub fn method_names(&self, namespace: &str) -> Vec<&str> {
        self.bindings()
            .filter(|binding| binding.namespace == namespace)
            .map(|binding| binding.method_name)
            .collect()
    }
}
