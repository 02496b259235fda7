#![deny(missing_docs)]

//! # Routes Module
//!
//! Output model of the generator: namespace -> method name -> route descriptor.
//! The table is assembled by [`builder::RoutesBuilder`].

pub mod builder;

use crate::spec::Parameter;
use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Type reported for parameters no source declared a type for.
pub const DEFAULT_PARAM_TYPE: &str = "any";

/// Namespace -> method name -> descriptor.
///
/// Keys are kept sorted so rendering is stable whatever order the registry was authored in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutesTable(BTreeMap<String, BTreeMap<String, RouteDescriptor>>);

impl RoutesTable {
    /// Returns the descriptor for a namespace and method name.
    pub fn get(&self, namespace: &str, method_name: &str) -> Option<&RouteDescriptor> {
        self.0.get(namespace).and_then(|methods| methods.get(method_name))
    }

    /// Returns every method of a namespace.
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, RouteDescriptor>> {
        self.0.get(namespace)
    }

    /// Iterates the namespace names, sorted.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of descriptors across all namespaces.
    pub fn route_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub(crate) fn insert_namespace(
        &mut self,
        namespace: &str,
    ) -> &mut BTreeMap<String, RouteDescriptor> {
        self.0.entry(namespace.to_string()).or_default()
    }

    pub(crate) fn get_mut(
        &mut self,
        namespace: &str,
        method_name: &str,
    ) -> Option<&mut RouteDescriptor> {
        self.0
            .get_mut(namespace)
            .and_then(|methods| methods.get_mut(method_name))
    }
}

/// Everything a client needs to call one method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteDescriptor {
    /// Upper-case HTTP verb.
    pub method: String,
    /// URL template.
    pub url: String,
    /// Parameter schemas keyed by parameter name.
    pub params: BTreeMap<String, ParamSchema>,
    /// Accepted request media types, deduplicated, in first-seen order.
    pub accepts: IndexSet<String>,
    /// Type name of the success response.
    pub returns: Option<String>,
}

impl RouteDescriptor {
    /// Deep-merges a parameter declaration into `params`, keyed by its name.
    ///
    /// Declarations without a name are skipped.
    pub fn merge_parameter(&mut self, parameter: &Parameter) {
        if parameter.name.is_empty() {
            return;
        }
        self.params
            .entry(parameter.name.clone())
            .or_default()
            .merge(parameter);
    }

    /// Adds media types to `accepts`, ignoring those already present.
    pub fn merge_accepts<'a>(&mut self, media_types: impl IntoIterator<Item = &'a str>) {
        self.accepts
            .extend(media_types.into_iter().map(str::to_owned));
    }
}

/// The merged schema of a single parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamSchema {
    /// Declared type; rendered as [`DEFAULT_PARAM_TYPE`] when no source declared one.
    #[serde(rename = "type", serialize_with = "serialize_param_type")]
    pub kind: Option<String>,
    /// Allowed values, deduplicated.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// Whether the parameter is mandatory. `false` is a real value and is kept.
    pub required: Option<bool>,
}

impl ParamSchema {
    /// Merges a later declaration into this schema.
    ///
    /// Defined scalar fields of `parameter` win. `enum` values accumulate and
    /// are deduplicated, keeping first-seen order. OpenAPI 3 declarations carry
    /// `type` and `enum` under `schema`; those are read when the top level has none.
    pub fn merge(&mut self, parameter: &Parameter) {
        if let Some(kind) = parameter.declared_type() {
            self.kind = Some(kind.to_string());
        }
        if let Some(location) = &parameter.location {
            self.location = Some(location.clone());
        }
        if let Some(required) = parameter.required {
            self.required = Some(required);
        }
        if let Some(incoming) = parameter.declared_enum() {
            let values = self.enum_values.get_or_insert_with(Vec::new);
            for value in incoming {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
    }

    /// The effective type name.
    pub fn type_name(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_PARAM_TYPE)
    }
}

fn serialize_param_type<S>(kind: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(kind.as_deref().unwrap_or(DEFAULT_PARAM_TYPE))
}
