#![deny(missing_docs)]

//! # Specification Shims
//!
//! Deserialization layer for the base specification and the extras overlay.
//! Both share one shape: URL template -> path item, where a path item holds
//! URL-level `parameters` plus one operation per HTTP method key.
//!
//! Only the fields the merger reads are typed. Everything else is tolerated:
//! unknown operation keys are kept in `extra`, while `x-` keys, `null` path
//! items and non-object values under other keys are skipped.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A specification document: URL template -> path item.
///
/// Accepts either a bare paths map (the `paths.json` layout) or a whole
/// Swagger 2.0 / OpenAPI 3.x document, in which case its `paths` member is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSpec {
    /// Path items keyed by URL template, in document order.
    pub paths: IndexMap<String, PathItem>,
}

impl PathSpec {
    /// Looks up the path item for a URL template.
    pub fn get(&self, url: &str) -> Option<&PathItem> {
        self.paths.get(url)
    }

    /// Looks up the operation declared for `url` and `http_method`.
    pub fn operation(&self, url: &str, http_method: &str) -> Option<&Operation> {
        self.get(url).and_then(|item| item.operation(http_method))
    }

    /// Returns true when no path items are present.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<'de> Deserialize<'de> for PathSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = IndexMap::<String, Value>::deserialize(deserializer)?;

        let is_document = raw.contains_key("swagger") || raw.contains_key("openapi");
        if is_document {
            raw = match raw.swap_remove("paths") {
                Some(Value::Object(paths)) => paths.into_iter().collect(),
                Some(_) => return Err(DeError::custom("'paths' must be an object")),
                None => IndexMap::new(),
            };
        }

        let mut paths = IndexMap::new();
        for (url, value) in raw {
            if url.starts_with("x-") || value.is_null() {
                continue;
            }
            let item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", url, e))
            })?;
            paths.insert(url, item);
        }

        Ok(Self { paths })
    }
}

/// All declarations for one URL template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    /// Parameters shared by every operation on this URL.
    pub parameters: Vec<Parameter>,
    /// Operations keyed by lowercase HTTP method.
    pub operations: IndexMap<String, Operation>,
}

impl PathItem {
    /// Returns the operation for an HTTP method, matching case-insensitively.
    pub fn operation(&self, http_method: &str) -> Option<&Operation> {
        self.operations.get(http_method).or_else(|| {
            self.operations
                .iter()
                .find(|(method, _)| method.eq_ignore_ascii_case(http_method))
                .map(|(_, op)| op)
        })
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse path parameters: {}", e))
                })?;
            } else if !key.starts_with("x-") && value.is_object() {
                let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
                })?;
                item.operations.insert(key.to_lowercase(), operation);
            }
        }

        Ok(item)
    }
}

/// The per-HTTP-method descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    /// Media types the operation accepts (Swagger 2.0).
    #[serde(default)]
    pub consumes: Option<Vec<String>>,
    /// Operation level parameters.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body (OpenAPI 3.x); its content keys are accepted media types.
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code string.
    #[serde(default)]
    pub responses: Option<IndexMap<String, Response>>,
    /// Any other member of the operation object.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Operation {
    /// Returns true when the operation object had no members at all.
    pub fn is_empty(&self) -> bool {
        self.consumes.is_none()
            && self.parameters.is_none()
            && self.request_body.is_none()
            && self.responses.is_none()
            && self.extra.is_empty()
    }

    /// Media types from `consumes` followed by request body content types.
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        let consumes = self.consumes.iter().flatten().map(String::as_str);
        let content = self
            .request_body
            .iter()
            .flat_map(|body| body.content.keys())
            .map(String::as_str);
        consumes.chain(content)
    }

    /// Operation level parameters, empty when none are declared.
    pub fn parameters(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Schema references of success responses (status code below 400), in document order.
    ///
    /// Non-numeric codes such as `default` or `2XX` are skipped.
    pub fn success_refs(&self) -> impl Iterator<Item = &str> {
        self.responses
            .iter()
            .flatten()
            .filter(|(code, _)| is_success_code(code))
            .filter_map(|(_, response)| response.schema_ref())
    }
}

fn is_success_code(code: &str) -> bool {
    code.trim()
        .parse::<f64>()
        .map(|status| status < 400.0)
        .unwrap_or(false)
}

/// A parameter declaration, either URL level or operation level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name; declarations without one are ignored by the merger.
    #[serde(default)]
    pub name: String,
    /// Declared type (`string`, `integer`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Allowed values.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Location (`path`, `query`, `body`, ...).
    #[serde(default, rename = "in")]
    pub location: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: Option<bool>,
    /// OpenAPI 3.x parameter schema.
    #[serde(default)]
    pub schema: Option<ParameterSchema>,
}

impl Parameter {
    /// The declared type, falling back to the OpenAPI 3.x `schema.type`.
    pub fn declared_type(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .or_else(|| self.schema.as_ref().and_then(|s| s.kind.as_ref()?.as_str()))
    }

    /// The allowed values, falling back to the OpenAPI 3.x `schema.enum`.
    pub fn declared_enum(&self) -> Option<&[Value]> {
        self.enum_values
            .as_deref()
            .or_else(|| self.schema.as_ref().and_then(|s| s.enum_values.as_deref()))
    }
}

/// The `type` / `enum` part of an OpenAPI 3.x parameter schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterSchema {
    /// Schema type. OpenAPI 3.1 type arrays are kept but not read as a type name.
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    /// Allowed values.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
}

/// OpenAPI 3.x request body; only the media types are read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, Value>,
}

/// A response declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Swagger 2.0 response schema.
    #[serde(default)]
    pub schema: Option<SchemaRef>,
    /// OpenAPI 3.x response content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// The `$ref` of the response schema, preferring the Swagger 2.0 `schema`
    /// and falling back to the first content entry that carries one.
    pub fn schema_ref(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .and_then(SchemaRef::reference)
            .or_else(|| {
                self.content
                    .values()
                    .find_map(|media| media.schema.as_ref().and_then(SchemaRef::reference))
            })
    }
}

/// OpenAPI 3.x media type object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Schema of the payload.
    #[serde(default)]
    pub schema: Option<SchemaRef>,
}

/// A schema object, reduced to its reference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaRef {
    /// The `$ref` target, if the schema is a reference.
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
}

impl SchemaRef {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
