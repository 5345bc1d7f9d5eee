//! Recognition of GraphQL operations in HTTP requests.
//!
//! Only what routing needs is extracted: the operation type, its name, and
//! the variables. The document itself is not validated or executed.

use crate::matching::headers::media_type;
use crate::matching::query::query_from_url;
use crate::mocks::router::Request;
use crate::types::route::{HttpMethod, OperationType};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##""""[\s\S]*?"""|"(?:[^"\\]|\\.)*"|#[^\n]*|[@$]?[_A-Za-z][_0-9A-Za-z]*|[{}()]"##)
        .expect("valid regex")
});

/// A GraphQL operation carried by a request.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlOperation {
    pub operation_type: OperationType,
    /// `None` for anonymous operations
    pub operation_name: Option<String>,
    pub query: String,
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlBody {
    query: String,
    #[serde(default)]
    operation_name: Option<String>,
    #[serde(default)]
    variables: Option<Map<String, Value>>,
}

/// Operation definition found at the top level of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OperationDefinition {
    operation_type: OperationType,
    name: Option<String>,
}

/// Extract the GraphQL operation of a request, if it carries one.
///
/// POST requests carry `{query, operationName?, variables?}` as JSON; GET
/// requests carry the same fields as query parameters, with `variables`
/// JSON-encoded.
pub fn parse_operation(request: &Request) -> Option<GraphQlOperation> {
    let body = match request.method {
        HttpMethod::Post => body_from_json(request)?,
        HttpMethod::Get => body_from_query(&request.url)?,
        _ => return None,
    };

    let definitions = operation_definitions(&body.query);
    let definition = match &body.operation_name {
        Some(name) => definitions
            .into_iter()
            .find(|d| d.name.as_deref() == Some(name.as_str()))?,
        None => definitions.into_iter().next()?,
    };

    Some(GraphQlOperation {
        operation_type: definition.operation_type,
        operation_name: definition.name,
        query: body.query,
        variables: body.variables.unwrap_or_default(),
    })
}

fn body_from_json(request: &Request) -> Option<GraphQlBody> {
    if let Some(media_type) = media_type(&request.headers) {
        if !media_type.contains("json") {
            return None;
        }
    }
    let bytes = request.body.as_ref()?;
    serde_json::from_slice(bytes).ok()
}

fn body_from_query(url: &str) -> Option<GraphQlBody> {
    let mut params = query_from_url(url);
    let query = params.remove("query")?;
    let variables = match params.remove("variables") {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str::<Option<Map<String, Value>>>(&raw).ok()?
        }
        _ => None,
    };
    Some(GraphQlBody {
        query,
        operation_name: params.remove("operationName").filter(|n| !n.is_empty()),
        variables,
    })
}

/// Top-level operation definitions of a document, in order.
///
/// Fragments are skipped and a bare selection set counts as an anonymous
/// query.
fn operation_definitions(document: &str) -> Vec<OperationDefinition> {
    let mut definitions = Vec::new();
    let mut depth = 0usize;
    let mut pending: Option<OperationDefinition> = None;
    let mut in_fragment = false;
    let mut expect_name = false;

    for token in TOKEN.find_iter(document).map(|m| m.as_str()) {
        if token.starts_with('"') || token.starts_with('#') {
            continue;
        }

        match token {
            "{" => {
                if depth == 0 {
                    match pending.take() {
                        Some(definition) => definitions.push(definition),
                        None if !in_fragment => definitions.push(OperationDefinition {
                            operation_type: OperationType::Query,
                            name: None,
                        }),
                        None => {}
                    }
                    in_fragment = false;
                    expect_name = false;
                }
                depth += 1;
            }
            "}" => depth = depth.saturating_sub(1),
            "(" | ")" => expect_name = false,
            _ if depth > 0 => {}
            word => match word.parse::<OperationType>() {
                Ok(operation_type) if pending.is_none() && !in_fragment => {
                    pending = Some(OperationDefinition {
                        operation_type,
                        name: None,
                    });
                    expect_name = true;
                }
                _ if word == "fragment" && pending.is_none() => in_fragment = true,
                _ => {
                    if expect_name && !word.starts_with(['@', '$']) {
                        if let Some(definition) = pending.as_mut() {
                            definition.name = Some(word.to_string());
                        }
                    }
                    expect_name = false;
                }
            },
        }
    }

    definitions
}
