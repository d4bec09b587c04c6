use serde::{Deserialize, Serialize};

use super::{FieldValue, UserDocumentApiModel};

/// Body of a `documents:runQuery` request selecting documents of one collection by equality on a
/// single field.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunQueryApiRequest {
    structured_query: StructuredQuery,
}

#[derive(Serialize, Debug)]
struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where")]
    filter: Filter,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Filter {
    field_filter: FieldFilter,
}

#[derive(Serialize, Debug)]
struct FieldFilter {
    field: FieldReference,
    op: &'static str,
    value: FieldValue,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

impl RunQueryApiRequest {
    pub(crate) fn field_equals(collection: &str, field: &str, value: &str) -> Self {
        Self {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: collection.to_string(),
                }],
                filter: Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: field.to_string(),
                        },
                        op: "EQUAL",
                        value: FieldValue::string(value),
                    },
                },
            },
        }
    }
}

/// One element of the `documents:runQuery` response stream. Elements without a document only
/// report progress.
#[derive(Deserialize, Debug)]
pub(crate) struct RunQueryApiResponse {
    #[serde(default)]
    pub document: Option<UserDocumentApiModel>,
}
