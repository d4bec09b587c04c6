use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Typed value of a document field. Only the value types used by the `users` collection are
/// modelled, other types are ignored when reading.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
}

impl FieldValue {
    pub(crate) fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub(crate) fn timestamp(value: DateTime<Utc>) -> Self {
        Self {
            timestamp_value: Some(value.to_rfc3339_opts(SecondsFormat::Micros, true)),
            ..Default::default()
        }
    }
}
