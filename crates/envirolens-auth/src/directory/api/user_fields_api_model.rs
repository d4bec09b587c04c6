use serde::{Deserialize, Serialize};

use super::FieldValue;
use crate::directory::{UserProfile, UserRecord};

/// Fields of a document in the `users` collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserFieldsApiModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<FieldValue>,
}

impl From<&UserProfile> for UserFieldsApiModel {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: Some(FieldValue::string(&profile.name)),
            username: Some(FieldValue::string(&profile.username)),
            email: Some(FieldValue::string(&profile.email)),
            area: Some(FieldValue::string(profile.area.as_str())),
            created_at: Some(FieldValue::timestamp(profile.created_at)),
        }
    }
}

/// A document as returned by the store. `name` is the full resource path.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UserDocumentApiModel {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: UserFieldsApiModel,
}

impl UserDocumentApiModel {
    /// Last segment of the resource path.
    pub(crate) fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

impl From<UserDocumentApiModel> for UserRecord {
    fn from(document: UserDocumentApiModel) -> Self {
        let id = document.id().to_string();
        let string_field =
            |field: Option<FieldValue>| field.and_then(|value| value.string_value);

        UserRecord {
            id,
            username: string_field(document.fields.username).unwrap_or_default(),
            email: string_field(document.fields.email).filter(|email| !email.is_empty()),
        }
    }
}
