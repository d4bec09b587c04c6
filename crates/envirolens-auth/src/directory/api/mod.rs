mod field_value;
mod run_query;
mod user_fields_api_model;

pub(crate) use field_value::FieldValue;
pub(crate) use run_query::{RunQueryApiRequest, RunQueryApiResponse};
pub(crate) use user_fields_api_model::{UserDocumentApiModel, UserFieldsApiModel};
