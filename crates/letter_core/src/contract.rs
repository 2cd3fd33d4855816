use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage_keys::{letter_object_key, FragmentKey};

pub const PATH_PARAMETERS_FIELD: &str = "pathParameters";
pub const DOC_TYPE_PARAMETER: &str = "docType";
pub const CUSTOMER_ID_PARAMETER: &str = "customerId";

/// Validated input of one composition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterRequest {
    pub doc_type: String,
    pub customer_id: String,
}

impl LetterRequest {
    pub fn new(doc_type: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            customer_id: customer_id.into(),
        }
    }

    pub fn customer_key(&self) -> FragmentKey {
        FragmentKey::customer(self.customer_id.clone())
    }

    pub fn document_key(&self) -> FragmentKey {
        FragmentKey::document(self.doc_type.clone())
    }

    pub fn object_key(&self) -> String {
        letter_object_key(&self.customer_id, &self.doc_type)
    }
}

/// Response handed back to the front door.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl LetterResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Inbound gate: extracts `pathParameters.docType` and
/// `pathParameters.customerId` from an API Gateway proxy event.
///
/// Identifiers are not trimmed or otherwise normalized. A `/` is rejected
/// because it would let two different pairs map to the same object key.
pub fn letter_request_from_event(event: &Value) -> Result<LetterRequest, ValidationError> {
    let Some(object) = event.as_object() else {
        return Err(ValidationError::new("Request payload must be a JSON object"));
    };

    let parameters = match object.get(PATH_PARAMETERS_FIELD) {
        Some(Value::Object(parameters)) => parameters,
        Some(_) => {
            return Err(ValidationError::new(
                "pathParameters must be a JSON object",
            ))
        }
        None => return Err(ValidationError::new("pathParameters is required")),
    };

    let doc_type = required_identifier(parameters.get(DOC_TYPE_PARAMETER), DOC_TYPE_PARAMETER)?;
    let customer_id = required_identifier(
        parameters.get(CUSTOMER_ID_PARAMETER),
        CUSTOMER_ID_PARAMETER,
    )?;

    Ok(LetterRequest {
        doc_type,
        customer_id,
    })
}

fn required_identifier(value: Option<&Value>, name: &str) -> Result<String, ValidationError> {
    let text = match value {
        Some(Value::String(text)) => text,
        Some(_) => return Err(ValidationError::new(format!("{name} must be a string"))),
        None => return Err(ValidationError::new(format!("{name} is required"))),
    };

    if text.is_empty() {
        return Err(ValidationError::new(format!("{name} cannot be empty")));
    }

    if text.contains('/') {
        return Err(ValidationError::new(format!("{name} cannot contain '/'")));
    }

    Ok(text.clone())
}

/// Outbound gate: the response must carry an HTTP status and a non-empty body.
pub fn validate_response(response: &LetterResponse) -> Result<(), ValidationError> {
    if !(100..=599).contains(&response.status_code) {
        return Err(ValidationError::new(format!(
            "statusCode {} is outside the HTTP status range",
            response.status_code
        )));
    }

    if response.body.is_empty() {
        return Err(ValidationError::new("body cannot be empty"));
    }

    Ok(())
}
