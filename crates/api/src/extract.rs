//! Request body extractor that deserializes and validates in one step.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use transfer_core::error::CoreError;
use validator::Validate;

use crate::error::AppError;

/// JSON body that passed its `validator` rules.
///
/// Malformed JSON becomes a 400 `BAD_REQUEST`. Well-formed JSON with a value
/// of the wrong shape (`"rating": "five"`, a missing required field) and
/// rule violations both become a 400 `VALIDATION_ERROR` with a per-field
/// `details` map.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Err(AppError::BadRequest(
                "Expected request with `Content-Type: application/json`".into(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let value = parse_body::<T>(&bytes)?;
        value.validate().map_err(CoreError::from)?;
        Ok(ValidatedJson(value))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Deserialize `bytes`, attributing type errors to the field they occurred in.
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        if inner.classify() != Category::Data {
            return AppError::BadRequest(format!("Failed to parse the request body as JSON: {inner}"));
        }

        let message = without_location(&inner);
        match field_of(&path, &message) {
            Some(field) => AppError::Core(CoreError::field(&field, describe(&message))),
            None => AppError::BadRequest(format!("Invalid request body: {message}")),
        }
    })?;
    de.end()
        .map_err(|e| AppError::BadRequest(format!("Failed to parse the request body as JSON: {e}")))?;
    Ok(value)
}

/// serde_json appends " at line L column C" to every message.
fn without_location(err: &serde_json::Error) -> String {
    let text = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    text.strip_suffix(&suffix).map(str::to_string).unwrap_or(text)
}

/// Field an error belongs to: the failing path, or for a missing field at
/// the top level, the field serde names in its message.
fn field_of(path: &str, message: &str) -> Option<String> {
    if !path.is_empty() && path != "." {
        return Some(path.to_string());
    }
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
        .map(str::to_string)
}

fn describe(message: &str) -> String {
    if message.starts_with("missing field `") {
        "is required".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Booking {
        customer_name: String,
        #[validate(range(min = 1, max = 8))]
        passengers: i32,
    }

    fn field_details(err: AppError) -> (String, String) {
        match err {
            AppError::Core(CoreError::InvalidFields(fields)) => {
                let json = serde_json::to_value(&fields).unwrap();
                let (field, messages) = json.as_object().unwrap().iter().next().unwrap();
                (field.clone(), messages[0].as_str().unwrap().to_string())
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_reported_on_its_field() {
        let err = parse_body::<Booking>(br#"{"customerName":"Ivan","passengers":"three"}"#)
            .unwrap_err();
        let (field, message) = field_details(err);
        assert_eq!(field, "passengers");
        assert!(message.starts_with("invalid type"), "{message}");
        assert!(!message.contains("at line"), "{message}");
    }

    #[test]
    fn missing_field_is_required() {
        let err = parse_body::<Booking>(br#"{"passengers":2}"#).unwrap_err();
        assert_eq!(
            field_details(err),
            ("customerName".to_string(), "is required".to_string())
        );
    }

    #[test]
    fn syntax_errors_stay_bad_requests() {
        assert!(matches!(
            parse_body::<Booking>(b"{not json"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_body::<Booking>(br#"{"customerName":"Ivan","passengers":2} trailing"#),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn non_object_body_is_a_bad_request() {
        assert!(matches!(
            parse_body::<Booking>(br#""just a string""#),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn json_content_types() {
        let with = |value: &'static str| {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, value.parse().unwrap());
            headers
        };
        assert!(is_json_content_type(&with("application/json")));
        assert!(is_json_content_type(&with("application/json; charset=utf-8")));
        assert!(is_json_content_type(&with("application/merge-patch+json")));
        assert!(!is_json_content_type(&with("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }
}
