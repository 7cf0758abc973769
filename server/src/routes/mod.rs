pub mod auth;
pub mod departments;
pub mod employees;
pub mod sections;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platform_api::{ApiError, ApiResult};
use serde::{Deserialize, Deserializer, Serialize};

/// Presence check for a body field; blank strings count as missing.
fn required(field: &str, value: Option<String>) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(format!("{field} is required"))),
    }
}

/// Lookups that find nothing answer 200 with an empty body.
fn json_or_empty<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn double_option_tells_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"phone": "555"}"#).unwrap();
        assert_eq!(absent.phone, None);
        assert_eq!(null.phone, Some(None));
        assert_eq!(set.phone, Some(Some("555".into())));
    }

    #[test]
    fn blank_values_fail_presence_check() {
        assert!(required("username", None).is_err());
        assert!(required("username", Some("  ".into())).is_err());
        assert_eq!(required("username", Some("ada".into())).unwrap(), "ada");
    }
}
