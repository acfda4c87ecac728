//! Request body extraction with API-shaped rejections.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use super::error::{ApiError, ApiErrorResponse, FieldError};

/// JSON request body whose rejections use the [`ApiError`] body.
///
/// A body that parses but does not fit the target type is a 400
/// `VALIDATION_ERROR`; a body that is not JSON at all is a 400
/// `INVALID_JSON`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        match rejection {
            JsonRejection::JsonDataError(error) => Self::validation_error(
                "Validation failed",
                vec![FieldError::new("body", error.body_text())],
            ),
            JsonRejection::BytesRejection(error) => {
                Self::new(error.status(), ApiError::new("INVALID_BODY", error.body_text()))
            }
            other => Self::bad_request("INVALID_JSON", other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TaskRequest;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use rstest::rstest;

    async fn extract(
        content_type: Option<&str>,
        body: &str,
    ) -> Result<TaskRequest, ApiErrorResponse> {
        let mut builder = Request::builder().method("POST").uri("/tasks");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        JsonBody::<TaskRequest>::from_request(request, &())
            .await
            .map(|JsonBody(request)| request)
    }

    #[rstest]
    #[tokio::test]
    async fn test_extracts_valid_body() {
        let request = extract(Some("application/json"), r#"{"title": "Buy milk"}"#)
            .await
            .unwrap();
        assert_eq!(request.title.as_deref(), Some("Buy milk"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_wrong_field_type_is_validation_error() {
        let error = extract(Some("application/json"), r#"{"title": "ok", "description": 5}"#)
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error.code, "VALIDATION_ERROR");
        let details = error.error.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "body");
        assert!(details[0].message.contains("description"));
    }

    #[rstest]
    #[case(Some("application/json"), r#"{"title": "#)]
    #[case(Some("application/json"), "[1, 2")]
    #[case(None, r#"{"title": "ok"}"#)]
    #[case(Some("text/plain"), r#"{"title": "ok"}"#)]
    #[tokio::test]
    async fn test_unreadable_body_is_invalid_json(
        #[case] content_type: Option<&str>,
        #[case] body: &str,
    ) {
        let error = extract(content_type, body).await.unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error.code, "INVALID_JSON");
        assert!(error.error.details.is_none());
    }
}
