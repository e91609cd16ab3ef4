//! Calendar data endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{error::AppResult, services::calendar::CalendarEvent};

use super::AuthenticatedUser;

/// All plans as calendar events.
///
/// Failures are reported as `{"error": "..."}` with status 500.
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEvent>),
        (status = 500, description = "Error object")
    )
)]
pub async fn calendar_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Response {
    calendar_response(state.services.calendar.events().await)
}

fn calendar_response(result: AppResult<Vec<CalendarEvent>>) -> Response {
    match result {
        Ok(events) => {
            tracing::debug!("Returning {} calendar events", events.len());
            Json(events).into_response()
        }
        Err(e) => {
            tracing::error!("Calendar data failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_failure_is_error_object() {
        let response = calendar_response(Err(AppError::Internal("connection reset".to_string())));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("connection reset"));
        assert!(body.get("code").is_none());
    }

    #[tokio::test]
    async fn test_events_are_bare_array() {
        let response = calendar_response(Ok(Vec::new()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Array(Vec::new()));
    }
}
