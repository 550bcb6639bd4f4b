//! HTTP handlers for the user directory.

use super::AppState;
use crate::error::{DirectoryError, MSG_INVALID_JSON, MSG_MISSING_BODY};
use crate::user::{User, UserPayload};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

type ApiResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// User routes, relative to the configured prefix
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
}

/// GET / - liveness message
async fn root_handler() -> Json<StatusMessage> {
    debug!("root endpoint hit");
    Json(StatusMessage {
        message: "API is running".to_string(),
    })
}

/// GET /users - all users, or a single one with `?id=N`
async fn list_users_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<axum::response::Response> {
    let Query(pairs) = query.map_err(|e| DirectoryError::Validation(e.body_text()))?;
    // Repeated keys are allowed; the first `id` wins
    let id = pairs
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str());

    match id.filter(|id| !id.is_empty()) {
        Some(raw) => {
            let user = state.directory.get(parse_id(raw)?)?;
            Ok(Json(user).into_response())
        }
        None => Ok(Json(state.directory.list()).into_response()),
    }
}

/// GET /users/{id}
async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.directory.get(parse_id(&id)?)?))
}

/// POST /users
async fn create_user_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<User>)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DirectoryError::Validation(MSG_MISSING_BODY.to_string()));
    }
    let payload = parse_payload(&body)?;
    let user = state.directory.create(&payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    // An empty body is an empty payload so a missing id still reports 404
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        UserPayload::default()
    } else {
        parse_payload(&body)?
    };
    Ok(Json(state.directory.update(id, &payload)?))
}

/// DELETE /users/{id}
async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.directory.delete(parse_id(&id)?)?))
}

async fn method_not_allowed_handler() -> DirectoryError {
    DirectoryError::MethodNotAllowed
}

pub(super) async fn not_found_handler() -> DirectoryError {
    DirectoryError::RouteNotFound
}

/// Read the leading digit run, so `12abc` is 12 and `abc` matches nothing.
/// A leading `+` is accepted; negative ids cannot match any user.
fn parse_id(raw: &str) -> ApiResult<u64> {
    let unknown = || DirectoryError::UnknownId(raw.to_string());
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().map_err(|_| unknown())
}

fn parse_payload(body: &[u8]) -> ApiResult<UserPayload> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "request body is not valid JSON");
        DirectoryError::Validation(MSG_INVALID_JSON.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 3 ").unwrap(), 3);
        assert!(matches!(parse_id("abc"), Err(DirectoryError::UnknownId(_))));
        assert!(matches!(parse_id("-1"), Err(DirectoryError::UnknownId(_))));
        assert!(matches!(parse_id(""), Err(DirectoryError::UnknownId(_))));
    }

    #[test]
    fn test_parse_id_reads_leading_digits() {
        assert_eq!(parse_id("12abc").unwrap(), 12);
        assert_eq!(parse_id("+5").unwrap(), 5);
        assert_eq!(parse_id("4.9").unwrap(), 4);
        assert!(matches!(parse_id("x12"), Err(DirectoryError::UnknownId(_))));
        assert!(matches!(
            parse_id("99999999999999999999999"),
            Err(DirectoryError::UnknownId(_))
        ));
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(matches!(
            parse_payload(b"{not json"),
            Err(DirectoryError::Validation(msg)) if msg == MSG_INVALID_JSON
        ));
    }

    #[test]
    fn test_parse_payload_accepts_partial() {
        let payload = parse_payload(br#"{"name": "A"}"#).unwrap();
        assert_eq!(payload.name(), Some("A"));
        assert_eq!(payload.email(), None);
    }
}
