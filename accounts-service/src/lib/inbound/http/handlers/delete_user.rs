use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<DeleteUserResponseData>, ApiError> {
    let deleted = state
        .user_service
        .delete_user(UserId(user_id))
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::NotFound(format!("User not found: {}", user_id)));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteUserResponseData {
            message: "User deleted successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResponseData {
    pub message: String,
}
