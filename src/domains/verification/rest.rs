use axum::{
  extract::{Json, Query, State},
  http::StatusCode,
  routing::{get, post, Router},
};
use validator::Validate;

use super::model::{SendVerificationRequest, SendVerificationResponse, VerifyQuery};
use crate::{
  state::{AppState, SharedAppState},
  utils::{error::AppError, is_non_empty_string},
};

pub fn verification_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/verify", get(verify_handler))
    .route("/api/v1/verification-emails", post(send_verification_handler))
}

pub async fn verify_handler(
  State(state): State<SharedAppState>,
  Query(query): Query<VerifyQuery>,
) -> Result<String, AppError> {
  let token = query
    .token
    .filter(|token| is_non_empty_string(token))
    .ok_or_else(|| AppError::bad_request("Missing token query parameter"))?;

  let claims = state.verify_email_token(&token)?;

  Ok(format!("Email verified: {}", claims.email))
}

pub async fn send_verification_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<SendVerificationRequest>,
) -> Result<(StatusCode, Json<SendVerificationResponse>), AppError> {
  payload
    .validate()
    .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

  state.send_verification_email(&payload.email).await?;

  Ok((
    StatusCode::ACCEPTED,
    Json(SendVerificationResponse { email: payload.email }),
  ))
}
