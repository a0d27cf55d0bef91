use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::error::VerificationError;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn bad_gateway(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_GATEWAY, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "error": self.message,
      "status_code": self.status_code.as_u16(),
    }));

    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<VerificationError> for AppError {
  fn from(error: VerificationError) -> Self {
    match error {
      VerificationError::InvalidToken(e) => {
        tracing::debug!("Token rejected: {:?}", e);
        AppError::bad_request("Invalid or expired token")
      }
      VerificationError::Delivery(e) => {
        tracing::error!("Delivery error: {:?}", e);
        AppError::bad_gateway("Failed to send verification email")
      }
      VerificationError::Configuration(msg) => {
        tracing::error!("Configuration error: {}", msg);
        AppError::internal_server_error("Server is not configured for email verification")
      }
      VerificationError::Signing(e) => {
        tracing::error!("Token signing error: {:?}", e);
        AppError::internal_server_error("Internal server error occurred")
      }
    }
  }
}
