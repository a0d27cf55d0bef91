use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validate_email_address;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SendVerificationRequest {
  #[validate(custom(function = "validate_email_address"))]
  pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendVerificationResponse {
  pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyQuery {
  pub token: Option<String>,
}
