use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
  decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use super::types::Claims;
use crate::{config::Settings, error::VerificationError};

#[derive(Clone)]
pub struct TokenService {
  secret_key: Option<String>,
  lifetime: StdDuration,
}

impl TokenService {
  pub fn new(settings: &Settings) -> Self {
    Self {
      secret_key: settings.secret_key.clone(),
      lifetime: settings.token_lifetime,
    }
  }

  /// Signs a token binding `email`. The address is not checked here.
  pub fn issue(&self, email: &str) -> Result<String, VerificationError> {
    self.issue_at(email, Utc::now())
  }

  pub(crate) fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, VerificationError> {
    let secret = self.secret("issuing a token")?;

    let expires_at = expiry_from(now, self.lifetime)?;

    let claims = Claims {
      email: email.to_string(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
      jti: Some(Uuid::new_v4().to_string()),
    };

    encode(
      &Header::new(Algorithm::HS256),
      &claims,
      &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(VerificationError::Signing)
  }

  pub fn validate(&self, token: &str) -> Result<Claims, VerificationError> {
    self.validate_at(token, Utc::now())
  }

  /// A token is expired from the second named by `exp` onwards.
  pub(crate) fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, VerificationError> {
    let secret = self.secret("validating a token")?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
      .map_err(VerificationError::InvalidToken)?;

    if token_data.claims.exp <= now.timestamp() {
      return Err(VerificationError::InvalidToken(ErrorKind::ExpiredSignature.into()));
    }

    Ok(token_data.claims)
  }

  fn secret(&self, operation: &str) -> Result<&str, VerificationError> {
    self.secret_key.as_deref().ok_or_else(|| {
      VerificationError::configuration(format!(
        "JWT_SECRET is not set. Set JWT_SECRET before {}.",
        operation
      ))
    })
  }
}

/// `now + lifetime`, or a configuration error when the sum is not representable.
pub(crate) fn expiry_from(now: DateTime<Utc>, lifetime: StdDuration) -> Result<DateTime<Utc>, VerificationError> {
  let lifetime = Duration::from_std(lifetime)
    .map_err(|e| VerificationError::configuration(format!("Token lifetime out of range: {}", e)))?;

  now
    .checked_add_signed(lifetime)
    .ok_or_else(|| VerificationError::configuration("Token lifetime out of range: expiry overflows"))
}
