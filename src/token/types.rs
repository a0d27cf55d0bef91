use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub email: String,
  pub iat: i64,
  pub exp: i64,
  /// Random per issuance, so equal emails within the same second still differ.
  /// Tokens from issuers that only sign `{email, iat, exp}` carry none.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jti: Option<String>,
}

impl Claims {
  pub fn issued_at(&self) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(self.iat, 0)
  }

  pub fn expires_at(&self) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(self.exp, 0)
  }
}
