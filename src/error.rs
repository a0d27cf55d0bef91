use thiserror::Error;

/// Failures surfaced by token issuance, validation and verification mail delivery.
///
/// Every variant reaches the caller unchanged; nothing in this crate retries or
/// swallows them.
#[derive(Debug, Error)]
pub enum VerificationError {
  /// A required setting is absent or unparsable.
  #[error("Configuration error: {0}")]
  Configuration(String),

  /// Bad signature, malformed token or elapsed expiry.
  #[error("Invalid token: {0}")]
  InvalidToken(#[source] jsonwebtoken::errors::Error),

  #[error("Token signing failed: {0}")]
  Signing(#[source] jsonwebtoken::errors::Error),

  #[error("Delivery error: {0}")]
  Delivery(#[from] DeliveryError),
}

impl VerificationError {
  pub fn configuration(message: impl Into<String>) -> Self {
    VerificationError::Configuration(message.into())
  }
}

/// Anything that goes wrong between composing the message and the SMTP server
/// accepting it.
#[derive(Debug, Error)]
pub enum DeliveryError {
  #[error("invalid mailbox address: {0}")]
  Address(#[from] lettre::address::AddressError),

  #[error("failed to build message: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("SMTP transport failure: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

impl From<lettre::address::AddressError> for VerificationError {
  fn from(err: lettre::address::AddressError) -> Self {
    VerificationError::Delivery(err.into())
  }
}

impl From<lettre::error::Error> for VerificationError {
  fn from(err: lettre::error::Error) -> Self {
    VerificationError::Delivery(err.into())
  }
}

impl From<lettre::transport::smtp::Error> for VerificationError {
  fn from(err: lettre::transport::smtp::Error) -> Self {
    VerificationError::Delivery(err.into())
  }
}
