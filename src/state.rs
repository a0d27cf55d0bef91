use std::sync::Arc;

use crate::{
  config::Settings,
  domains::verification::service::{VerificationService, VerificationServiceImpl},
  email::SmtpMailer,
  error::VerificationError,
  token::Claims,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn send_verification_email(
    &self,
    email: &str,
  ) -> impl std::future::Future<Output = Result<String, VerificationError>> + Send;
  fn verify_email_token(&self, token: &str) -> Result<Claims, VerificationError>;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub verification_service: Arc<VerificationServiceImpl<SmtpMailer>>,
}

impl SharedAppState {
  pub fn new(settings: &Settings) -> Self {
    let verification_service = Arc::new(VerificationServiceImpl::from_settings(settings));

    Self { verification_service }
  }
}

impl AppState for SharedAppState {
  async fn send_verification_email(&self, email: &str) -> Result<String, VerificationError> {
    self.verification_service.send_verification_email(email).await
  }

  fn verify_email_token(&self, token: &str) -> Result<Claims, VerificationError> {
    self.verification_service.verify_email_token(token)
  }
}
