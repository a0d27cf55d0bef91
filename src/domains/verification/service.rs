use async_trait::async_trait;

use crate::{
  config::Settings,
  email::{Mailer, SmtpMailer},
  error::VerificationError,
  token::{Claims, TokenService},
};

#[async_trait]
pub trait VerificationService: Send + Sync {
  /// Issues a token for `email`, mails the link, and hands the token back.
  async fn send_verification_email(&self, email: &str) -> Result<String, VerificationError>;
  fn verify_email_token(&self, token: &str) -> Result<Claims, VerificationError>;
}

pub struct VerificationServiceImpl<M> {
  token_service: TokenService,
  mailer: M,
}

impl<M> VerificationServiceImpl<M>
where
  M: Mailer,
{
  pub fn new(token_service: TokenService, mailer: M) -> Self {
    Self { token_service, mailer }
  }
}

impl VerificationServiceImpl<SmtpMailer> {
  pub fn from_settings(settings: &Settings) -> Self {
    Self::new(TokenService::new(settings), SmtpMailer::new(settings))
  }
}

#[async_trait]
impl<M> VerificationService for VerificationServiceImpl<M>
where
  M: Mailer,
{
  async fn send_verification_email(&self, email: &str) -> Result<String, VerificationError> {
    let token = self.token_service.issue(email)?;
    self.mailer.send(email, &token).await?;

    Ok(token)
  }

  fn verify_email_token(&self, token: &str) -> Result<Claims, VerificationError> {
    self.token_service.validate(token)
  }
}
