use async_trait::async_trait;
use lettre::{
  message::{Mailbox, MultiPart},
  transport::smtp::authentication::Credentials,
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
  config::{DeliveryMode, Settings, SmtpSettings},
  email::types::{DeliveryReceipt, VerificationEmail},
  error::VerificationError,
};

/// `<base_url>/verify?token=<token>`; the `token` parameter name is part of the link contract.
pub fn verification_url(base_url: &str, token: &str) -> String {
  format!("{}/verify?token={}", base_url, token)
}

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, email: &str, token: &str) -> Result<DeliveryReceipt, VerificationError>;
}

#[derive(Debug, Clone)]
pub struct SmtpMailer {
  base_url: String,
  smtp: SmtpSettings,
  mode: DeliveryMode,
}

impl SmtpMailer {
  pub fn new(settings: &Settings) -> Self {
    Self {
      base_url: settings.base_url.clone(),
      smtp: settings.smtp.clone(),
      mode: settings.mode,
    }
  }

  pub fn compose(&self, email: &str, token: &str) -> VerificationEmail {
    VerificationEmail::new(email, &verification_url(&self.base_url, token))
  }

  /// Built per send and dropped afterwards; lettre's pool feature is off.
  fn transport(&self, host: &str, credentials: Credentials) -> Result<AsyncSmtpTransport<Tokio1Executor>, VerificationError> {
    let builder = if self.smtp.secure {
      AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
    } else if host == "localhost" || host == "mailhog" {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
    };

    Ok(builder.credentials(credentials).port(self.smtp.port).build())
  }

  fn build_message(&self, sender: &str, message: &VerificationEmail) -> Result<Message, VerificationError> {
    let email = Message::builder()
      .from(sender.parse::<Mailbox>()?)
      .to(message.to.parse::<Mailbox>()?)
      .subject(&message.subject)
      .multipart(MultiPart::alternative_plain_html(
        message.text_body.clone(),
        message.html_body.clone(),
      ))?;

    Ok(email)
  }
}

#[async_trait]
impl Mailer for SmtpMailer {
  async fn send(&self, email: &str, token: &str) -> Result<DeliveryReceipt, VerificationError> {
    let message = self.compose(email, token);

    if self.mode == DeliveryMode::DryRun {
      tracing::debug!("Dry run: skipping SMTP delivery to {}", email);
      return Ok(DeliveryReceipt::dry_run(email));
    }

    let (host, user, password) = match (&self.smtp.host, &self.smtp.user, &self.smtp.password) {
      (Some(host), Some(user), Some(password)) => (host, user, password),
      _ => {
        return Err(VerificationError::configuration(format!(
          "SMTP configuration is incomplete. Set {} in environment.",
          self.smtp.missing_for_delivery().join(", ")
        )))
      }
    };

    let sender = self.smtp.sender().unwrap_or(user);
    let outgoing = self.build_message(sender, &message)?;
    let transport = self.transport(host, Credentials::new(user.clone(), password.clone()))?;

    match transport.send(outgoing).await {
      Ok(response) => {
        tracing::info!("Verification email sent to {}", email);
        Ok(DeliveryReceipt {
          accepted: vec![email.to_string()],
          response: Some(format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
          )),
        })
      }
      Err(e) => {
        tracing::error!("Error sending verification email to {}: {:?}", email, e);
        Err(e.into())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::DeliveryError;

  fn settings(mode: DeliveryMode, smtp: SmtpSettings) -> Settings {
    Settings {
      secret_key: Some("test-secret".to_string()),
      base_url: "https://example.com".to_string(),
      smtp,
      mode,
      ..Settings::default()
    }
  }

  fn local_smtp() -> SmtpSettings {
    SmtpSettings {
      host: Some("localhost".to_string()),
      // Nothing listens on port 1, so the connection is refused immediately.
      port: 1,
      secure: false,
      user: Some("mailer@example.com".to_string()),
      password: Some("test_password".to_string()),
      from: None,
    }
  }

  #[test]
  fn test_verification_url() {
    assert_eq!(
      verification_url("http://localhost:3000", "abc.def.ghi"),
      "http://localhost:3000/verify?token=abc.def.ghi"
    );
  }

  #[test]
  fn test_compose_uses_base_url() {
    let mailer = SmtpMailer::new(&settings(DeliveryMode::DryRun, SmtpSettings::default()));
    let message = mailer.compose("user@example.com", "tok");

    assert_eq!(message.to, "user@example.com");
    assert!(message.text_body.ends_with("https://example.com/verify?token=tok"));
    assert!(message.html_body.contains("href=\"https://example.com/verify?token=tok\""));
  }

  #[tokio::test]
  async fn test_dry_run_accepts_recipient_without_smtp_settings() {
    let mailer = SmtpMailer::new(&settings(DeliveryMode::DryRun, SmtpSettings::default()));

    let receipt = mailer.send("user@example.com", "tok").await.unwrap();
    assert_eq!(receipt.accepted, vec!["user@example.com".to_string()]);
    assert_eq!(receipt.response, None);
  }

  #[tokio::test]
  async fn test_live_mode_requires_smtp_settings() {
    let mailer = SmtpMailer::new(&settings(DeliveryMode::Live, SmtpSettings::default()));

    match mailer.send("user@example.com", "tok").await {
      Err(VerificationError::Configuration(msg)) => {
        assert!(msg.contains("SMTP_HOST"));
        assert!(msg.contains("SMTP_USER"));
        assert!(msg.contains("SMTP_PASS"));
      }
      other => panic!("Expected Configuration error, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_live_mode_reports_only_missing_settings() {
    let smtp = SmtpSettings {
      host: Some("smtp.example.com".to_string()),
      user: Some("mailer@example.com".to_string()),
      ..SmtpSettings::default()
    };
    let mailer = SmtpMailer::new(&settings(DeliveryMode::Live, smtp));

    match mailer.send("user@example.com", "tok").await {
      Err(VerificationError::Configuration(msg)) => {
        assert!(msg.contains("SMTP_PASS"));
        assert!(!msg.contains("SMTP_HOST"));
      }
      other => panic!("Expected Configuration error, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_invalid_recipient_is_delivery_error() {
    let mailer = SmtpMailer::new(&settings(DeliveryMode::Live, local_smtp()));

    let result = mailer.send("not-an-address", "tok").await;
    assert!(matches!(
      result,
      Err(VerificationError::Delivery(DeliveryError::Address(_)))
    ));
  }

  #[tokio::test]
  async fn test_refused_connection_is_delivery_error() {
    let mailer = SmtpMailer::new(&settings(DeliveryMode::Live, local_smtp()));

    let result = mailer.send("user@example.com", "tok").await;
    assert!(matches!(
      result,
      Err(VerificationError::Delivery(DeliveryError::Transport(_)))
    ));
  }

  #[tokio::test]
  async fn test_transport_builds_for_each_security_mode() {
    let implicit_tls = SmtpSettings {
      host: Some("smtp.example.com".to_string()),
      port: 465,
      secure: true,
      ..local_smtp()
    };
    let starttls = SmtpSettings {
      host: Some("smtp.example.com".to_string()),
      port: 587,
      secure: false,
      ..local_smtp()
    };

    for smtp in [implicit_tls, starttls, local_smtp()] {
      let host = smtp.host.clone().unwrap();
      let mailer = SmtpMailer::new(&settings(DeliveryMode::Live, smtp));
      let transport = mailer.transport(&host, Credentials::new("u".to_string(), "p".to_string()));
      assert!(transport.is_ok());
    }
  }
}
