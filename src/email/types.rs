use serde::{Deserialize, Serialize};

pub const VERIFICATION_SUBJECT: &str = "Email Verification";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEmail {
  pub to: String,
  pub subject: String,
  pub text_body: String,
  pub html_body: String,
}

impl VerificationEmail {
  pub fn new(to: impl Into<String>, verification_url: &str) -> Self {
    VerificationEmail {
      to: to.into(),
      subject: VERIFICATION_SUBJECT.to_string(),
      text_body: format!(
        "Please verify your email by clicking on the following link: {}",
        verification_url
      ),
      html_body: format!(
        "<p>Please verify your email by clicking on the following link: <a href=\"{}\">Verify Email</a></p>",
        verification_url
      ),
    }
  }
}

/// What the transport reported back for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
  pub accepted: Vec<String>,
  /// Final SMTP reply, e.g. `250 OK`. `None` when nothing was transmitted.
  pub response: Option<String>,
}

impl DeliveryReceipt {
  pub fn dry_run(recipient: impl Into<String>) -> Self {
    DeliveryReceipt {
      accepted: vec![recipient.into()],
      response: None,
    }
  }
}
