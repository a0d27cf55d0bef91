//! Verification mail dispatch
//!
//! Renders the verification link into a message and hands it to an SMTP
//! server through lettre, or short-circuits in dry-run mode.

mod service;
mod types;

pub use service::{verification_url, Mailer, SmtpMailer};
pub use types::{DeliveryReceipt, VerificationEmail};
