pub mod app;
pub mod config;
pub mod domains;
pub mod email;
pub mod error;
pub mod state;
pub mod token;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::{DeliveryMode, Settings, SmtpSettings};
pub use domains::verification::service::{VerificationService, VerificationServiceImpl};
pub use error::{DeliveryError, VerificationError};
pub use utils::error::AppError;
