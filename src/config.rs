//! Process-wide settings, resolved once from the environment.

use std::{collections::HashMap, time::Duration};

use chrono::Utc;

use crate::{error::VerificationError, token::expiry_from};

pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
  Live,
  /// Render messages but never open an SMTP session.
  DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
  pub host: Option<String>,
  pub port: u16,
  /// Implicit TLS from the first byte rather than STARTTLS.
  pub secure: bool,
  pub user: Option<String>,
  pub password: Option<String>,
  pub from: Option<String>,
}

impl Default for SmtpSettings {
  fn default() -> Self {
    SmtpSettings {
      host: None,
      port: DEFAULT_SMTP_PORT,
      secure: true,
      user: None,
      password: None,
      from: None,
    }
  }
}

impl SmtpSettings {
  /// Sender mailbox: the explicit override, or the login user.
  pub fn sender(&self) -> Option<&str> {
    self.from.as_deref().or(self.user.as_deref())
  }

  /// Environment variable names of the settings a live send cannot do without.
  pub fn missing_for_delivery(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if self.host.is_none() {
      missing.push("SMTP_HOST");
    }
    if self.user.is_none() {
      missing.push("SMTP_USER");
    }
    if self.password.is_none() {
      missing.push("SMTP_PASS");
    }
    missing
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub secret_key: Option<String>,
  pub token_lifetime: Duration,
  pub base_url: String,
  pub smtp: SmtpSettings,
  pub mode: DeliveryMode,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      secret_key: None,
      token_lifetime: DEFAULT_TOKEN_LIFETIME,
      base_url: DEFAULT_BASE_URL.to_string(),
      smtp: SmtpSettings::default(),
      mode: DeliveryMode::Live,
    }
  }
}

impl Settings {
  pub fn from_env() -> Result<Self, VerificationError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, VerificationError> {
    Self::from_lookup(|key| vars.get(key).cloned())
  }

  /// Resolves settings from an arbitrary key lookup. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, VerificationError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let token_lifetime = match get("JWT_EXPIRATION") {
      Some(raw) => parse_lifetime(&raw)?,
      None => DEFAULT_TOKEN_LIFETIME,
    };

    let port = match get("SMTP_PORT") {
      Some(raw) => raw
        .trim()
        .parse::<u16>()
        .map_err(|e| VerificationError::configuration(format!("SMTP_PORT must be a port number, got {raw:?}: {e}")))?,
      None => DEFAULT_SMTP_PORT,
    };

    let secure = match get("SMTP_SECURE") {
      Some(raw) => raw.trim().eq_ignore_ascii_case("true"),
      None => port == DEFAULT_SMTP_PORT,
    };

    let mode = match get("APP_ENV") {
      Some(env) if env.trim().eq_ignore_ascii_case("test") => DeliveryMode::DryRun,
      _ => DeliveryMode::Live,
    };

    Ok(Settings {
      secret_key: get("JWT_SECRET"),
      token_lifetime,
      base_url: get("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
      smtp: SmtpSettings {
        host: get("SMTP_HOST"),
        port,
        secure,
        user: get("SMTP_USER"),
        password: get("SMTP_PASS"),
        from: get("SMTP_FROM"),
      },
      mode,
    })
  }
}

/// Accepts bare seconds (`"600"`) or a humantime span (`"10m"`, `"1h 30m"`).
/// Spans whose expiry cannot be represented are rejected here rather than at issuance.
pub fn parse_lifetime(raw: &str) -> Result<Duration, VerificationError> {
  let raw = raw.trim();
  let lifetime = match raw.parse::<u64>() {
    Ok(seconds) => Duration::from_secs(seconds),
    Err(_) => humantime::parse_duration(raw)
      .map_err(|e| VerificationError::configuration(format!("JWT_EXPIRATION is not a valid duration ({raw:?}): {e}")))?,
  };

  expiry_from(Utc::now(), lifetime)
    .map_err(|_| VerificationError::configuration(format!("JWT_EXPIRATION {raw:?} is out of range")))?;

  Ok(lifetime)
}
