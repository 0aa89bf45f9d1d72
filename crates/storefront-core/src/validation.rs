//! # Validation Module
//!
//! Login and signup form rules.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Login Flow                                         │
//! │                                                                         │
//! │  Login modal collects { name?, email, password }                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: shape checks, every failing field reported               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  (simulated network delay, outside the stores)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  AuthStore::login(form.into_user())                                    │
//! │                                                                         │
//! │  NOTE: nothing here verifies a credential. A well-formed password is   │
//! │  accepted; a real backend would replace the delay step.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::LoginForm;
//!
//! let form = LoginForm::new("asha@example.com", "secret1");
//! assert!(form.validate().is_empty());
//! let user = form.into_user().unwrap();
//! assert_eq!(user.name, "asha");
//! ```

use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::User;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted by the forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum display name length on signup.
pub const MIN_NAME_LEN: usize = 2;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - No whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain has at least two non-empty dot-separated labels and an
///   alphabetic top-level label of two or more characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("asha@example.com").is_ok());
/// assert!(validate_email("asha@example").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "Please enter a valid email".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    let tld = labels.last().copied().unwrap_or_default();
    if tld.chars().count() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LEN`] characters (counted as chars, not bytes)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a signup display name (trimmed, at least [`MIN_NAME_LEN`] chars).
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_NAME_LEN,
        });
    }

    Ok(())
}

/// Local part of an email address, used as a fallback display name.
fn email_local_part(email: &str) -> &str {
    let email = email.trim();
    email.split('@').next().unwrap_or(email)
}

// =============================================================================
// Forms
// =============================================================================

/// The login form: email and password.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns every field error; empty means the form is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        [validate_email(&self.email), validate_password(&self.password)]
            .into_iter()
            .filter_map(Result::err)
            .collect()
    }

    /// Builds the user handed to the auth store.
    ///
    /// The name is the email local part. Returns the first field error when
    /// the form is invalid.
    pub fn into_user(self) -> ValidationResult<User> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err);
        }

        let email = self.email.trim().to_string();
        let name = email_local_part(&email).to_string();
        Ok(User::new(Uuid::new_v4().to_string(), email, name))
    }
}

/// The signup form: the login fields plus a display name.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        SignupForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns every field error; empty means the form is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        [
            validate_display_name(&self.name),
            validate_email(&self.email),
            validate_password(&self.password),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    /// Builds the user handed to the auth store, named as entered.
    pub fn into_user(self) -> ValidationResult<User> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err);
        }

        Ok(User::new(
            Uuid::new_v4().to_string(),
            self.email.trim(),
            self.name.trim(),
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
