//! Authentication and registration input types.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, PersonName, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] for blank fields.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures raised while assembling a [`RegistrationRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Password and confirmation differ.
    PasswordMismatch,
    /// Password was blank.
    EmptyPassword,
    /// A username/email/name field failed validation.
    Field(UserValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Field(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Field(value)
    }
}

/// A validated registration submission.
///
/// The password/confirmation comparison happens here, before any port is
/// touched, so a mismatch can never create an account.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    username: Username,
    email: EmailAddress,
    first_name: Option<PersonName>,
    last_name: Option<PersonName>,
    password: Zeroizing<String>,
}

impl RegistrationRequest {
    /// Validate raw form fields into a registration request.
    ///
    /// Field order mirrors the registration form: names first, then
    /// credentials, then the contact address.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationValidationError::PasswordMismatch`] when the two
    /// password fields differ, [`RegistrationValidationError::EmptyPassword`]
    /// for a blank password, and [`RegistrationValidationError::Field`] for
    /// malformed username/email/name values.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        username: &str,
        password: &str,
        confirm_password: &str,
        email: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password != confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            first_name: PersonName::from_optional(first_name)?,
            last_name: PersonName::from_optional(last_name)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested contact address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Optional first name.
    #[must_use]
    pub fn first_name(&self) -> Option<&PersonName> {
        self.first_name.as_ref()
    }

    /// Optional last name.
    #[must_use]
    pub fn last_name(&self) -> Option<&PersonName> {
        self.last_name.as_ref()
    }

    /// Plaintext password awaiting hashing; never stored.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
