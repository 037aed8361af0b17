//! User account data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeds the schema limit.
    UsernameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Username contains characters outside the allowed set.
    UsernameInvalidCharacters,
    /// Email does not look like an address.
    InvalidEmail,
    /// Optional name field exceeds the schema limit.
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Stored password hash was empty.
    EmptyPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, digits, and @ . + - _",
            ),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns [`uuid::Error`] when the input is not a valid UUID.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum allowed username length.
pub const USERNAME_MAX: usize = 150;
/// Maximum allowed length of a first or last name.
pub const PERSON_NAME_MAX: usize = 150;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        match Regex::new("^[A-Za-z0-9@.+_-]+$") {
            Ok(re) => re,
            Err(error) => panic!("username regex failed to compile: {error}"),
        }
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| match Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$") {
        Ok(re) => re,
        Err(error) => panic!("email regex failed to compile: {error}"),
    })
}

/// Login name used to identify an account.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`USERNAME_MAX`] characters.
/// - Characters restricted to letters, digits, and `@ . + - _`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] when the input is blank, too long, or
    /// contains disallowed characters.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address attached to an account.
///
/// Validation is intentionally shallow (`local@domain.tld` shape); delivery
/// problems surface at mail time, not registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidEmail`] when the input does not
    /// match the address shape.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional first/last display name.
///
/// Empty submissions collapse to `None` at the call site; this type only
/// exists for present values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::NameTooLong`] when the trimmed input
    /// exceeds [`PERSON_NAME_MAX`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.chars().count() > PERSON_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Construct from a form field, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::NameTooLong`] for over-long input.
    pub fn from_optional(raw: &str) -> Result<Option<Self>, UserValidationError> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            Self::new(raw).map(Some)
        }
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque PHC-format password hash.
///
/// The plaintext never reaches this type; `Debug` redacts the hash so it
/// cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPasswordHash(String);

impl StoredPasswordHash {
    /// Wrap a hash string produced by a credential hasher.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyPasswordHash`] for blank input.
    pub fn new(hash: impl Into<String>) -> Result<Self, UserValidationError> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }

    /// The PHC string as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for StoredPasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredPasswordHash(..)")
    }
}

/// A registered account as the rest of the application sees it.
///
/// The password hash deliberately lives outside this type (see
/// `StoredCredentials` in the ports module) so account values can flow to
/// serialisation boundaries without carrying secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    username: Username,
    email: EmailAddress,
    first_name: Option<PersonName>,
    last_name: Option<PersonName>,
    is_superuser: bool,
}

impl UserAccount {
    /// Build an account from validated components.
    #[must_use]
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
        is_superuser: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            first_name,
            last_name,
            is_superuser,
        }
    }

    /// Stable account identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
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

    /// Whether the account has administrative access.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}
