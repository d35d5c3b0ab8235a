//! Authentication primitives: credentials, registration input, and the
//! identity resolved from a bearer token.
//!
//! Inbound adapters build these from raw strings so services only ever see
//! validated values.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{EmailAddress, Role, UserId, UserName, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// E-mail was blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort {
        /// Required length in characters.
        min: usize,
    },
    /// Name or e-mail failed the account value checks.
    User(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::User(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is a normalised [`EmailAddress`].
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use complaints::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.org", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.org");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        if email.trim().is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised e-mail used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated input for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = UserName::new(name)?;
        if email.trim().is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AuthValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised e-mail.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password, zeroed on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Caller identity resolved from a verified access token.
///
/// No database lookup backs this value; role checks rely on the role that was
/// signed into the token at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    role: Role,
}

impl AuthenticatedUser {
    /// Pair an account id with its role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Account identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Role signed into the token.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the caller holds the admin role.
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Signed bearer credential handed to clients after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Consume the token, yielding the encoded string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
