//! User accounts and their value types.
//!
//! Accounts are created through registration (or the admin bootstrap) and
//! never mutated afterwards. The password hash is opaque to the domain; the
//! hashing port owns its format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Id is not a UUID.
    InvalidId,
    /// Name is blank after trimming.
    EmptyName,
    /// Name exceeds the length limit.
    NameTooLong {
        /// Limit in characters.
        max: usize,
    },
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail,
    /// Role label is neither `admin` nor `user`.
    UnknownRole {
        /// Label as received.
        value: String,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::UnknownRole { value } => write!(f, "unknown role: {value}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name supplied at registration.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace.
/// - Between 1 and [`USER_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 100;

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised e-mail address used as the login identifier.
///
/// Addresses are trimmed and lower-cased so lookups are case-insensitive.
/// The check is deliberately shallow: one `@`, a non-empty local part, and a
/// dotted domain without whitespace.
///
/// # Examples
/// ```
/// use complaints::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.ORG ").expect("valid address");
/// assert_eq!(email.as_ref(), "ada@example.org");
/// assert!(EmailAddress::new("not-an-address").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an e-mail address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if !looks_like_email(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

fn looks_like_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let has_tld = domain.contains('.');
    has_tld && labels.all(|label| !label.is_empty())
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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

/// Authorization role attached to every account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrators triage complaints and see every record.
    Admin,
    /// Citizens who file and follow their own complaints.
    #[default]
    User,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Whether the role grants administrative access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Stored password hash in the hashing adapter's encoded form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    password_hash: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Field bundle for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: UserName,
    /// Normalised e-mail, unique per account.
    pub email: EmailAddress,
    /// PHC-encoded password hash.
    pub password_hash: PasswordHash,
    /// Authorization role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Assemble an account from validated parts.
    #[must_use]
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            name,
            email,
            password_hash,
            role,
            created_at,
        } = draft;
        Self {
            id,
            name,
            email,
            password_hash,
            role,
            created_at,
        }
    }

    /// Account identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised e-mail.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Authorization role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Registration time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Public projection used when populating complaint owners.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public identity of an account: id, name and e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: UserName,
    /// Contact e-mail.
    pub email: EmailAddress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.org")]
    #[case("  ADA@Example.org  ")]
    #[case("first.last+tag@mail.example.co.uk")]
    fn accepts_plausible_addresses(#[case] raw: &str) {
        let email = EmailAddress::new(raw).expect("valid address");
        assert_eq!(email.as_ref(), raw.trim().to_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("@example.org")]
    #[case("ada@localhost")]
    #[case("ada@example..org")]
    #[case("ada@@example.org")]
    #[case("ada lovelace@example.org")]
    fn rejects_malformed_addresses(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[rstest]
    fn user_name_is_trimmed() {
        let name = UserName::new("  Grace Hopper ").expect("valid name");
        assert_eq!(name.as_ref(), "Grace Hopper");
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyName)]
    #[case(&"x".repeat(USER_NAME_MAX + 1), UserValidationError::NameTooLong { max: USER_NAME_MAX })]
    fn user_name_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserName::new(raw), Err(expected));
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    fn role_parses_wire_values(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn role_rejects_unknown_values() {
        assert!(matches!(
            "root".parse::<Role>(),
            Err(UserValidationError::UnknownRole { .. })
        ));
    }

    #[rstest]
    fn user_id_rejects_padded_input() {
        assert_eq!(
            UserId::new(" 3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            Err(UserValidationError::InvalidId)
        );
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$secret");
        assert!(!format!("{hash:?}").contains("secret"));
    }
}
