//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{AccessTokens, PasswordHasher, UserRepository};
use crate::domain::{
    AccountService, AuthenticatedUser, ComplaintService, EmailAddress, Role, User, UserDraft,
    UserId, UserName,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryComplaintRepository, InMemoryUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, DEFAULT_TOKEN_TTL, HmacAccessTokens};

/// Controllable clock for deterministic timestamps.
///
/// # Examples
/// ```
/// use complaints::test_support::MutableClock;
/// use mockable::Clock;
///
/// let clock = MutableClock::at_fixture_time();
/// let before = clock.utc();
/// clock.advance_minutes(5);
/// assert_eq!((clock.utc() - before).num_minutes(), 5);
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock pinned to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock pinned to 2025-01-01T09:00:00Z.
    pub fn at_fixture_time() -> Self {
        Self::new(fixture_timestamp())
    }

    /// Move the clock forward.
    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Stable timestamp used by fixtures.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Signing key shared by in-memory harnesses so tokens minted in one test
/// helper verify in another.
pub const TEST_TOKEN_KEY: &[u8; 32] = b"complaints-test-signing-key-0001";

/// HTTP state wired to real services over in-memory adapters.
///
/// Password hashing uses cheap Argon2 parameters and tokens are signed with
/// [`TEST_TOKEN_KEY`] against a [`MutableClock`] pinned to
/// [`fixture_timestamp`].
///
/// # Examples
/// ```
/// use complaints::domain::Role;
/// use complaints::test_support::InMemoryHarness;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let harness = InMemoryHarness::new();
/// let admin = harness.seed_user("Grace", "grace@example.org", Role::Admin).await;
/// assert!(!admin.token.is_empty());
/// # });
/// ```
pub struct InMemoryHarness {
    /// State to hand to `api_scope`.
    pub state: HttpState,
    /// Clock shared by every service.
    pub clock: Arc<MutableClock>,
    /// Account store.
    pub users: Arc<InMemoryUserRepository>,
    /// Complaint store.
    pub complaints: Arc<InMemoryComplaintRepository>,
    /// Account service used for seeding.
    pub accounts: Arc<AccountService<InMemoryUserRepository>>,
    tokens: Arc<HmacAccessTokens>,
    hasher: Arc<Argon2PasswordHasher>,
}

/// Account created by [`InMemoryHarness::seed_user`].
pub struct SeededUser {
    /// The stored account.
    pub user: User,
    /// Bearer token for the account.
    pub token: String,
}

impl SeededUser {
    /// `Authorization` header value for this account.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl Default for InMemoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHarness {
    /// Build a harness with empty stores.
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::at_fixture_time());
        let users = Arc::new(InMemoryUserRepository::new());
        let complaints = Arc::new(InMemoryComplaintRepository::new());
        let tokens = Arc::new(HmacAccessTokens::new(
            Zeroizing::new(TEST_TOKEN_KEY.to_vec()),
            DEFAULT_TOKEN_TTL,
            clock.clone(),
        ));
        let hasher = Arc::new(
            Argon2PasswordHasher::with_params(8, 1, 1)
                .unwrap_or_else(|_| Argon2PasswordHasher::new()),
        );
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            hasher.clone(),
            tokens.clone(),
            clock.clone(),
        ));
        let complaint_service = Arc::new(ComplaintService::new(
            complaints.clone(),
            users.clone(),
            clock.clone(),
        ));
        let state = HttpState {
            complaints: complaint_service.clone(),
            complaint_queries: complaint_service,
            login: accounts.clone(),
            registration: accounts.clone(),
            tokens: tokens.clone(),
        };

        Self {
            state,
            clock,
            users,
            complaints,
            accounts,
            tokens,
            hasher,
        }
    }

    /// Insert an account directly and mint a token for it.
    ///
    /// # Panics
    ///
    /// Panics when the name or e-mail is invalid, the e-mail is taken, or
    /// signing fails. Fixtures are expected to be well formed.
    #[expect(clippy::expect_used, reason = "test fixture helper")]
    pub async fn seed_user(&self, name: &str, email: &str, role: Role) -> SeededUser {
        let user = User::new(UserDraft {
            id: UserId::random(),
            name: UserName::new(name).expect("fixture name is valid"),
            email: EmailAddress::new(email).expect("fixture email is valid"),
            password_hash: self
                .hasher
                .hash("correct horse")
                .expect("hashing succeeds"),
            role,
            created_at: self.clock.utc(),
        });
        self.users.insert(&user).await.expect("fixture email is free");
        let token = self.token_for(&user);
        SeededUser { user, token }
    }

    /// Sign a token for an existing account.
    #[expect(clippy::expect_used, reason = "test fixture helper")]
    pub fn token_for(&self, user: &User) -> String {
        self.tokens
            .issue(&AuthenticatedUser::new(user.id(), user.role()))
            .expect("signing succeeds")
            .into_inner()
    }
}
