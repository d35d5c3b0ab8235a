//! Builders wiring domain services to the chosen persistence adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use complaints::domain::ports::{AccessTokens, ComplaintRepository, UserRepository};
use complaints::domain::{AccountService, AdminBootstrap, ComplaintService, RegistrationDetails};
use complaints::inbound::http::state::HttpState;
use complaints::inbound::http::token_config::TokenSettings;
use complaints::outbound::memory::{InMemoryComplaintRepository, InMemoryUserRepository};
use complaints::outbound::persistence::{DbPool, DieselComplaintRepository, DieselUserRepository};
use complaints::outbound::security::{Argon2PasswordHasher, HmacAccessTokens};

/// Where complaints and accounts are stored.
pub enum Persistence {
    /// Diesel-backed storage.
    Postgres(DbPool),
    /// Process-local maps; everything is lost on restart.
    InMemory,
}

/// Build the handler state, creating the bootstrap admin first when one is
/// configured.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the admin account cannot be ensured, for
/// example because the database is unreachable.
pub async fn build_http_state(
    persistence: &Persistence,
    tokens: TokenSettings,
    admin: Option<&RegistrationDetails>,
) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn AccessTokens> =
        Arc::new(HmacAccessTokens::new(tokens.key, tokens.ttl, clock.clone()));

    match persistence {
        Persistence::Postgres(pool) => {
            wire(
                Arc::new(DieselComplaintRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                tokens,
                clock,
                admin,
            )
            .await
        }
        Persistence::InMemory => {
            warn!("no database configured; complaints are kept in memory only");
            wire(
                Arc::new(InMemoryComplaintRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                tokens,
                clock,
                admin,
            )
            .await
        }
    }
}

async fn wire<C, U>(
    complaints: Arc<C>,
    users: Arc<U>,
    tokens: Arc<dyn AccessTokens>,
    clock: Arc<dyn Clock>,
    admin: Option<&RegistrationDetails>,
) -> std::io::Result<HttpState>
where
    C: ComplaintRepository + 'static,
    U: UserRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
        clock.clone(),
    ));

    if let Some(details) = admin {
        match accounts.ensure_admin(details).await {
            Ok(AdminBootstrap::Created(id)) => info!(user_id = %id, "bootstrap admin created"),
            Ok(AdminBootstrap::AlreadyPresent(id)) => {
                info!(user_id = %id, "bootstrap admin already present");
            }
            Err(err) => {
                return Err(std::io::Error::other(format!(
                    "failed to ensure admin account: {err}"
                )));
            }
        }
    }

    let complaint_service = Arc::new(ComplaintService::new(complaints, users, clock));
    Ok(HttpState {
        complaints: complaint_service.clone(),
        complaint_queries: complaint_service,
        login: accounts.clone(),
        registration: accounts,
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use complaints::domain::LoginCredentials;
    use complaints::domain::ports::LoginService;
    use rstest::rstest;
    use zeroize::Zeroizing;

    fn settings() -> TokenSettings {
        TokenSettings {
            key: Zeroizing::new(vec![7; 32]),
            ttl: chrono::Duration::hours(1),
            ephemeral: false,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_can_log_in_the_bootstrap_admin() {
        let admin = RegistrationDetails::try_from_parts("Root", "root@example.org", "change me please")
            .expect("valid admin");
        let state = build_http_state(&Persistence::InMemory, settings(), Some(&admin))
            .await
            .expect("state builds");

        let credentials = LoginCredentials::try_from_parts("root@example.org", "change me please")
            .expect("valid credentials");
        let outcome = state.login.login(&credentials).await.expect("admin logs in");

        assert!(outcome.user.role().is_admin());
        let caller = state
            .tokens
            .verify(outcome.token.as_ref())
            .expect("token verifies");
        assert_eq!(caller.id(), outcome.user.id());
    }
}
