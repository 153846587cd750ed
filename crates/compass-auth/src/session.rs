//! Session issuance
//!
//! Login authenticates against exactly the collection named by the declared
//! role; there is no cascading at login. Logout is client-side cookie
//! removal only (see [`crate::cookie::removal_cookie`]); the token itself
//! stays valid until natural expiry because the codec is stateless.

use compass_db::{Database, Role};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::principal::Principal;

/// A valid Argon2 hash that always fails verification. Verifying against it
/// when no record matches the email keeps login latency independent of
/// account existence.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nX2F0dGFja19wcmV2ZW50aW9u$K8rI5T7VdQ8xkO0GqK5K2w";

/// Authenticates credentials and mints session tokens
pub struct SessionIssuer {
    db: Database,
    codec: Arc<dyn TokenCodec>,
}

impl SessionIssuer {
    pub fn new(db: Database, codec: Arc<dyn TokenCodec>) -> Self {
        Self { db, codec }
    }

    /// Authenticate against the declared role's collection and issue a token
    ///
    /// Failure is always `InvalidCredentials`: the caller cannot tell an
    /// unknown email from a wrong password.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        declared_role: Role,
    ) -> Result<(Principal, String), AuthError> {
        debug!("Login attempt for {} as {}", email, declared_role);

        let found = self.lookup(email, declared_role).await?;

        let (hash_to_verify, principal) = match found {
            Some((principal, hash)) => (hash, Some(principal)),
            None => (DUMMY_HASH.to_string(), None),
        };

        let password_valid = crate::password::verify_password(password, &hash_to_verify)?;

        let principal = match (principal, password_valid) {
            (Some(p), true) => p,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = self.codec.issue(principal.id)?;

        info!("{} {} logged in", declared_role, principal.email);

        Ok((principal, token))
    }

    /// Email lookup scoped to a single collection, returning the projection
    /// and the stored hash separately so the hash never rides on the principal
    async fn lookup(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<(Principal, String)>, AuthError> {
        let found = match role {
            Role::Customer => self
                .db
                .get_customer_by_email(email)
                .await?
                .map(|r| (r.password_hash.clone(), Principal::from(r))),
            Role::Worker => self
                .db
                .get_worker_by_email(email)
                .await?
                .map(|r| (r.password_hash.clone(), Principal::from(r))),
            Role::Admin => self
                .db
                .get_admin_by_email(email)
                .await?
                .map(|r| (r.password_hash.clone(), Principal::from(r))),
            Role::Sales => self
                .db
                .get_sales_rep_by_email(email)
                .await?
                .map(|r| (r.password_hash.clone(), Principal::from(r))),
        };
        Ok(found.map(|(hash, principal)| (principal, hash)))
    }
}
