//! Application state

use compass_auth::{AuthContext, JwtCodec, SessionIssuer, TokenCodec};
use compass_db::Database;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthContext,
    pub issuer: Arc<SessionIssuer>,
}

impl AppState {
    pub fn new(db: Database, codec: Arc<dyn TokenCodec>, cookie_secure: bool) -> Self {
        let auth = AuthContext::new(db.clone(), codec.clone(), cookie_secure);
        let issuer = Arc::new(SessionIssuer::new(db.clone(), codec));
        Self { db, auth, issuer }
    }

    /// Convenience constructor wiring the stateless JWT codec
    pub fn with_secret(db: Database, jwt_secret: &str, cookie_secure: bool) -> Self {
        Self::new(db, Arc::new(JwtCodec::new(jwt_secret)), cookie_secure)
    }
}
