//! Compass CRM Authentication and Authorization
//!
//! This crate provides cookie-based JWT authentication and role-based
//! access control for Compass CRM. The four role collections (customer,
//! worker, admin, sales) are independent stores; the [`resolver::RoleResolver`]
//! probes them in a fixed priority order to attach a [`Principal`] to the
//! request, and the guards in [`guard`] enforce access before a handler runs.

pub mod cookie;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod resolver;
pub mod session;

pub use error::AuthError;
pub use guard::{
    AuthContext, authorize_roles, require_admin, require_authenticated, require_customer,
    require_worker,
};
pub use jwt::{Claims, JwtCodec, TOKEN_TTL_DAYS, TokenCodec};
pub use password::{hash_password, verify_password};
pub use principal::Principal;
pub use resolver::{PrincipalSource, RESOLUTION_ORDER, RoleResolver};
pub use session::SessionIssuer;
