//! Cascading role resolution
//!
//! The four credential collections are independent stores with per-table
//! autoincrement ids, so the same numeric id can exist in more than one
//! collection. The resolver probes an ordered list of collection accessors
//! and returns the first match, which makes resolution deterministic: on a
//! cross-collection id collision the customer record always wins. Ids are
//! not deduplicated across collections; whether such collisions are an
//! accepted risk or an oversight is an open question, so the deterministic
//! precedence is the documented contract rather than something to "fix".

use async_trait::async_trait;
use compass_db::{Database, DbError, Role};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::principal::{Principal, find_principal};

/// Fixed probe order for the generic guard. Single-role guards bypass the
/// resolver and query their one collection directly.
pub const RESOLUTION_ORDER: [Role; 4] = [Role::Customer, Role::Worker, Role::Admin, Role::Sales];

/// A `find_by_id` capability over one role collection
#[async_trait]
pub trait PrincipalSource: Send + Sync {
    /// Role tag of the collection this source reads
    fn role(&self) -> Role;

    /// Look up a subject id in this collection only
    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, DbError>;
}

/// Collection accessor backed by one of the database's role collections
struct CollectionSource {
    db: Database,
    role: Role,
}

#[async_trait]
impl PrincipalSource for CollectionSource {
    fn role(&self) -> Role {
        self.role
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, DbError> {
        find_principal(&self.db, self.role, id).await
    }
}

/// Resolves a token subject id to the collection that owns it
pub struct RoleResolver {
    sources: Vec<Arc<dyn PrincipalSource>>,
}

impl RoleResolver {
    /// Create a resolver over an ordered list of collection accessors
    pub fn new(sources: Vec<Arc<dyn PrincipalSource>>) -> Self {
        Self { sources }
    }

    /// Create the standard resolver probing collections in [`RESOLUTION_ORDER`]
    pub fn standard(db: Database) -> Self {
        Self::new(
            RESOLUTION_ORDER
                .iter()
                .map(|&role| {
                    Arc::new(CollectionSource {
                        db: db.clone(),
                        role,
                    }) as Arc<dyn PrincipalSource>
                })
                .collect(),
        )
    }

    /// Probe the collections in order and return the first owner of the id
    ///
    /// Short-circuits on the first match, so at most one lookup per
    /// collection per request.
    pub async fn resolve(&self, subject_id: i64) -> Result<Principal, AuthError> {
        for source in &self.sources {
            if let Some(principal) = source.find_by_id(subject_id).await? {
                debug!(
                    "Resolved subject {} to {} collection",
                    subject_id,
                    source.role()
                );
                return Ok(principal);
            }
        }
        Err(AuthError::PrincipalNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_db::{NewAdmin, NewCustomer, NewWorker, WorkerStatus};

    async fn temp_db() -> (Database, tempfile::NamedTempFile) {
        let file = tempfile::NamedTempFile::new().unwrap();
        let url = format!("sqlite:{}?mode=rwc", file.path().display());
        let db = Database::new(&url).await.unwrap();
        (db, file)
    }

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            full_name: "Test Customer".to_string(),
            email: email.to_string(),
            password_hash: "x".to_string(),
            phone: None,
            address: None,
        }
    }

    fn new_worker(email: &str) -> NewWorker {
        NewWorker {
            full_name: "Test Worker".to_string(),
            email: email.to_string(),
            password_hash: "x".to_string(),
            specialization: "plumbing".to_string(),
            status: WorkerStatus::Available,
        }
    }

    #[tokio::test]
    async fn test_resolves_sole_owner_of_id() {
        let (db, _file) = temp_db().await;
        let worker = db.insert_worker(new_worker("w@example.com")).await.unwrap();

        let resolver = RoleResolver::standard(db);
        let principal = resolver.resolve(worker.id).await.unwrap();

        assert_eq!(principal.id, worker.id);
        assert_eq!(principal.role, Role::Worker);
    }

    #[tokio::test]
    async fn test_collision_resolves_to_customer_first() {
        let (db, _file) = temp_db().await;

        // Per-table autoincrement: the first row of each table gets id 1,
        // which is exactly the pathological cross-collection collision.
        let customer = db
            .insert_customer(new_customer("c@example.com"))
            .await
            .unwrap();
        let worker = db.insert_worker(new_worker("w@example.com")).await.unwrap();
        assert_eq!(customer.id, worker.id);

        let resolver = RoleResolver::standard(db);
        for _ in 0..3 {
            let principal = resolver.resolve(customer.id).await.unwrap();
            assert_eq!(principal.role, Role::Customer);
        }
    }

    #[tokio::test]
    async fn test_admin_loses_to_earlier_collections() {
        let (db, _file) = temp_db().await;

        let admin = db
            .insert_admin(NewAdmin {
                full_name: "Test Admin".to_string(),
                email: "a@example.com".to_string(),
                password_hash: "x".to_string(),
            })
            .await
            .unwrap();
        let worker = db.insert_worker(new_worker("w@example.com")).await.unwrap();
        assert_eq!(admin.id, worker.id);

        let resolver = RoleResolver::standard(db);
        let principal = resolver.resolve(admin.id).await.unwrap();
        assert_eq!(principal.role, Role::Worker);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (db, _file) = temp_db().await;

        let resolver = RoleResolver::standard(db);
        let result = resolver.resolve(9999).await;
        assert!(matches!(result, Err(AuthError::PrincipalNotFound)));
    }

    #[test]
    fn test_resolution_order_is_fixed() {
        assert_eq!(
            RESOLUTION_ORDER,
            [Role::Customer, Role::Worker, Role::Admin, Role::Sales]
        );
    }
}
