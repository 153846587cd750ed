//! Request-scoped authenticated identity

use compass_db::{Admin, Customer, Database, DbError, Role, SalesRep, Worker};
use serde::{Deserialize, Serialize};

/// The authenticated caller, derived per-request from a credential record
/// plus the collection it was found in. Never persisted; the password hash
/// is stripped before the record leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
    pub full_name: String,
    pub email: String,
}

impl From<Customer> for Principal {
    fn from(record: Customer) -> Self {
        Self {
            id: record.id,
            role: Role::Customer,
            full_name: record.full_name,
            email: record.email,
        }
    }
}

impl From<Worker> for Principal {
    fn from(record: Worker) -> Self {
        Self {
            id: record.id,
            role: Role::Worker,
            full_name: record.full_name,
            email: record.email,
        }
    }
}

impl From<Admin> for Principal {
    fn from(record: Admin) -> Self {
        Self {
            id: record.id,
            role: Role::Admin,
            full_name: record.full_name,
            email: record.email,
        }
    }
}

impl From<SalesRep> for Principal {
    fn from(record: SalesRep) -> Self {
        Self {
            id: record.id,
            role: Role::Sales,
            full_name: record.full_name,
            email: record.email,
        }
    }
}

/// Look up a subject id in a single role collection
///
/// Shared by the single-role guards and the resolver's per-collection
/// sources, so both paths project records into principals the same way.
pub(crate) async fn find_principal(
    db: &Database,
    role: Role,
    id: i64,
) -> Result<Option<Principal>, DbError> {
    let principal = match role {
        Role::Customer => db.get_customer_by_id(id).await?.map(Principal::from),
        Role::Worker => db.get_worker_by_id(id).await?.map(Principal::from),
        Role::Admin => db.get_admin_by_id(id).await?.map(Principal::from),
        Role::Sales => db.get_sales_rep_by_id(id).await?.map(Principal::from),
    };
    Ok(principal)
}
