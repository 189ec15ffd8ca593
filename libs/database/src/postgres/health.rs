use sea_orm::DatabaseConnection;

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the database to verify the connection is alive.
///
/// Used by readiness endpoints; a failed ping maps to "not ready" rather
/// than an unrecoverable error.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
