//! Shared MongoDB error mapping for repository adapters.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

/// Whether the driver error means the deployment could not be reached.
fn is_connectivity_failure(kind: &ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. }
    )
}

/// Map a driver error into query/connection constructors.
///
/// Driver messages can carry hostnames and credentials hints, so they are
/// logged at debug level and replaced by fixed messages.
pub fn map_mongo_error<E, Q, C>(error: MongoError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    debug!(error = %error, "document store operation failed");
    if is_connectivity_failure(&error.kind) {
        connection("document store unreachable")
    } else {
        query("document store operation failed")
    }
}
