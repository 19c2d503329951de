//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notehub_core::types::UserId;

/// Context for the current request.
///
/// Built by the caller (the CLI, or an HTTP layer after authentication) and
/// passed into service methods so that every operation knows which user's
/// data it acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID. All reads and writes are scoped to it.
    pub user_id: UserId,
    /// Correlation ID for logs.
    pub request_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_id: Uuid::now_v7(),
            request_time: Utc::now(),
        }
    }
}
