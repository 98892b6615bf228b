use async_trait::async_trait;
use std::fmt::Debug;

use super::ChatTurn;

/// Trait for the process-wide session history store.
///
/// Creation is lazy and idempotent: asking for an unknown session id creates
/// an empty log exactly once.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Ensure a history log exists for the session
    async fn ensure(&self, session_id: &str);

    /// Snapshot of the session's turns, in order (empty for unknown sessions)
    async fn history(&self, session_id: &str) -> Vec<ChatTurn>;

    /// Append turns to the session's log as one atomic block
    async fn append(&self, session_id: &str, turns: Vec<ChatTurn>);
}
