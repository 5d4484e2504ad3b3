//! Per-invocation transaction context
use super::identity::ClientIdentity;
use chrono::{DateTime, SecondsFormat, Utc};

/// Everything an operation may read besides the world state: who is calling
/// and when the transaction was proposed.
///
/// The timestamp is an input from the host, not a local clock read. Every
/// replica replaying the same transaction sees the same value, so the
/// `CreatedAt` field and history entries derived from it stay byte-identical
/// across replicas.
#[derive(Debug, Clone)]
pub struct TransactionContext {
    identity: ClientIdentity,
    timestamp: DateTime<Utc>,
}

impl TransactionContext {
    pub fn new(identity: ClientIdentity, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity,
            timestamp,
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp rendered the way history entries record it.
    pub fn timestamp_text(&self) -> String {
        self.timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
