//! UndoTicket entity — transient record of a destructive operation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UndoTicketId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    RegenerateWithSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoTicket {
    pub id: UndoTicketId,
    pub operation_kind: OperationKind,
    /// Serialized snapshot sufficient to restore prior state (an
    /// `EpisodeSnapshot`, JSON-encoded, for `RegenerateWithSettings`).
    pub inverse_payload: String,
    pub expires_at: DateTime<Utc>,
}

impl UndoTicket {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
