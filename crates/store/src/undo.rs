//! UndoTicket repository
//!
//! Tickets are short-lived rows; `purge_expired` is called opportunistically
//! by the Library service rather than on a timer, per SPEC_FULL.md's
//! resolution of the undo-window Open Question.

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

use episodeer_core::{Error, Result, UndoTicket, UndoTicketId};

#[derive(sqlx::FromRow)]
struct UndoTicketRow {
    id: UndoTicketId,
    operation_kind: episodeer_core::OperationKind,
    inverse_payload: String,
    expires_at: DateTime<Utc>,
}

impl From<UndoTicketRow> for UndoTicket {
    fn from(row: UndoTicketRow) -> Self {
        UndoTicket {
            id: row.id,
            operation_kind: row.operation_kind,
            inverse_payload: row.inverse_payload,
            expires_at: row.expires_at,
        }
    }
}

pub struct UndoRepo;

impl UndoRepo {
    pub async fn insert<'e, E>(exec: E, ticket: &UndoTicket) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO undo_tickets (id, operation_kind, inverse_payload, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(ticket.id)
        .bind(ticket.operation_kind)
        .bind(&ticket.inverse_payload)
        .bind(ticket.expires_at)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Fetch and delete in one step — a ticket is good for exactly one
    /// undo attempt.
    pub async fn take<'e, E>(exec: E, id: UndoTicketId) -> Result<UndoTicket>
    where
        E: Executor<'e, Database = Sqlite> + Copy,
    {
        let row: UndoTicketRow = sqlx::query_as("SELECT * FROM undo_tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| Error::NotFound(format!("undo ticket {id}")))?;

        sqlx::query("DELETE FROM undo_tickets WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;

        Ok(row.into())
    }

    /// Tickets past their window, fetched so the caller can clean up
    /// whatever on-disk state they reference before purging the rows.
    pub async fn list_expired<'e, E>(exec: E, now: DateTime<Utc>) -> Result<Vec<UndoTicket>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<UndoTicketRow> =
            sqlx::query_as("SELECT * FROM undo_tickets WHERE expires_at <= ?")
                .bind(now)
                .fetch_all(exec)
                .await?;
        Ok(rows.into_iter().map(UndoTicket::from).collect())
    }

    pub async fn purge_expired<'e, E>(exec: E, now: DateTime<Utc>) -> Result<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM undo_tickets WHERE expires_at <= ?")
            .bind(now)
            .execute(exec)
            .await?;
        Ok(result.rows_affected())
    }
}
