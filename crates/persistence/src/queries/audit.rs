// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use avalia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Row tuple for an audit event, in schema column order minus `created_at`.
type AuditEventRow = (
    i64,
    Option<i64>,
    Option<i64>,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
);

fn event_from_row(row: AuditEventRow) -> AuditEvent {
    let (
        event_id,
        periodo_id,
        avaliacao_id,
        actor_id,
        actor_type,
        cause_id,
        cause_description,
        action_name,
        action_details,
        before_snapshot,
        after_snapshot,
    ) = row;

    let mut event: AuditEvent = AuditEvent::new(
        Actor::new(actor_id, actor_type),
        Cause::new(cause_id, cause_description),
        Action::new(action_name, action_details),
        StateSnapshot::new(before_snapshot),
        StateSnapshot::new(after_snapshot),
        periodo_id,
        avaliacao_id,
    );
    event.event_id = Some(event_id);
    event
}

backend_fn! {

/// Retrieves an audit event by id.
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist.
pub fn get_audit_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select((
            audit_events::event_id,
            audit_events::periodo_id,
            audit_events::avaliacao_id,
            audit_events::actor_id,
            audit_events::actor_type,
            audit_events::cause_id,
            audit_events::cause_description,
            audit_events::action_name,
            audit_events::action_details,
            audit_events::before_snapshot,
            audit_events::after_snapshot,
        ))
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Audit event {event_id} does not exist"))
        })?;
    Ok(event_from_row(row))
}

}

backend_fn! {

/// Lists the audit events scoped to one evaluation, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events_for_evaluation(
    conn: &mut _,
    avaliacao_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::avaliacao_id.eq(avaliacao_id))
        .order(audit_events::event_id.asc())
        .select((
            audit_events::event_id,
            audit_events::periodo_id,
            audit_events::avaliacao_id,
            audit_events::actor_id,
            audit_events::actor_type,
            audit_events::cause_id,
            audit_events::cause_description,
            audit_events::action_name,
            audit_events::action_details,
            audit_events::before_snapshot,
            audit_events::after_snapshot,
        ))
        .load::<AuditEventRow>(conn)?;
    Ok(rows.into_iter().map(event_from_row).collect())
}

}
