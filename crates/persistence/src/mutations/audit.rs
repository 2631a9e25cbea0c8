// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutations.
//!
//! Audit events are append-only; there is no update or delete path.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use avalia_audit::AuditEvent;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

backend_fn! {

/// Persists an audit event and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_audit_event(
    conn: &mut _,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(audit_events::table)
        .values((
            audit_events::periodo_id.eq(event.periodo_id),
            audit_events::avaliacao_id.eq(event.avaliacao_id),
            audit_events::actor_id.eq(&event.actor.id),
            audit_events::actor_type.eq(&event.actor.actor_type),
            audit_events::cause_id.eq(&event.cause.id),
            audit_events::cause_description.eq(&event.cause.description),
            audit_events::action_name.eq(&event.action.name),
            audit_events::action_details.eq(event.action.details.as_deref()),
            audit_events::before_snapshot.eq(&event.before.data),
            audit_events::after_snapshot.eq(&event.after.data),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

}
