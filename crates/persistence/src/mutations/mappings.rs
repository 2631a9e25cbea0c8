// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manager-mapping mutations.
//!
//! A collaborator has at most one mapping row, enforced by a UNIQUE index
//! on `colaborador_id`. Saving a mapping is an update-then-insert so the
//! same code works on both backends; rows are never hard-deleted, only
//! reassigned or deactivated.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::gerentes_avaliacao;
use crate::error::PersistenceError;

backend_fn! {

/// Saves (upserts) the mapping for a collaborator.
///
/// The non-reflexive invariant is validated by the caller before this is
/// reached; the schema CHECK constraint is the backstop.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn set_mapping(
    conn: &mut _,
    colaborador_id: i64,
    gerente_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        gerentes_avaliacao::table
            .filter(gerentes_avaliacao::colaborador_id.eq(colaborador_id)),
    )
    .set((
        gerentes_avaliacao::gerente_id.eq(gerente_id),
        gerentes_avaliacao::ativo.eq(1),
        gerentes_avaliacao::updated_at.eq(now),
    ))
    .execute(conn)?;

    if updated == 0 {
        diesel::insert_into(gerentes_avaliacao::table)
            .values((
                gerentes_avaliacao::colaborador_id.eq(colaborador_id),
                gerentes_avaliacao::gerente_id.eq(gerente_id),
                gerentes_avaliacao::ativo.eq(1),
                gerentes_avaliacao::created_at.eq(now),
                gerentes_avaliacao::updated_at.eq(now),
            ))
            .execute(conn)?;
    }

    info!(colaborador_id, gerente_id, "Saved manager mapping");
    Ok(())
}

}

backend_fn! {

/// Deactivates the mapping for a collaborator without removing it.
///
/// # Errors
///
/// Returns `NotFound` if the collaborator has no mapping row.
pub fn deactivate_mapping(
    conn: &mut _,
    colaborador_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        gerentes_avaliacao::table
            .filter(gerentes_avaliacao::colaborador_id.eq(colaborador_id)),
    )
    .set((
        gerentes_avaliacao::ativo.eq(0),
        gerentes_avaliacao::updated_at.eq(now),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No manager mapping for collaborator {colaborador_id}"
        )));
    }

    info!(colaborador_id, "Deactivated manager mapping");
    Ok(())
}

}
