// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manager-mapping queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use avalia_domain::ManagerMapping;

use crate::diesel_schema::gerentes_avaliacao;
use crate::error::PersistenceError;

backend_fn! {

/// Returns the active manager for a collaborator, if one is assigned.
///
/// Deactivated mappings are invisible here; the trigger and the reassign
/// path both resolve through this function.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_active_mapping(
    conn: &mut _,
    colaborador_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let gerente: Option<i64> = gerentes_avaliacao::table
        .filter(gerentes_avaliacao::colaborador_id.eq(colaborador_id))
        .filter(gerentes_avaliacao::ativo.eq(1))
        .select(gerentes_avaliacao::gerente_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(gerente)
}

}

backend_fn! {

/// Lists every mapping row, active and inactive.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_mappings(conn: &mut _) -> Result<Vec<ManagerMapping>, PersistenceError> {
    let rows = gerentes_avaliacao::table
        .order(gerentes_avaliacao::colaborador_id.asc())
        .select((
            gerentes_avaliacao::mapeamento_id,
            gerentes_avaliacao::colaborador_id,
            gerentes_avaliacao::gerente_id,
            gerentes_avaliacao::ativo,
        ))
        .load::<(i64, i64, i64, i32)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(mapeamento_id, colaborador_id, gerente_id, ativo)| {
            ManagerMapping::with_id(mapeamento_id, colaborador_id, gerente_id, ativo != 0)
        })
        .collect())
}

}
