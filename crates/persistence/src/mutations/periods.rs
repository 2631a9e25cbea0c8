// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation-period mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use avalia_domain::EvaluationPeriod;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{avaliacoes_desempenho, periodos_avaliacao};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts a new period and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_period(
    conn: &mut _,
    period: &EvaluationPeriod,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(periodos_avaliacao::table)
        .values((
            periodos_avaliacao::nome.eq(&period.nome),
            periodos_avaliacao::descricao.eq(period.descricao.as_deref()),
            periodos_avaliacao::ano.eq(period.ano),
            periodos_avaliacao::data_inicio.eq(&period.data_inicio),
            periodos_avaliacao::data_fim.eq(&period.data_fim),
            periodos_avaliacao::data_limite_autoavaliacao.eq(&period.data_limite_autoavaliacao),
            periodos_avaliacao::data_limite_aprovacao.eq(&period.data_limite_aprovacao),
            periodos_avaliacao::status.eq(period.status.as_str()),
            periodos_avaliacao::ativo.eq(i32::from(period.ativo)),
            periodos_avaliacao::criacao_automatica_executada
                .eq(i32::from(period.criacao_automatica_executada)),
            periodos_avaliacao::data_criacao_automatica
                .eq(period.data_criacao_automatica.as_deref()),
            periodos_avaliacao::total_avaliacoes_criadas.eq(period.total_avaliacoes_criadas),
        ))
        .execute(conn)?;

    let periodo_id: i64 = conn.get_last_insert_rowid()?;
    info!(periodo_id, nome = %period.nome, "Created evaluation period");
    Ok(periodo_id)
}

}

backend_fn! {

/// Updates an existing period's editable fields.
///
/// The auto-creation bookkeeping columns are deliberately not touched here;
/// they change only through the trigger's claim.
///
/// # Errors
///
/// Returns `NotFound` if the period does not exist.
pub fn update_period(
    conn: &mut _,
    periodo_id: i64,
    period: &EvaluationPeriod,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        periodos_avaliacao::table.filter(periodos_avaliacao::periodo_id.eq(periodo_id)),
    )
    .set((
        periodos_avaliacao::nome.eq(&period.nome),
        periodos_avaliacao::descricao.eq(period.descricao.as_deref()),
        periodos_avaliacao::ano.eq(period.ano),
        periodos_avaliacao::data_inicio.eq(&period.data_inicio),
        periodos_avaliacao::data_fim.eq(&period.data_fim),
        periodos_avaliacao::data_limite_autoavaliacao.eq(&period.data_limite_autoavaliacao),
        periodos_avaliacao::data_limite_aprovacao.eq(&period.data_limite_aprovacao),
        periodos_avaliacao::status.eq(period.status.as_str()),
        periodos_avaliacao::ativo.eq(i32::from(period.ativo)),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Period {periodo_id} does not exist"
        )));
    }
    Ok(())
}

}

backend_fn! {

/// Hard-deletes a period.
///
/// Deletion is blocked while evaluations reference the period; already
/// created evaluations must never be orphaned.
///
/// # Errors
///
/// Returns `PeriodHasEvaluations` if evaluations reference the period, or
/// `NotFound` if it does not exist.
pub fn delete_period(conn: &mut _, periodo_id: i64) -> Result<(), PersistenceError> {
    let count: i64 = avaliacoes_desempenho::table
        .filter(avaliacoes_desempenho::periodo_id.eq(periodo_id))
        .count()
        .get_result(conn)?;

    if count > 0 {
        return Err(PersistenceError::PeriodHasEvaluations {
            periodo_id,
            count: usize::try_from(count).unwrap_or(usize::MAX),
        });
    }

    let deleted: usize = diesel::delete(
        periodos_avaliacao::table.filter(periodos_avaliacao::periodo_id.eq(periodo_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Period {periodo_id} does not exist"
        )));
    }

    info!(periodo_id, "Deleted evaluation period");
    Ok(())
}

}
