// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation-period queries.
//!
//! Calendar comparisons happen directly on the stored ISO 8601 strings;
//! lexicographic order and calendar order coincide for `YYYY-MM-DD`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::cast::ToPrimitive;

use avalia_domain::{EvaluationPeriod, PeriodStatus};

use crate::data_models::PeriodRow;
use crate::diesel_schema::{avaliacoes_desempenho, periodos_avaliacao};
use crate::error::PersistenceError;

/// Converts a stored row into a domain period.
fn period_from_row(row: PeriodRow) -> Result<EvaluationPeriod, PersistenceError> {
    let (
        periodo_id,
        nome,
        descricao,
        ano,
        data_inicio,
        data_fim,
        data_limite_autoavaliacao,
        data_limite_aprovacao,
        status,
        ativo,
        criacao_automatica_executada,
        data_criacao_automatica,
        total_avaliacoes_criadas,
    ) = row;

    let status: PeriodStatus = status.parse()?;

    Ok(EvaluationPeriod {
        periodo_id: Some(periodo_id),
        nome,
        descricao,
        ano,
        data_inicio,
        data_fim,
        data_limite_autoavaliacao,
        data_limite_aprovacao,
        status,
        ativo: ativo != 0,
        criacao_automatica_executada: criacao_automatica_executada != 0,
        data_criacao_automatica,
        total_avaliacoes_criadas,
    })
}

backend_fn! {

/// Retrieves a period by id.
///
/// # Errors
///
/// Returns `NotFound` if the period does not exist.
pub fn get_period(conn: &mut _, periodo_id: i64) -> Result<EvaluationPeriod, PersistenceError> {
    let row: PeriodRow = periodos_avaliacao::table
        .filter(periodos_avaliacao::periodo_id.eq(periodo_id))
        .first::<PeriodRow>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Period {periodo_id} does not exist"))
        })?;
    period_from_row(row)
}

}

backend_fn! {

/// Lists periods, newest end date first.
///
/// # Arguments
///
/// * `only_active` - When true, inactive periods are filtered out
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_periods(
    conn: &mut _,
    only_active: bool,
) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = if only_active {
        periodos_avaliacao::table
            .filter(periodos_avaliacao::ativo.eq(1))
            .order(periodos_avaliacao::data_fim.desc())
            .load::<PeriodRow>(conn)?
    } else {
        periodos_avaliacao::table
            .order(periodos_avaliacao::data_fim.desc())
            .load::<PeriodRow>(conn)?
    };
    rows.into_iter().map(period_from_row).collect()
}

}

backend_fn! {

/// Lists periods due for auto-creation.
///
/// Due means active, not yet executed, and `data_fim <= cutoff`, where the
/// caller computes `cutoff = today + lead days`. Periods far in the past
/// stay due until executed, so a late run never misses one.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_due_periods(
    conn: &mut _,
    cutoff: &str,
) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = periodos_avaliacao::table
        .filter(periodos_avaliacao::ativo.eq(1))
        .filter(periodos_avaliacao::criacao_automatica_executada.eq(0))
        .filter(periodos_avaliacao::data_fim.le(cutoff))
        .order(periodos_avaliacao::data_fim.asc())
        .load::<PeriodRow>(conn)?;
    rows.into_iter().map(period_from_row).collect()
}

}

backend_fn! {

/// Lists active periods whose window contains `today`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_periods(
    conn: &mut _,
    today: &str,
) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = periodos_avaliacao::table
        .filter(periodos_avaliacao::ativo.eq(1))
        .filter(periodos_avaliacao::data_inicio.le(today))
        .filter(periodos_avaliacao::data_fim.ge(today))
        .order(periodos_avaliacao::data_fim.desc())
        .load::<PeriodRow>(conn)?;
    rows.into_iter().map(period_from_row).collect()
}

}

backend_fn! {

/// Lists active periods whose window starts after `today`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_upcoming_periods(
    conn: &mut _,
    today: &str,
) -> Result<Vec<EvaluationPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = periodos_avaliacao::table
        .filter(periodos_avaliacao::ativo.eq(1))
        .filter(periodos_avaliacao::data_inicio.gt(today))
        .order(periodos_avaliacao::data_inicio.asc())
        .load::<PeriodRow>(conn)?;
    rows.into_iter().map(period_from_row).collect()
}

}

backend_fn! {

/// Counts the evaluations referencing a period.
///
/// # Errors
///
/// Returns an error if the query fails or the count does not fit `usize`.
pub fn count_evaluations_for_period(
    conn: &mut _,
    periodo_id: i64,
) -> Result<usize, PersistenceError> {
    let count: i64 = avaliacoes_desempenho::table
        .filter(avaliacoes_desempenho::periodo_id.eq(periodo_id))
        .count()
        .get_result(conn)?;
    count.to_usize().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Invalid evaluation count: {count}"))
    })
}

}
