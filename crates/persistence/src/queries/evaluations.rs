// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation and status-history queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::cast::ToPrimitive;

use avalia_domain::{Evaluation, EvaluationStatus, ManagerReview, SelfAssessmentDraft};

use crate::data_models::{EvaluationRow, StatusHistoryEntry};
use crate::diesel_schema::{avaliacoes_desempenho, historico_avaliacao};
use crate::error::PersistenceError;

/// Converts a stored row into a domain evaluation.
///
/// The manager review is reconstructed only when all three Q15-Q17 columns
/// are present; a partially stored review would be a data fault.
fn evaluation_from_row(row: EvaluationRow) -> Result<Evaluation, PersistenceError> {
    let (
        avaliacao_id,
        periodo_id,
        funcionario_id,
        avaliador_id,
        status,
        questao_11_pontos_fortes,
        questao_12_areas_melhoria,
        questao_13_objetivos_alcancados,
        questao_14_planos_desenvolvimento,
        questao_15_comentario_avaliador,
        questao_16_nota_lideranca,
        questao_17_nota_resultados,
        comentario_devolucao,
        data_criacao,
        data_autoavaliacao,
        data_aprovacao,
    ) = row;

    let status: EvaluationStatus = status.parse()?;

    let aprovacao: Option<ManagerReview> = match (
        questao_15_comentario_avaliador,
        questao_16_nota_lideranca,
        questao_17_nota_resultados,
    ) {
        (Some(comentario), Some(lideranca), Some(resultados)) => Some(ManagerReview {
            questao_15_comentario_avaliador: comentario,
            questao_16_nota_lideranca: lideranca.to_u8().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "Invalid stored score for questao_16_nota_lideranca: {lideranca}"
                ))
            })?,
            questao_17_nota_resultados: resultados.to_u8().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "Invalid stored score for questao_17_nota_resultados: {resultados}"
                ))
            })?,
        }),
        _ => None,
    };

    Ok(Evaluation {
        avaliacao_id: Some(avaliacao_id),
        periodo_id,
        funcionario_id,
        avaliador_id,
        status,
        autoavaliacao: SelfAssessmentDraft {
            questao_11_pontos_fortes,
            questao_12_areas_melhoria,
            questao_13_objetivos_alcancados,
            questao_14_planos_desenvolvimento,
        },
        aprovacao,
        comentario_devolucao,
        data_criacao,
        data_autoavaliacao,
        data_aprovacao,
    })
}

backend_fn! {

/// Retrieves an evaluation by id.
///
/// # Errors
///
/// Returns `NotFound` if the evaluation does not exist.
pub fn get_evaluation(
    conn: &mut _,
    avaliacao_id: i64,
) -> Result<Evaluation, PersistenceError> {
    let row: EvaluationRow = avaliacoes_desempenho::table
        .filter(avaliacoes_desempenho::avaliacao_id.eq(avaliacao_id))
        .first::<EvaluationRow>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Evaluation {avaliacao_id} does not exist"))
        })?;
    evaluation_from_row(row)
}

}

backend_fn! {

/// Returns the id of a collaborator's evaluation within a period, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn evaluation_id_for(
    conn: &mut _,
    funcionario_id: i64,
    periodo_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let id: Option<i64> = avaliacoes_desempenho::table
        .filter(avaliacoes_desempenho::funcionario_id.eq(funcionario_id))
        .filter(avaliacoes_desempenho::periodo_id.eq(periodo_id))
        .select(avaliacoes_desempenho::avaliacao_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(id)
}

}

backend_fn! {

/// Lists every evaluation where the user is subject or evaluator, newest
/// first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_evaluations_for_user(
    conn: &mut _,
    user_id: i64,
) -> Result<Vec<Evaluation>, PersistenceError> {
    let rows: Vec<EvaluationRow> = avaliacoes_desempenho::table
        .filter(
            avaliacoes_desempenho::funcionario_id
                .eq(user_id)
                .or(avaliacoes_desempenho::avaliador_id.eq(user_id)),
        )
        .order(avaliacoes_desempenho::avaliacao_id.desc())
        .load::<EvaluationRow>(conn)?;
    rows.into_iter().map(evaluation_from_row).collect()
}

}

backend_fn! {

/// Lists evaluations awaiting a given manager's review.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_pending_reviews(
    conn: &mut _,
    avaliador_id: i64,
) -> Result<Vec<Evaluation>, PersistenceError> {
    let rows: Vec<EvaluationRow> = avaliacoes_desempenho::table
        .filter(avaliacoes_desempenho::avaliador_id.eq(avaliador_id))
        .filter(avaliacoes_desempenho::status.eq("aguardando_aprovacao"))
        .order(avaliacoes_desempenho::avaliacao_id.asc())
        .load::<EvaluationRow>(conn)?;
    rows.into_iter().map(evaluation_from_row).collect()
}

}

backend_fn! {

/// Lists an evaluation's status transition history in order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_status_history(
    conn: &mut _,
    avaliacao_id: i64,
) -> Result<Vec<StatusHistoryEntry>, PersistenceError> {
    let rows = historico_avaliacao::table
        .filter(historico_avaliacao::avaliacao_id.eq(avaliacao_id))
        .order(historico_avaliacao::historico_id.asc())
        .load::<(
            i64,
            i64,
            Option<i64>,
            Option<String>,
            String,
            String,
            i64,
            Option<String>,
        )>(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                historico_id,
                avaliacao_id,
                audit_event_id,
                status_anterior,
                status_novo,
                transicionado_em,
                transicionado_por,
                comentario,
            )| StatusHistoryEntry {
                historico_id,
                avaliacao_id,
                audit_event_id,
                status_anterior,
                status_novo,
                transicionado_em,
                transicionado_por,
                comentario,
            },
        )
        .collect())
}

}
