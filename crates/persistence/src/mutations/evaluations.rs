// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation mutations: the trigger batch and workflow transitions.
//!
//! Both mutations here are transactional and atomic:
//!
//! - The auto-creation batch inserts every evaluation, its initial history
//!   row and the audit event, then claims the period by compare-and-set on
//!   `criacao_automatica_executada`. Losing the claim rolls the whole batch
//!   back, so concurrent invocations create at most one batch and a crash
//!   mid-batch leaves the period re-triggerable.
//! - A workflow transition updates the evaluation row, appends the audit
//!   event and (when the status actually changed) one history row.
//!
//! These functions call other backend-specific functions, so they are
//! written out per backend instead of going through `backend_fn!`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use avalia::TransitionResult;
use avalia_audit::AuditEvent;
use avalia_domain::{Evaluation, EvaluationStatus};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEvaluationRow, NewStatusHistoryRow};
use crate::diesel_schema::{avaliacoes_desempenho, historico_avaliacao, periodos_avaliacao};
use crate::error::PersistenceError;
use crate::mutations::audit::{insert_audit_event_mysql, insert_audit_event_sqlite};

/// Comment recorded on the initial history row of trigger-created evaluations.
const AUTO_CREATION_COMMENT: &str = "Criada pelo gatilho de criação automática";

/// Builds an insertable row from a domain evaluation.
pub(crate) fn new_evaluation_row(evaluation: &Evaluation) -> NewEvaluationRow {
    NewEvaluationRow {
        periodo_id: evaluation.periodo_id,
        funcionario_id: evaluation.funcionario_id,
        avaliador_id: evaluation.avaliador_id,
        status: evaluation.status.as_str().to_string(),
        questao_11_pontos_fortes: evaluation.autoavaliacao.questao_11_pontos_fortes.clone(),
        questao_12_areas_melhoria: evaluation.autoavaliacao.questao_12_areas_melhoria.clone(),
        questao_13_objetivos_alcancados: evaluation
            .autoavaliacao
            .questao_13_objetivos_alcancados
            .clone(),
        questao_14_planos_desenvolvimento: evaluation
            .autoavaliacao
            .questao_14_planos_desenvolvimento
            .clone(),
        questao_15_comentario_avaliador: evaluation
            .aprovacao
            .as_ref()
            .map(|r| r.questao_15_comentario_avaliador.clone()),
        questao_16_nota_lideranca: evaluation
            .aprovacao
            .as_ref()
            .map(|r| i32::from(r.questao_16_nota_lideranca)),
        questao_17_nota_resultados: evaluation
            .aprovacao
            .as_ref()
            .map(|r| i32::from(r.questao_17_nota_resultados)),
        comentario_devolucao: evaluation.comentario_devolucao.clone(),
        data_criacao: evaluation.data_criacao.clone(),
        data_autoavaliacao: evaluation.data_autoavaliacao.clone(),
        data_aprovacao: evaluation.data_aprovacao.clone(),
    }
}

backend_fn! {

/// Inserts a single evaluation row and returns its assigned id.
///
/// Used by the manual admin creation path; the trigger goes through
/// `run_auto_creation_batch` instead.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., the collaborator already has
/// an evaluation for the period).
pub fn insert_evaluation(
    conn: &mut _,
    row: &NewEvaluationRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(avaliacoes_desempenho::table)
        .values(row)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

macro_rules! run_auto_creation_batch_impl {
    ($name:ident, $conn_ty:ty, $insert_audit_event:ident) => {
        /// Creates the evaluation batch for one period and claims the period,
        /// all in a single transaction.
        ///
        /// # Arguments
        ///
        /// * `conn` - The database connection
        /// * `periodo_id` - The period being executed
        /// * `evaluations` - The evaluations to create (status `pendente`)
        /// * `created_by` - The user id recorded on the initial history rows
        /// * `now` - The execution timestamp (RFC 3339)
        /// * `event` - The audit event describing this run
        ///
        /// # Returns
        ///
        /// The ids of the created evaluations, in input order.
        ///
        /// # Errors
        ///
        /// Returns `AutoCreationAlreadyExecuted` (rolling back the batch) if a
        /// concurrent invocation claimed the period first, or a database error
        /// if any insert fails.
        pub fn $name(
            conn: &mut $conn_ty,
            periodo_id: i64,
            evaluations: &[NewEvaluationRow],
            created_by: i64,
            now: &str,
            event: &AuditEvent,
        ) -> Result<Vec<i64>, PersistenceError> {
            conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
                let audit_event_id: i64 = $insert_audit_event(conn, event)?;

                let mut created: Vec<i64> = Vec::with_capacity(evaluations.len());
                for row in evaluations {
                    diesel::insert_into(avaliacoes_desempenho::table)
                        .values(row)
                        .execute(conn)?;
                    let avaliacao_id: i64 = conn.get_last_insert_rowid()?;

                    let history: NewStatusHistoryRow = NewStatusHistoryRow {
                        avaliacao_id,
                        audit_event_id: Some(audit_event_id),
                        status_anterior: None,
                        status_novo: row.status.clone(),
                        transicionado_em: now.to_string(),
                        transicionado_por: created_by,
                        comentario: Some(AUTO_CREATION_COMMENT.to_string()),
                    };
                    diesel::insert_into(historico_avaliacao::table)
                        .values(&history)
                        .execute(conn)?;

                    created.push(avaliacao_id);
                }

                // Claim the period. Zero rows means a concurrent run already
                // executed it; abort so nothing from this batch survives.
                let total: i32 = i32::try_from(created.len()).unwrap_or(i32::MAX);
                let claimed: usize = diesel::update(
                    periodos_avaliacao::table
                        .filter(periodos_avaliacao::periodo_id.eq(periodo_id))
                        .filter(periodos_avaliacao::criacao_automatica_executada.eq(0)),
                )
                .set((
                    periodos_avaliacao::criacao_automatica_executada.eq(1),
                    periodos_avaliacao::data_criacao_automatica.eq(Some(now.to_string())),
                    periodos_avaliacao::total_avaliacoes_criadas.eq(total),
                ))
                .execute(conn)?;

                if claimed == 0 {
                    return Err(PersistenceError::AutoCreationAlreadyExecuted { periodo_id });
                }

                info!(
                    periodo_id,
                    total_avaliacoes_criadas = total,
                    "Auto-creation batch committed"
                );
                Ok(created)
            })
        }
    };
}

run_auto_creation_batch_impl!(
    run_auto_creation_batch_sqlite,
    SqliteConnection,
    insert_audit_event_sqlite
);
run_auto_creation_batch_impl!(
    run_auto_creation_batch_mysql,
    MysqlConnection,
    insert_audit_event_mysql
);

macro_rules! persist_transition_impl {
    ($name:ident, $conn_ty:ty, $insert_audit_event:ident) => {
        /// Persists a workflow transition: the updated evaluation row, the
        /// audit event, and one history row when the status changed.
        ///
        /// # Arguments
        ///
        /// * `conn` - The database connection
        /// * `result` - The transition result produced by the core engine
        /// * `previous_status` - The status before the transition
        /// * `caller` - The user id recorded on the history row
        /// * `now` - The transition timestamp (RFC 3339)
        ///
        /// # Returns
        ///
        /// The id of the persisted audit event.
        ///
        /// # Errors
        ///
        /// Returns an error if the evaluation has no id, does not exist, or
        /// the database write fails.
        pub fn $name(
            conn: &mut $conn_ty,
            result: &TransitionResult,
            previous_status: &str,
            caller: i64,
            now: &str,
        ) -> Result<i64, PersistenceError> {
            let evaluation: &Evaluation = &result.new_evaluation;
            let avaliacao_id: i64 = evaluation.avaliacao_id.ok_or_else(|| {
                PersistenceError::Other(String::from(
                    "Evaluation must have an id to persist a transition",
                ))
            })?;
            let row: NewEvaluationRow = new_evaluation_row(evaluation);

            conn.transaction::<i64, PersistenceError, _>(|conn| {
                let audit_event_id: i64 = $insert_audit_event(conn, &result.audit_event)?;

                let updated: usize = diesel::update(
                    avaliacoes_desempenho::table
                        .filter(avaliacoes_desempenho::avaliacao_id.eq(avaliacao_id)),
                )
                .set((
                    avaliacoes_desempenho::avaliador_id.eq(row.avaliador_id),
                    avaliacoes_desempenho::status.eq(&row.status),
                    avaliacoes_desempenho::questao_11_pontos_fortes
                        .eq(row.questao_11_pontos_fortes.as_deref()),
                    avaliacoes_desempenho::questao_12_areas_melhoria
                        .eq(row.questao_12_areas_melhoria.as_deref()),
                    avaliacoes_desempenho::questao_13_objetivos_alcancados
                        .eq(row.questao_13_objetivos_alcancados.as_deref()),
                    avaliacoes_desempenho::questao_14_planos_desenvolvimento
                        .eq(row.questao_14_planos_desenvolvimento.as_deref()),
                    avaliacoes_desempenho::questao_15_comentario_avaliador
                        .eq(row.questao_15_comentario_avaliador.as_deref()),
                    avaliacoes_desempenho::questao_16_nota_lideranca
                        .eq(row.questao_16_nota_lideranca),
                    avaliacoes_desempenho::questao_17_nota_resultados
                        .eq(row.questao_17_nota_resultados),
                    avaliacoes_desempenho::comentario_devolucao
                        .eq(row.comentario_devolucao.as_deref()),
                    avaliacoes_desempenho::data_autoavaliacao
                        .eq(row.data_autoavaliacao.as_deref()),
                    avaliacoes_desempenho::data_aprovacao.eq(row.data_aprovacao.as_deref()),
                ))
                .execute(conn)?;

                if updated == 0 {
                    return Err(PersistenceError::NotFound(format!(
                        "Evaluation {avaliacao_id} does not exist"
                    )));
                }

                if previous_status != evaluation.status.as_str() {
                    // The return feedback rides on the row that recorded the
                    // return, not on later resubmissions.
                    let comentario: Option<String> =
                        if evaluation.status == EvaluationStatus::Devolvida {
                            evaluation.comentario_devolucao.clone()
                        } else {
                            None
                        };
                    let history: NewStatusHistoryRow = NewStatusHistoryRow {
                        avaliacao_id,
                        audit_event_id: Some(audit_event_id),
                        status_anterior: Some(previous_status.to_string()),
                        status_novo: evaluation.status.as_str().to_string(),
                        transicionado_em: now.to_string(),
                        transicionado_por: caller,
                        comentario,
                    };
                    diesel::insert_into(historico_avaliacao::table)
                        .values(&history)
                        .execute(conn)?;
                }

                Ok(audit_event_id)
            })
        }
    };
}

persist_transition_impl!(
    persist_transition_sqlite,
    SqliteConnection,
    insert_audit_event_sqlite
);
persist_transition_impl!(
    persist_transition_mysql,
    MysqlConnection,
    insert_audit_event_mysql
);
