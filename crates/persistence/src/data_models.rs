// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::diesel_schema::{avaliacoes_desempenho, historico_avaliacao};

/// Insertable evaluation row.
///
/// Built from a domain `Evaluation` by the trigger batch and by single
/// inserts; the database assigns `avaliacao_id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = avaliacoes_desempenho)]
pub struct NewEvaluationRow {
    pub periodo_id: i64,
    pub funcionario_id: i64,
    pub avaliador_id: i64,
    pub status: String,
    pub questao_11_pontos_fortes: Option<String>,
    pub questao_12_areas_melhoria: Option<String>,
    pub questao_13_objetivos_alcancados: Option<String>,
    pub questao_14_planos_desenvolvimento: Option<String>,
    pub questao_15_comentario_avaliador: Option<String>,
    pub questao_16_nota_lideranca: Option<i32>,
    pub questao_17_nota_resultados: Option<i32>,
    pub comentario_devolucao: Option<String>,
    pub data_criacao: String,
    pub data_autoavaliacao: Option<String>,
    pub data_aprovacao: Option<String>,
}

/// Insertable status history row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = historico_avaliacao)]
pub struct NewStatusHistoryRow {
    pub avaliacao_id: i64,
    pub audit_event_id: Option<i64>,
    pub status_anterior: Option<String>,
    pub status_novo: String,
    pub transicionado_em: String,
    pub transicionado_por: i64,
    pub comentario: Option<String>,
}

/// One entry of an evaluation's status transition history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    pub historico_id: i64,
    pub avaliacao_id: i64,
    pub audit_event_id: Option<i64>,
    pub status_anterior: Option<String>,
    pub status_novo: String,
    pub transicionado_em: String,
    pub transicionado_por: i64,
    pub comentario: Option<String>,
}

/// Row tuple for a full evaluation record, in schema column order.
pub type EvaluationRow = (
    i64,
    i64,
    i64,
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i32>,
    Option<i32>,
    Option<String>,
    String,
    Option<String>,
    Option<String>,
);

/// Row tuple for a full period record, in schema column order.
pub type PeriodRow = (
    i64,
    String,
    Option<String>,
    i32,
    String,
    String,
    String,
    String,
    String,
    i32,
    i32,
    Option<String>,
    i32,
);
