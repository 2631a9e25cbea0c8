// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Field names follow the persisted/wire contract of the surrounding
//! portal (`colaborador_id`, `data_fim`, `periodo_id`, ...).

use serde::{Deserialize, Serialize};

use avalia_domain::{
    DirectoryUser, Evaluation, EvaluationPeriod, ManagerMapping, ManagerReview,
    SelfAssessmentDraft,
};
use avalia_persistence::StatusHistoryEntry;

// ============================================================================
// Manager mappings
// ============================================================================

/// Request to assign a manager to a collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMappingRequest {
    /// The collaborator being evaluated.
    pub colaborador_id: i64,
    /// The evaluating manager.
    pub gerente_id: i64,
}

/// One collaborator/manager pair within a bulk save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingPair {
    pub colaborador_id: i64,
    pub gerente_id: i64,
}

/// Request to save several mappings at once.
///
/// Pairs are applied independently; one failure does not abort the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSetMappingsRequest {
    pub mapeamentos: Vec<MappingPair>,
}

/// A mapping row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingInfo {
    pub colaborador_id: i64,
    pub gerente_id: i64,
    pub ativo: bool,
}

impl From<&ManagerMapping> for MappingInfo {
    fn from(mapping: &ManagerMapping) -> Self {
        Self {
            colaborador_id: mapping.colaborador_id,
            gerente_id: mapping.gerente_id,
            ativo: mapping.ativo,
        }
    }
}

/// Response for a single mapping save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMappingResponse {
    pub colaborador_id: i64,
    pub gerente_id: i64,
    pub message: String,
}

/// One failed pair of a bulk save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingFailure {
    pub colaborador_id: i64,
    pub motivo: String,
}

/// Response for a bulk mapping save: partial success is reported per item,
/// mirroring the admin panel's "N salvos, M com erro".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSetMappingsResponse {
    pub salvos: usize,
    pub com_erro: usize,
    pub falhas: Vec<MappingFailure>,
    pub message: String,
}

/// Response for listing mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMappingsResponse {
    pub mapeamentos: Vec<MappingInfo>,
}

/// Response for deactivating a mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateMappingResponse {
    pub colaborador_id: i64,
    pub message: String,
}

// ============================================================================
// Evaluation periods
// ============================================================================

/// Request to create a period.
///
/// `data_inicio` may be omitted; it defaults to two weeks before
/// `data_fim`, matching the admin form's suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePeriodRequest {
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub ano: i32,
    #[serde(default)]
    pub data_inicio: Option<String>,
    pub data_fim: String,
    pub data_limite_autoavaliacao: String,
    pub data_limite_aprovacao: String,
}

/// Request to update a period. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePeriodRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub data_inicio: Option<String>,
    #[serde(default)]
    pub data_fim: Option<String>,
    #[serde(default)]
    pub data_limite_autoavaliacao: Option<String>,
    #[serde(default)]
    pub data_limite_aprovacao: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ativo: Option<bool>,
}

/// A period, as presented to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub periodo_id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub ano: i32,
    pub data_inicio: String,
    pub data_fim: String,
    pub data_limite_autoavaliacao: String,
    pub data_limite_aprovacao: String,
    pub status: String,
    pub ativo: bool,
    pub criacao_automatica_executada: bool,
    pub data_criacao_automatica: Option<String>,
    pub total_avaliacoes_criadas: i32,
}

impl PeriodInfo {
    /// Builds the client view of a persisted period.
    #[must_use]
    pub fn from_period(period: &EvaluationPeriod) -> Self {
        Self {
            periodo_id: period.periodo_id.unwrap_or_default(),
            nome: period.nome.clone(),
            descricao: period.descricao.clone(),
            ano: period.ano,
            data_inicio: period.data_inicio.clone(),
            data_fim: period.data_fim.clone(),
            data_limite_autoavaliacao: period.data_limite_autoavaliacao.clone(),
            data_limite_aprovacao: period.data_limite_aprovacao.clone(),
            status: period.status.as_str().to_string(),
            ativo: period.ativo,
            criacao_automatica_executada: period.criacao_automatica_executada,
            data_criacao_automatica: period.data_criacao_automatica.clone(),
            total_avaliacoes_criadas: period.total_avaliacoes_criadas,
        }
    }
}

/// Response for creating a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePeriodResponse {
    pub periodo: PeriodInfo,
    pub message: String,
}

/// Response for updating a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePeriodResponse {
    pub periodo: PeriodInfo,
    pub message: String,
}

/// Response for deleting a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePeriodResponse {
    pub periodo_id: i64,
    pub message: String,
}

/// Response for listing periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPeriodsResponse {
    pub periodos: Vec<PeriodInfo>,
}

/// A period paired with the caller's evaluation in it, if one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodWithEvaluationInfo {
    pub periodo: PeriodInfo,
    pub avaliacao_id: Option<i64>,
}

/// Response for the per-user active/upcoming period listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPeriodsForUserResponse {
    pub periodos: Vec<PeriodWithEvaluationInfo>,
}

// ============================================================================
// Auto-creation trigger
// ============================================================================

/// Per-period outcome of an auto-creation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoCreationPeriodResult {
    pub periodo_id: i64,
    pub nome: String,
    /// How many directory users were eligible.
    pub usuarios_elegiveis: usize,
    /// How many evaluations were created.
    pub avaliacoes_criadas: usize,
    /// Eligible collaborators skipped for lack of a manager mapping.
    pub sem_gerente: usize,
    /// Eligible collaborators that already had an evaluation.
    pub ja_existentes: usize,
    /// Whether this run claimed the period (false when a concurrent run
    /// claimed it first).
    pub executado: bool,
}

/// Response for an auto-creation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoCreationRunResponse {
    pub periodos_processados: usize,
    pub total_avaliacoes_criadas: usize,
    pub resultados: Vec<AutoCreationPeriodResult>,
    pub message: String,
}

// ============================================================================
// Evaluations
// ============================================================================

/// An evaluation, as presented to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInfo {
    pub avaliacao_id: i64,
    pub periodo_id: i64,
    pub funcionario_id: i64,
    pub avaliador_id: i64,
    pub status: String,
    pub autoavaliacao: SelfAssessmentDraft,
    pub aprovacao: Option<ManagerReview>,
    pub comentario_devolucao: Option<String>,
    pub data_criacao: String,
    pub data_autoavaliacao: Option<String>,
    pub data_aprovacao: Option<String>,
}

impl EvaluationInfo {
    /// Builds the client view of a persisted evaluation.
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            avaliacao_id: evaluation.avaliacao_id.unwrap_or_default(),
            periodo_id: evaluation.periodo_id,
            funcionario_id: evaluation.funcionario_id,
            avaliador_id: evaluation.avaliador_id,
            status: evaluation.status.as_str().to_string(),
            autoavaliacao: evaluation.autoavaliacao.clone(),
            aprovacao: evaluation.aprovacao.clone(),
            comentario_devolucao: evaluation.comentario_devolucao.clone(),
            data_criacao: evaluation.data_criacao.clone(),
            data_autoavaliacao: evaluation.data_autoavaliacao.clone(),
            data_aprovacao: evaluation.data_aprovacao.clone(),
        }
    }
}

/// Request to review a submitted self-assessment.
///
/// `decision` is `approve` or `return`. Approving requires the Q15-Q17
/// fields; returning requires `comentario_devolucao`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitManagerReviewRequest {
    pub decision: String,
    #[serde(default)]
    pub questao_15_comentario_avaliador: Option<String>,
    #[serde(default)]
    pub questao_16_nota_lideranca: Option<u8>,
    #[serde(default)]
    pub questao_17_nota_resultados: Option<u8>,
    #[serde(default)]
    pub comentario_devolucao: Option<String>,
}

/// Response for a workflow transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub avaliacao: EvaluationInfo,
    /// The id of the audit event recording this transition.
    pub event_id: i64,
    pub message: String,
}

/// Response for evaluation listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEvaluationsResponse {
    pub avaliacoes: Vec<EvaluationInfo>,
}

/// One status transition of an evaluation's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryInfo {
    pub status_anterior: Option<String>,
    pub status_novo: String,
    pub transicionado_em: String,
    pub transicionado_por: i64,
    pub comentario: Option<String>,
}

impl From<&StatusHistoryEntry> for StatusHistoryInfo {
    fn from(entry: &StatusHistoryEntry) -> Self {
        Self {
            status_anterior: entry.status_anterior.clone(),
            status_novo: entry.status_novo.clone(),
            transicionado_em: entry.transicionado_em.clone(),
            transicionado_por: entry.transicionado_por,
            comentario: entry.comentario.clone(),
        }
    }
}

/// Response for an evaluation's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryResponse {
    pub avaliacao_id: i64,
    pub historico: Vec<StatusHistoryInfo>,
}

// ============================================================================
// Directory mirror
// ============================================================================

/// Request to register a user in the directory mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub role: String,
    pub is_authorized: bool,
    pub active: bool,
}

/// A directory user, as presented to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub department: Option<String>,
    pub role: String,
    pub is_authorized: bool,
    pub active: bool,
}

impl From<&DirectoryUser> for UserInfo {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            user_id: user.user_id.unwrap_or_default(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            position: user.position.clone(),
            department: user.department.clone(),
            role: user.role.clone(),
            is_authorized: user.is_authorized,
            active: user.active,
        }
    }
}

/// Response for registering a directory user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user_id: i64,
    pub message: String,
}

/// Response for listing directory users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub usuarios: Vec<UserInfo>,
}
