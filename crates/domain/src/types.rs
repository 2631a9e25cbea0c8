// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::answers::{ManagerReview, SelfAssessmentDraft};
use crate::status::{EvaluationStatus, PeriodStatus};
use serde::{Deserialize, Serialize};

/// An active assignment of an evaluating manager to a collaborator.
///
/// At most one active mapping exists per collaborator; a new assignment
/// replaces the previous one. Mappings are never hard-deleted, only
/// reassigned or deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerMapping {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the mapping has not been persisted yet.
    pub mapeamento_id: Option<i64>,
    /// The collaborator being evaluated.
    pub colaborador_id: i64,
    /// The manager responsible for the review.
    pub gerente_id: i64,
    /// Whether the mapping is currently active.
    pub ativo: bool,
}

impl ManagerMapping {
    /// Creates a new active mapping without a persisted ID.
    #[must_use]
    pub const fn new(colaborador_id: i64, gerente_id: i64) -> Self {
        Self {
            mapeamento_id: None,
            colaborador_id,
            gerente_id,
            ativo: true,
        }
    }

    /// Creates a mapping with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        mapeamento_id: i64,
        colaborador_id: i64,
        gerente_id: i64,
        ativo: bool,
    ) -> Self {
        Self {
            mapeamento_id: Some(mapeamento_id),
            colaborador_id,
            gerente_id,
            ativo,
        }
    }
}

/// A named evaluation cycle with a time window and two internal deadlines.
///
/// Calendar fields are ISO 8601 date strings (`YYYY-MM-DD`); they are parsed
/// only where rules need calendar arithmetic. `data_inicio` is suggested as
/// `data_fim` minus fourteen days but remains editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPeriod {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the period has not been persisted yet.
    pub periodo_id: Option<i64>,
    /// Display name of the cycle (e.g., "Avaliação 2026/1").
    pub nome: String,
    /// Optional free-form description.
    pub descricao: Option<String>,
    /// The calendar year the cycle belongs to.
    pub ano: i32,
    /// Start of the window.
    pub data_inicio: String,
    /// End of the window.
    pub data_fim: String,
    /// Deadline for collaborators to submit the self-assessment.
    pub data_limite_autoavaliacao: String,
    /// Deadline for managers to approve.
    pub data_limite_aprovacao: String,
    /// Lifecycle status of the period itself.
    pub status: PeriodStatus,
    /// Whether the period participates in listings and the trigger.
    pub ativo: bool,
    /// Whether the auto-creation trigger has already run for this period.
    /// Flips exactly once, transactionally with the evaluation batch.
    pub criacao_automatica_executada: bool,
    /// When the trigger ran (RFC 3339), if it has.
    pub data_criacao_automatica: Option<String>,
    /// How many evaluations the trigger created.
    pub total_avaliacoes_criadas: i32,
}

impl EvaluationPeriod {
    /// Creates a new period in its default state: `planejado`, active, not
    /// yet executed by the trigger.
    #[must_use]
    pub const fn new(
        nome: String,
        descricao: Option<String>,
        ano: i32,
        data_inicio: String,
        data_fim: String,
        data_limite_autoavaliacao: String,
        data_limite_aprovacao: String,
    ) -> Self {
        Self {
            periodo_id: None,
            nome,
            descricao,
            ano,
            data_inicio,
            data_fim,
            data_limite_autoavaliacao,
            data_limite_aprovacao,
            status: PeriodStatus::Planejado,
            ativo: true,
            criacao_automatica_executada: false,
            data_criacao_automatica: None,
            total_avaliacoes_criadas: 0,
        }
    }
}

/// A single evaluation of one collaborator within one period.
///
/// `avaliador_id` is resolved from the manager mapping when the evaluation
/// is created and is a snapshot: reassigning the mapping later does not move
/// in-flight evaluations. Evaluations are never deleted, only transitioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Canonical identifier assigned by the database.
    pub avaliacao_id: Option<i64>,
    /// The period this evaluation belongs to.
    pub periodo_id: i64,
    /// The collaborator being evaluated.
    pub funcionario_id: i64,
    /// The manager responsible for the review (snapshot at creation time).
    pub avaliador_id: i64,
    /// Workflow status.
    pub status: EvaluationStatus,
    /// Self-assessment answers (Q11-Q14); partial until submitted.
    pub autoavaliacao: SelfAssessmentDraft,
    /// Manager review answers (Q15-Q17), present once approved.
    pub aprovacao: Option<ManagerReview>,
    /// Feedback recorded when the manager returned the evaluation.
    pub comentario_devolucao: Option<String>,
    /// When the evaluation was created (RFC 3339).
    pub data_criacao: String,
    /// When the self-assessment was submitted, if it has been.
    pub data_autoavaliacao: Option<String>,
    /// When the manager approved, if they have.
    pub data_aprovacao: Option<String>,
}

impl Evaluation {
    /// Creates a new pending evaluation.
    #[must_use]
    pub const fn new(
        periodo_id: i64,
        funcionario_id: i64,
        avaliador_id: i64,
        data_criacao: String,
    ) -> Self {
        Self {
            avaliacao_id: None,
            periodo_id,
            funcionario_id,
            avaliador_id,
            status: EvaluationStatus::Pendente,
            autoavaliacao: SelfAssessmentDraft {
                questao_11_pontos_fortes: None,
                questao_12_areas_melhoria: None,
                questao_13_objetivos_alcancados: None,
                questao_14_planos_desenvolvimento: None,
            },
            aprovacao: None,
            comentario_devolucao: None,
            data_criacao,
            data_autoavaliacao: None,
            data_aprovacao: None,
        }
    }
}

/// A user record from the directory mirror.
///
/// The broader user directory is an external collaborator; this is the
/// snapshot shape the evaluation core consumes. The trigger's eligible set
/// is every user with `is_authorized && active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Canonical identifier assigned by the database.
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub department: Option<String>,
    /// Portal role string (`ADMIN`, `MANAGER`, `USER`).
    pub role: String,
    /// Whether the user has been authorized into the portal.
    pub is_authorized: bool,
    /// Whether the user is currently active.
    pub active: bool,
}
