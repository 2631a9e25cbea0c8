// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same order: authorize the
//! caller, validate the request, apply the change (through the core engine
//! for workflow transitions), persist, and record the audit event.

use time::{Date, Duration, OffsetDateTime};
use tracing::{info, warn};

use avalia::{Command, TransitionResult, apply};
use avalia_audit::{Action, AuditEvent, Cause, StateSnapshot};
use avalia_domain::{
    AUTO_CREATION_LEAD_DAYS, DirectoryUser, Evaluation, EvaluationPeriod, ManagerReview,
    ReviewDecision, SelfAssessment, SelfAssessmentDraft, format_date, format_timestamp,
    suggested_data_inicio, validate_mapping, validate_period,
};
use avalia_persistence::{Persistence, PersistenceError};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_parse::RequestParseError;
use crate::request_response::{
    AutoCreationPeriodResult, AutoCreationRunResponse, BulkSetMappingsRequest,
    BulkSetMappingsResponse, CreatePeriodRequest, CreatePeriodResponse, DeactivateMappingResponse,
    DeletePeriodResponse, EvaluationInfo, ListEvaluationsResponse, ListMappingsResponse,
    ListPeriodsForUserResponse, ListPeriodsResponse, ListUsersResponse, MappingFailure,
    MappingInfo, PeriodInfo, PeriodWithEvaluationInfo, RegisterUserRequest, RegisterUserResponse,
    SetMappingRequest, SetMappingResponse, StatusHistoryInfo, StatusHistoryResponse,
    SubmitManagerReviewRequest, TransitionResponse, UpdatePeriodRequest, UpdatePeriodResponse,
    UserInfo,
};

/// Returns the current timestamp as RFC 3339.
fn now_timestamp() -> Result<String, ApiError> {
    format_timestamp(OffsetDateTime::now_utc()).map_err(translate_domain_error)
}

// ============================================================================
// Manager mappings
// ============================================================================

/// Assigns (or reassigns) a collaborator's evaluating manager.
///
/// Rejects self-mappings before any write; replaces any previous mapping
/// for the same collaborator. Existing evaluations keep their evaluator
/// snapshot.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the pair is reflexive,
/// or persistence fails.
pub fn set_mapping(
    persistence: &mut Persistence,
    request: &SetMappingRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SetMappingResponse, ApiError> {
    AuthorizationService::authorize_manage_mappings(actor)?;
    validate_mapping(request.colaborador_id, request.gerente_id).map_err(translate_domain_error)?;

    let now: String = now_timestamp()?;
    let previous: Option<i64> = persistence
        .get_active_mapping(request.colaborador_id)
        .map_err(translate_persistence_error)?;

    persistence
        .set_mapping(request.colaborador_id, request.gerente_id, &now)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("SetManagerMapping"),
            Some(format!(
                "colaborador {} -> gerente {}",
                request.colaborador_id, request.gerente_id
            )),
        ),
        StateSnapshot::new(previous.map_or_else(
            || String::from("gerente_id=none"),
            |id| format!("gerente_id={id}"),
        )),
        StateSnapshot::new(format!("gerente_id={}", request.gerente_id)),
        None,
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(SetMappingResponse {
        colaborador_id: request.colaborador_id,
        gerente_id: request.gerente_id,
        message: format!(
            "Gerente {} atribuído ao colaborador {}",
            request.gerente_id, request.colaborador_id
        ),
    })
}

/// Saves several mappings in one call.
///
/// Each pair is applied independently; a self-mapping (or any other
/// failure) is reported per item and never aborts the batch, mirroring the
/// admin panel's "N salvos, M com erro" reporting.
///
/// # Errors
///
/// Returns an error only if the caller is not an Admin; per-item failures
/// are part of the successful response.
pub fn bulk_set_mappings(
    persistence: &mut Persistence,
    request: &BulkSetMappingsRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BulkSetMappingsResponse, ApiError> {
    AuthorizationService::authorize_manage_mappings(actor)?;

    let now: String = now_timestamp()?;
    let mut salvos: usize = 0;
    let mut falhas: Vec<MappingFailure> = Vec::new();

    for pair in &request.mapeamentos {
        let outcome: Result<(), ApiError> =
            validate_mapping(pair.colaborador_id, pair.gerente_id)
                .map_err(translate_domain_error)
                .and_then(|()| {
                    persistence
                        .set_mapping(pair.colaborador_id, pair.gerente_id, &now)
                        .map_err(translate_persistence_error)
                });

        match outcome {
            Ok(()) => salvos += 1,
            Err(err) => {
                warn!(
                    colaborador_id = pair.colaborador_id,
                    gerente_id = pair.gerente_id,
                    error = %err,
                    "Bulk mapping save failed for one pair"
                );
                falhas.push(MappingFailure {
                    colaborador_id: pair.colaborador_id,
                    motivo: err.to_string(),
                });
            }
        }
    }

    let com_erro: usize = falhas.len();
    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("BulkSetManagerMappings"),
            Some(format!("salvos={salvos}, com_erro={com_erro}")),
        ),
        StateSnapshot::new(format!("pares={}", request.mapeamentos.len())),
        StateSnapshot::new(format!("salvos={salvos}")),
        None,
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(BulkSetMappingsResponse {
        salvos,
        com_erro,
        falhas,
        message: format!("{salvos} salvos, {com_erro} com erro"),
    })
}

/// Lists every mapping row.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the query fails.
pub fn list_mappings(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListMappingsResponse, ApiError> {
    AuthorizationService::authorize_manage_mappings(actor)?;

    let mappings = persistence
        .list_mappings()
        .map_err(translate_persistence_error)?;
    Ok(ListMappingsResponse {
        mapeamentos: mappings.iter().map(MappingInfo::from).collect(),
    })
}

/// Deactivates a collaborator's mapping.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the collaborator has no
/// mapping, or persistence fails.
pub fn deactivate_mapping(
    persistence: &mut Persistence,
    colaborador_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeactivateMappingResponse, ApiError> {
    AuthorizationService::authorize_manage_mappings(actor)?;

    let now: String = now_timestamp()?;
    let previous: Option<i64> = persistence
        .get_active_mapping(colaborador_id)
        .map_err(translate_persistence_error)?;
    persistence
        .deactivate_mapping(colaborador_id, &now)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("DeactivateManagerMapping"),
            Some(format!("colaborador {colaborador_id}")),
        ),
        StateSnapshot::new(previous.map_or_else(
            || String::from("gerente_id=none"),
            |id| format!("gerente_id={id}"),
        )),
        StateSnapshot::new(String::from("ativo=false")),
        None,
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(DeactivateMappingResponse {
        colaborador_id,
        message: format!("Mapeamento do colaborador {colaborador_id} desativado"),
    })
}

// ============================================================================
// Evaluation periods
// ============================================================================

/// Creates an evaluation period.
///
/// When `data_inicio` is omitted it defaults to two weeks before
/// `data_fim`. The window and deadline ordering are validated before any
/// write.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, validation fails, or
/// persistence fails.
pub fn create_period(
    persistence: &mut Persistence,
    request: CreatePeriodRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreatePeriodResponse, ApiError> {
    AuthorizationService::authorize_manage_periods(actor)?;

    let data_inicio: String = match request.data_inicio {
        Some(data_inicio) => data_inicio,
        None => suggested_data_inicio(&request.data_fim).map_err(translate_domain_error)?,
    };

    let mut period: EvaluationPeriod = EvaluationPeriod::new(
        request.nome,
        request.descricao,
        request.ano,
        data_inicio,
        request.data_fim,
        request.data_limite_autoavaliacao,
        request.data_limite_aprovacao,
    );
    validate_period(&period).map_err(translate_domain_error)?;

    let periodo_id: i64 = persistence
        .create_period(&period)
        .map_err(translate_persistence_error)?;
    period.periodo_id = Some(periodo_id);

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("CreatePeriod"),
            Some(format!("nome='{}', data_fim={}", period.nome, period.data_fim)),
        ),
        StateSnapshot::new(String::from("periodo=none")),
        StateSnapshot::new(format!("periodo_id={periodo_id}")),
        Some(periodo_id),
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    info!(periodo_id, nome = %period.nome, "Created evaluation period");

    Ok(CreatePeriodResponse {
        periodo: PeriodInfo::from_period(&period),
        message: format!("Período '{}' criado", period.nome),
    })
}

/// Updates an evaluation period.
///
/// The patch is merged over the stored period and the merged record is
/// revalidated, so an update can never leave the window or deadlines
/// inconsistent.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the period does not
/// exist, validation fails, or persistence fails.
pub fn update_period(
    persistence: &mut Persistence,
    periodo_id: i64,
    patch: UpdatePeriodRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UpdatePeriodResponse, ApiError> {
    AuthorizationService::authorize_manage_periods(actor)?;

    let mut period: EvaluationPeriod = persistence
        .get_period(periodo_id)
        .map_err(translate_persistence_error)?;
    let before: String = format!("data_fim={}, status={}", period.data_fim, period.status);

    if let Some(nome) = patch.nome {
        period.nome = nome;
    }
    if let Some(descricao) = patch.descricao {
        period.descricao = Some(descricao);
    }
    if let Some(ano) = patch.ano {
        period.ano = ano;
    }
    if let Some(data_inicio) = patch.data_inicio {
        period.data_inicio = data_inicio;
    }
    if let Some(data_fim) = patch.data_fim {
        period.data_fim = data_fim;
    }
    if let Some(data_limite_autoavaliacao) = patch.data_limite_autoavaliacao {
        period.data_limite_autoavaliacao = data_limite_autoavaliacao;
    }
    if let Some(data_limite_aprovacao) = patch.data_limite_aprovacao {
        period.data_limite_aprovacao = data_limite_aprovacao;
    }
    if let Some(status) = patch.status {
        period.status = status.parse().map_err(translate_domain_error)?;
    }
    if let Some(ativo) = patch.ativo {
        period.ativo = ativo;
    }

    validate_period(&period).map_err(translate_domain_error)?;
    persistence
        .update_period(periodo_id, &period)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(String::from("UpdatePeriod"), None),
        StateSnapshot::new(before),
        StateSnapshot::new(format!(
            "data_fim={}, status={}",
            period.data_fim, period.status
        )),
        Some(periodo_id),
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(UpdatePeriodResponse {
        periodo: PeriodInfo::from_period(&period),
        message: format!("Período '{}' atualizado", period.nome),
    })
}

/// Deletes an evaluation period.
///
/// Deletion is irreversible and blocked while evaluations reference the
/// period.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the period has
/// evaluations, or it does not exist.
pub fn delete_period(
    persistence: &mut Persistence,
    periodo_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeletePeriodResponse, ApiError> {
    AuthorizationService::authorize_manage_periods(actor)?;

    let period: EvaluationPeriod = persistence
        .get_period(periodo_id)
        .map_err(translate_persistence_error)?;
    persistence
        .delete_period(periodo_id)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("DeletePeriod"),
            Some(format!("nome='{}'", period.nome)),
        ),
        StateSnapshot::new(format!("periodo_id={periodo_id}")),
        StateSnapshot::new(String::from("periodo=none")),
        Some(periodo_id),
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(DeletePeriodResponse {
        periodo_id,
        message: format!("Período '{}' excluído", period.nome),
    })
}

/// Lists periods, newest end date first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_periods(
    persistence: &mut Persistence,
    only_active: bool,
) -> Result<ListPeriodsResponse, ApiError> {
    let periods = persistence
        .list_periods(only_active)
        .map_err(translate_persistence_error)?;
    Ok(ListPeriodsResponse {
        periodos: periods.iter().map(PeriodInfo::from_period).collect(),
    })
}

// ============================================================================
// Auto-creation trigger
// ============================================================================

/// Runs the auto-creation trigger.
///
/// For every active, unexecuted period whose end date is within fourteen
/// days of `today`, creates one pending evaluation per eligible mapped
/// collaborator and claims the period. Eligible collaborators without a
/// mapping are skipped silently and counted; collaborators that already
/// have an evaluation for the period are left alone, which keeps a retry
/// after a partial failure safe.
///
/// Safe to invoke concurrently (scheduled job plus an admin "run now"):
/// the per-period claim guarantees at most one committed batch.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or persistence fails.
/// Losing the claim on a period is not an error; it is reported in that
/// period's result with `executado = false`.
pub fn run_auto_creation(
    persistence: &mut Persistence,
    today: Date,
    actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<AutoCreationRunResponse, ApiError> {
    AuthorizationService::authorize_run_auto_creation(actor)?;

    let now: String = now_timestamp()?;
    let cutoff: Date = today
        .checked_add(Duration::days(AUTO_CREATION_LEAD_DAYS))
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Date arithmetic overflow computing the trigger cutoff"),
        })?;
    let cutoff: String = format_date(cutoff).map_err(translate_domain_error)?;

    let due_periods: Vec<EvaluationPeriod> = persistence
        .list_due_periods(&cutoff)
        .map_err(translate_persistence_error)?;
    let eligible: Vec<DirectoryUser> = persistence
        .list_eligible_users()
        .map_err(translate_persistence_error)?;

    let mut resultados: Vec<AutoCreationPeriodResult> = Vec::with_capacity(due_periods.len());
    let mut total_avaliacoes_criadas: usize = 0;

    for period in &due_periods {
        let Some(periodo_id) = period.periodo_id else {
            continue;
        };

        let mut batch: Vec<Evaluation> = Vec::new();
        let mut sem_gerente: usize = 0;
        let mut ja_existentes: usize = 0;

        for user in &eligible {
            let Some(funcionario_id) = user.user_id else {
                continue;
            };

            if persistence
                .evaluation_id_for(funcionario_id, periodo_id)
                .map_err(translate_persistence_error)?
                .is_some()
            {
                ja_existentes += 1;
                continue;
            }

            match persistence
                .get_active_mapping(funcionario_id)
                .map_err(translate_persistence_error)?
            {
                Some(gerente_id) => {
                    batch.push(Evaluation::new(
                        periodo_id,
                        funcionario_id,
                        gerente_id,
                        now.clone(),
                    ));
                }
                None => {
                    // Silent-skip policy: no evaluation, no error. The admin
                    // panel surfaces unmapped collaborators separately.
                    sem_gerente += 1;
                }
            }
        }

        let event: AuditEvent = AuditEvent::new(
            actor.to_audit_actor(),
            cause.clone(),
            Action::new(
                String::from("RunAutoCreation"),
                Some(format!(
                    "elegiveis={}, criadas={}, sem_gerente={sem_gerente}",
                    eligible.len(),
                    batch.len()
                )),
            ),
            StateSnapshot::new(String::from("criacao_automatica_executada=false")),
            StateSnapshot::new(String::from("criacao_automatica_executada=true")),
            Some(periodo_id),
            None,
        );

        let batch_result = persistence.run_auto_creation_batch(
            periodo_id,
            &batch,
            actor.user_id,
            &now,
            &event,
        );

        let (avaliacoes_criadas, executado) = match batch_result {
            Ok(created) => (created.len(), true),
            Err(PersistenceError::AutoCreationAlreadyExecuted { .. }) => {
                info!(periodo_id, "Auto-creation lost the claim to a concurrent run");
                (0, false)
            }
            Err(err) => return Err(translate_persistence_error(err)),
        };
        total_avaliacoes_criadas += avaliacoes_criadas;

        resultados.push(AutoCreationPeriodResult {
            periodo_id,
            nome: period.nome.clone(),
            usuarios_elegiveis: eligible.len(),
            avaliacoes_criadas,
            sem_gerente,
            ja_existentes,
            executado,
        });
    }

    info!(
        periodos = resultados.len(),
        total_avaliacoes_criadas, "Auto-creation run finished"
    );

    Ok(AutoCreationRunResponse {
        periodos_processados: resultados.len(),
        total_avaliacoes_criadas,
        message: format!(
            "{} período(s) processado(s), {} avaliação(ões) criada(s)",
            resultados.len(),
            total_avaliacoes_criadas
        ),
        resultados,
    })
}

// ============================================================================
// Workflow transitions
// ============================================================================

/// Applies a core command to a stored evaluation and persists the result.
fn apply_and_persist(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    command: Command,
    actor: &AuthenticatedActor,
    cause: Cause,
    message: &str,
) -> Result<TransitionResponse, ApiError> {
    let evaluation: Evaluation = persistence
        .get_evaluation(avaliacao_id)
        .map_err(translate_persistence_error)?;
    let now: String = now_timestamp()?;

    let result: TransitionResult = apply(
        &evaluation,
        command,
        actor.user_id,
        actor.to_audit_actor(),
        cause,
        &now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_transition(&result, evaluation.status.as_str(), actor.user_id, &now)
        .map_err(translate_persistence_error)?;

    info!(
        avaliacao_id,
        from = evaluation.status.as_str(),
        to = result.new_evaluation.status.as_str(),
        "Evaluation transition persisted"
    );

    Ok(TransitionResponse {
        avaliacao: EvaluationInfo::from_evaluation(&result.new_evaluation),
        event_id,
        message: message.to_string(),
    })
}

/// Saves a partial self-assessment without submitting it.
///
/// # Errors
///
/// Returns an error if the caller is not the subject, the status does not
/// permit editing, or persistence fails.
pub fn save_self_assessment_draft(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    draft: SelfAssessmentDraft,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionResponse, ApiError> {
    apply_and_persist(
        persistence,
        avaliacao_id,
        Command::SaveSelfAssessmentDraft { draft },
        actor,
        cause,
        "Rascunho da autoavaliação salvo",
    )
}

/// Submits the completed self-assessment for manager review.
///
/// # Errors
///
/// Returns an error if the caller is not the subject, the status does not
/// permit submission, any answer is blank, or persistence fails.
pub fn submit_self_assessment(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    answers: SelfAssessment,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionResponse, ApiError> {
    apply_and_persist(
        persistence,
        avaliacao_id,
        Command::SubmitSelfAssessment { answers },
        actor,
        cause,
        "Autoavaliação enviada para aprovação",
    )
}

/// Reviews a submitted self-assessment: approve or return.
///
/// # Errors
///
/// Returns an error if the caller is not the assigned evaluator, the
/// evaluation is not awaiting review, the payload is incomplete, or
/// persistence fails.
pub fn submit_manager_review(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    request: SubmitManagerReviewRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionResponse, ApiError> {
    let (decision, message): (ReviewDecision, &str) = match request.decision.as_str() {
        "approve" => (
            ReviewDecision::Approve {
                review: ManagerReview {
                    questao_15_comentario_avaliador: request
                        .questao_15_comentario_avaliador
                        .unwrap_or_default(),
                    questao_16_nota_lideranca: request.questao_16_nota_lideranca.unwrap_or(0),
                    questao_17_nota_resultados: request.questao_17_nota_resultados.unwrap_or(0),
                },
            },
            "Avaliação aprovada e concluída",
        ),
        "return" => (
            ReviewDecision::Return {
                comentario: request.comentario_devolucao.unwrap_or_default(),
            },
            "Avaliação devolvida para ajustes",
        ),
        other => {
            return Err(RequestParseError::InvalidDecision {
                value: other.to_string(),
            }
            .into());
        }
    };

    apply_and_persist(
        persistence,
        avaliacao_id,
        Command::SubmitManagerReview { decision },
        actor,
        cause,
        message,
    )
}

/// Reassigns an in-flight evaluation to the collaborator's current manager.
///
/// The evaluator snapshot is never re-resolved implicitly; this explicit
/// admin action is the only path.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the evaluation is
/// completed, the collaborator has no active mapping, or persistence
/// fails.
pub fn reassign_evaluator(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionResponse, ApiError> {
    AuthorizationService::authorize_reassign_evaluator(actor)?;

    let evaluation: Evaluation = persistence
        .get_evaluation(avaliacao_id)
        .map_err(translate_persistence_error)?;
    let novo_avaliador_id: i64 = persistence
        .get_active_mapping(evaluation.funcionario_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Manager mapping"),
            message: format!(
                "Collaborator {} has no active manager mapping",
                evaluation.funcionario_id
            ),
        })?;

    apply_and_persist(
        persistence,
        avaliacao_id,
        Command::ReassignEvaluator { novo_avaliador_id },
        actor,
        cause,
        "Avaliador reatribuído",
    )
}

// ============================================================================
// Read-side projections
// ============================================================================

/// Lists the caller's evaluations, as subject or evaluator.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_evaluations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListEvaluationsResponse, ApiError> {
    let evaluations = persistence
        .list_evaluations_for_user(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(ListEvaluationsResponse {
        avaliacoes: evaluations
            .iter()
            .map(EvaluationInfo::from_evaluation)
            .collect(),
    })
}

/// Lists the evaluations awaiting the caller's review.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_pending_reviews(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListEvaluationsResponse, ApiError> {
    let evaluations = persistence
        .list_pending_reviews(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(ListEvaluationsResponse {
        avaliacoes: evaluations
            .iter()
            .map(EvaluationInfo::from_evaluation)
            .collect(),
    })
}

/// Pairs periods with the caller's evaluation id in each.
fn pair_periods_with_evaluations(
    persistence: &mut Persistence,
    periods: &[EvaluationPeriod],
    user_id: i64,
) -> Result<Vec<PeriodWithEvaluationInfo>, ApiError> {
    let mut paired: Vec<PeriodWithEvaluationInfo> = Vec::with_capacity(periods.len());
    for period in periods {
        let avaliacao_id: Option<i64> = match period.periodo_id {
            Some(periodo_id) => persistence
                .evaluation_id_for(user_id, periodo_id)
                .map_err(translate_persistence_error)?,
            None => None,
        };
        paired.push(PeriodWithEvaluationInfo {
            periodo: PeriodInfo::from_period(period),
            avaliacao_id,
        });
    }
    Ok(paired)
}

/// Lists the periods currently running, paired with the caller's
/// evaluation in each (if any).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_periods_for_user(
    persistence: &mut Persistence,
    today: Date,
    actor: &AuthenticatedActor,
) -> Result<ListPeriodsForUserResponse, ApiError> {
    let today: String = format_date(today).map_err(translate_domain_error)?;
    let periods = persistence
        .list_active_periods(&today)
        .map_err(translate_persistence_error)?;
    Ok(ListPeriodsForUserResponse {
        periodos: pair_periods_with_evaluations(persistence, &periods, actor.user_id)?,
    })
}

/// Lists the periods starting in the future, paired with the caller's
/// evaluation in each (if any).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_upcoming_periods_for_user(
    persistence: &mut Persistence,
    today: Date,
    actor: &AuthenticatedActor,
) -> Result<ListPeriodsForUserResponse, ApiError> {
    let today: String = format_date(today).map_err(translate_domain_error)?;
    let periods = persistence
        .list_upcoming_periods(&today)
        .map_err(translate_persistence_error)?;
    Ok(ListPeriodsForUserResponse {
        periodos: pair_periods_with_evaluations(persistence, &periods, actor.user_id)?,
    })
}

/// Retrieves one evaluation, visible to its subject, its evaluator, and
/// administrators.
///
/// # Errors
///
/// Returns an error if the evaluation does not exist or the caller may not
/// view it.
pub fn get_evaluation_detail(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    actor: &AuthenticatedActor,
) -> Result<EvaluationInfo, ApiError> {
    let evaluation: Evaluation = persistence
        .get_evaluation(avaliacao_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_view_evaluation(
        actor,
        evaluation.funcionario_id,
        evaluation.avaliador_id,
    )?;
    Ok(EvaluationInfo::from_evaluation(&evaluation))
}

/// Retrieves an evaluation's status history, with the same visibility as
/// the evaluation itself.
///
/// # Errors
///
/// Returns an error if the evaluation does not exist or the caller may not
/// view it.
pub fn get_status_history(
    persistence: &mut Persistence,
    avaliacao_id: i64,
    actor: &AuthenticatedActor,
) -> Result<StatusHistoryResponse, ApiError> {
    let evaluation: Evaluation = persistence
        .get_evaluation(avaliacao_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_view_evaluation(
        actor,
        evaluation.funcionario_id,
        evaluation.avaliador_id,
    )?;

    let history = persistence
        .list_status_history(avaliacao_id)
        .map_err(translate_persistence_error)?;
    Ok(StatusHistoryResponse {
        avaliacao_id,
        historico: history.iter().map(StatusHistoryInfo::from).collect(),
    })
}

// ============================================================================
// Directory mirror
// ============================================================================

/// Registers a user in the directory mirror.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the insert fails.
pub fn register_directory_user(
    persistence: &mut Persistence,
    request: RegisterUserRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RegisterUserResponse, ApiError> {
    AuthorizationService::authorize_manage_directory(actor)?;

    let user: DirectoryUser = DirectoryUser {
        user_id: None,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        position: request.position,
        department: request.department,
        role: request.role,
        is_authorized: request.is_authorized,
        active: request.active,
    };
    let user_id: i64 = persistence
        .create_directory_user(&user)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("RegisterDirectoryUser"),
            Some(format!("email={}", user.email)),
        ),
        StateSnapshot::new(String::from("user=none")),
        StateSnapshot::new(format!("user_id={user_id}")),
        None,
        None,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(RegisterUserResponse {
        user_id,
        message: format!(
            "Usuário {} {} registrado",
            user.first_name, user.last_name
        ),
    })
}

/// Lists the directory mirror.
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the query fails.
pub fn list_directory_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_manage_directory(actor)?;

    let users = persistence
        .list_directory_users()
        .map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        usuarios: users.iter().map(UserInfo::from).collect(),
    })
}
