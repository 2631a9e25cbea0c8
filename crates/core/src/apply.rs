// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::transition::TransitionResult;
use avalia_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use avalia_domain::{Evaluation, EvaluationStatus, ReviewDecision};

/// Applies a command to an evaluation, producing the new evaluation and its
/// audit event.
///
/// The input evaluation is never mutated. Validation order is fixed:
/// caller identity first (wrong actor is an authorization failure, not a
/// workflow failure), then status legality, then payload completeness.
///
/// # Arguments
///
/// * `evaluation` - The current evaluation (immutable)
/// * `command` - The command to apply
/// * `caller_user_id` - The directory id of the user invoking the command
/// * `actor` - The audit actor attribution for this change
/// * `cause` - The cause or reason for this change
/// * `now` - The current timestamp (RFC 3339)
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new evaluation and audit event
/// * `Err(CoreError)` if the caller, status, or payload is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not the subject (self-assessment commands) or not the
///   assigned evaluator (review commands)
/// - The evaluation's status does not permit the transition
/// - The payload is incomplete (blank answers, out-of-range scores,
///   missing return feedback)
pub fn apply(
    evaluation: &Evaluation,
    command: Command,
    caller_user_id: i64,
    actor: Actor,
    cause: Cause,
    now: &str,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SaveSelfAssessmentDraft { draft } => {
            require_subject(evaluation, caller_user_id)?;
            evaluation
                .status
                .validate_transition(EvaluationStatus::EmAndamento)?;

            let mut new_evaluation: Evaluation = evaluation.clone();
            new_evaluation.status = EvaluationStatus::EmAndamento;
            new_evaluation.autoavaliacao = draft;

            let audit_event: AuditEvent = status_change_event(
                evaluation,
                &new_evaluation,
                actor,
                cause,
                "SaveSelfAssessmentDraft",
                None,
            );
            Ok(TransitionResult {
                new_evaluation,
                audit_event,
            })
        }
        Command::SubmitSelfAssessment { answers } => {
            require_subject(evaluation, caller_user_id)?;
            evaluation
                .status
                .validate_transition(EvaluationStatus::AguardandoAprovacao)?;
            answers.validate()?;

            let mut new_evaluation: Evaluation = evaluation.clone();
            new_evaluation.status = EvaluationStatus::AguardandoAprovacao;
            new_evaluation.autoavaliacao = answers.into();
            new_evaluation.data_autoavaliacao = Some(now.to_string());

            let audit_event: AuditEvent = status_change_event(
                evaluation,
                &new_evaluation,
                actor,
                cause,
                "SubmitSelfAssessment",
                None,
            );
            Ok(TransitionResult {
                new_evaluation,
                audit_event,
            })
        }
        Command::SubmitManagerReview { decision } => {
            require_evaluator(evaluation, caller_user_id)?;
            let target: EvaluationStatus = match decision {
                ReviewDecision::Approve { .. } => EvaluationStatus::Concluida,
                ReviewDecision::Return { .. } => EvaluationStatus::Devolvida,
            };
            evaluation.status.validate_transition(target)?;
            decision.validate()?;

            let mut new_evaluation: Evaluation = evaluation.clone();
            new_evaluation.status = target;
            let details: String = match decision {
                ReviewDecision::Approve { review } => {
                    new_evaluation.aprovacao = Some(review);
                    new_evaluation.data_aprovacao = Some(now.to_string());
                    String::from("decision=approve")
                }
                ReviewDecision::Return { comentario } => {
                    new_evaluation.comentario_devolucao = Some(comentario);
                    String::from("decision=return")
                }
            };

            let audit_event: AuditEvent = status_change_event(
                evaluation,
                &new_evaluation,
                actor,
                cause,
                "SubmitManagerReview",
                Some(details),
            );
            Ok(TransitionResult {
                new_evaluation,
                audit_event,
            })
        }
        Command::ReassignEvaluator { novo_avaliador_id } => {
            // Administrative action; role enforcement happens at the API
            // boundary. Terminal evaluations can no longer change hands.
            if evaluation.status.is_terminal() {
                return Err(CoreError::DomainViolation(
                    avalia_domain::DomainError::InvalidStatusTransition {
                        from: evaluation.status.as_str().to_string(),
                        to: evaluation.status.as_str().to_string(),
                        reason: "cannot reassign a completed evaluation".to_string(),
                    },
                ));
            }

            let mut new_evaluation: Evaluation = evaluation.clone();
            new_evaluation.avaliador_id = novo_avaliador_id;

            let action: Action = Action::new(
                String::from("ReassignEvaluator"),
                Some(format!(
                    "avaliador {} -> {}",
                    evaluation.avaliador_id, novo_avaliador_id
                )),
            );
            let before: StateSnapshot =
                StateSnapshot::new(format!("avaliador_id={}", evaluation.avaliador_id));
            let after: StateSnapshot =
                StateSnapshot::new(format!("avaliador_id={novo_avaliador_id}"));
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                Some(evaluation.periodo_id),
                evaluation.avaliacao_id,
            );
            Ok(TransitionResult {
                new_evaluation,
                audit_event,
            })
        }
    }
}

/// Rejects callers that are not the evaluation's subject.
const fn require_subject(evaluation: &Evaluation, caller: i64) -> Result<(), CoreError> {
    if evaluation.funcionario_id != caller {
        return Err(CoreError::NotEvaluationSubject {
            avaliacao_id: evaluation.avaliacao_id,
            caller,
        });
    }
    Ok(())
}

/// Rejects callers that are not the evaluation's assigned evaluator.
const fn require_evaluator(evaluation: &Evaluation, caller: i64) -> Result<(), CoreError> {
    if evaluation.avaliador_id != caller {
        return Err(CoreError::NotAssignedEvaluator {
            avaliacao_id: evaluation.avaliacao_id,
            caller,
        });
    }
    Ok(())
}

/// Builds the audit event for a status change.
fn status_change_event(
    old: &Evaluation,
    new: &Evaluation,
    actor: Actor,
    cause: Cause,
    action_name: &str,
    details: Option<String>,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(action_name.to_string(), details),
        StateSnapshot::new(format!("status={}", old.status)),
        StateSnapshot::new(format!("status={}", new.status)),
        Some(old.periodo_id),
        old.avaliacao_id,
    )
}
