// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for evaluation persistence: row round trips, transition
//! persistence, and the status history.

use avalia::{Command, apply};
use avalia_audit::{Actor, Cause};
use avalia_domain::{EvaluationStatus, ManagerReview, ReviewDecision, SelfAssessment};

use crate::PersistenceError;
use crate::tests::helpers::{
    NOW, pending_evaluation, seed_period, seed_user, test_persistence,
};

fn answers() -> SelfAssessment {
    SelfAssessment {
        questao_11_pontos_fortes: String::from("Organização"),
        questao_12_areas_melhoria: String::from("Delegação"),
        questao_13_objetivos_alcancados: String::from("Projeto Y"),
        questao_14_planos_desenvolvimento: String::from("Certificação"),
    }
}

#[test]
fn test_create_and_load_pending_evaluation() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let colaborador = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    let avaliacao_id = persistence
        .create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente))
        .unwrap();

    let loaded = persistence.get_evaluation(avaliacao_id).unwrap();
    assert_eq!(loaded.status, EvaluationStatus::Pendente);
    assert_eq!(loaded.funcionario_id, colaborador);
    assert_eq!(loaded.avaliador_id, gerente);
    assert!(loaded.autoavaliacao.is_empty());
    assert!(loaded.aprovacao.is_none());
    assert_eq!(
        persistence
            .evaluation_id_for(colaborador, periodo_id)
            .unwrap(),
        Some(avaliacao_id)
    );
}

#[test]
fn test_duplicate_evaluation_for_period_rejected() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let colaborador = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    persistence
        .create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente))
        .unwrap();
    let duplicate =
        persistence.create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente));
    assert!(duplicate.is_err());
}

#[test]
fn test_persist_transition_updates_row_history_and_audit() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let colaborador = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    let avaliacao_id = persistence
        .create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente))
        .unwrap();
    let evaluation = persistence.get_evaluation(avaliacao_id).unwrap();

    // Submit through the core engine, persist the result.
    let result = apply(
        &evaluation,
        Command::SubmitSelfAssessment { answers: answers() },
        colaborador,
        Actor::new(colaborador.to_string(), String::from("colaborador")),
        Cause::new(String::from("req-1"), String::from("API request")),
        NOW,
    )
    .unwrap();

    let event_id = persistence
        .persist_transition(&result, evaluation.status.as_str(), colaborador, NOW)
        .unwrap();

    let reloaded = persistence.get_evaluation(avaliacao_id).unwrap();
    assert_eq!(reloaded.status, EvaluationStatus::AguardandoAprovacao);
    assert_eq!(
        reloaded.autoavaliacao.questao_11_pontos_fortes.as_deref(),
        Some("Organização")
    );
    assert_eq!(reloaded.data_autoavaliacao.as_deref(), Some(NOW));

    let history = persistence.list_status_history(avaliacao_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_anterior.as_deref(), Some("pendente"));
    assert_eq!(history[0].status_novo, "aguardando_aprovacao");
    assert_eq!(history[0].transicionado_por, colaborador);
    assert_eq!(history[0].audit_event_id, Some(event_id));

    let event = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(event.action.name, "SubmitSelfAssessment");
    assert_eq!(event.avaliacao_id, Some(avaliacao_id));

    let events = persistence.list_events_for_evaluation(avaliacao_id).unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_history_grows_one_row_per_transition() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let colaborador = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    let avaliacao_id = persistence
        .create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente))
        .unwrap();

    let subject_actor = || Actor::new(colaborador.to_string(), String::from("colaborador"));
    let manager_actor = || Actor::new(gerente.to_string(), String::from("gerente"));
    let cause = || Cause::new(String::from("req"), String::from("API request"));

    // submit -> return -> resubmit -> approve
    let mut current = persistence.get_evaluation(avaliacao_id).unwrap();
    for (command, caller, actor) in [
        (
            Command::SubmitSelfAssessment { answers: answers() },
            colaborador,
            subject_actor(),
        ),
        (
            Command::SubmitManagerReview {
                decision: ReviewDecision::Return {
                    comentario: String::from("Faltam detalhes"),
                },
            },
            gerente,
            manager_actor(),
        ),
        (
            Command::SubmitSelfAssessment { answers: answers() },
            colaborador,
            subject_actor(),
        ),
        (
            Command::SubmitManagerReview {
                decision: ReviewDecision::Approve {
                    review: ManagerReview {
                        questao_15_comentario_avaliador: String::from("Aprovado"),
                        questao_16_nota_lideranca: 4,
                        questao_17_nota_resultados: 4,
                    },
                },
            },
            gerente,
            manager_actor(),
        ),
    ] {
        let result = apply(&current, command, caller, actor, cause(), NOW).unwrap();
        persistence
            .persist_transition(&result, current.status.as_str(), caller, NOW)
            .unwrap();
        current = persistence.get_evaluation(avaliacao_id).unwrap();
    }

    assert_eq!(current.status, EvaluationStatus::Concluida);
    assert!(current.aprovacao.is_some());

    let history = persistence.list_status_history(avaliacao_id).unwrap();
    assert_eq!(history.len(), 4);
    let transitions: Vec<&str> = history.iter().map(|h| h.status_novo.as_str()).collect();
    assert_eq!(
        transitions,
        vec![
            "aguardando_aprovacao",
            "devolvida",
            "aguardando_aprovacao",
            "concluida"
        ]
    );
    // The return feedback rides on the row that recorded the return.
    assert_eq!(history[1].comentario.as_deref(), Some("Faltam detalhes"));
    assert_eq!(history[2].comentario, None);
}

#[test]
fn test_pending_reviews_projection() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let gerente = seed_user(&mut persistence, "Carla", "carla@example.com");

    let id_ana = persistence
        .create_evaluation(&pending_evaluation(periodo_id, ana, gerente))
        .unwrap();
    persistence
        .create_evaluation(&pending_evaluation(periodo_id, bruno, gerente))
        .unwrap();

    // Only Ana submits.
    let evaluation = persistence.get_evaluation(id_ana).unwrap();
    let result = apply(
        &evaluation,
        Command::SubmitSelfAssessment { answers: answers() },
        ana,
        Actor::new(ana.to_string(), String::from("colaborador")),
        Cause::new(String::from("req"), String::from("API request")),
        NOW,
    )
    .unwrap();
    persistence
        .persist_transition(&result, evaluation.status.as_str(), ana, NOW)
        .unwrap();

    let pending = persistence.list_pending_reviews(gerente).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].funcionario_id, ana);

    // The manager sees both evaluations among "their" evaluations.
    assert_eq!(persistence.list_evaluations_for_user(gerente).unwrap().len(), 2);
    assert_eq!(persistence.list_evaluations_for_user(ana).unwrap().len(), 1);
}

#[test]
fn test_get_missing_evaluation_is_not_found() {
    let mut persistence = test_persistence();
    assert!(matches!(
        persistence.get_evaluation(31_337),
        Err(PersistenceError::NotFound(_))
    ));
}
