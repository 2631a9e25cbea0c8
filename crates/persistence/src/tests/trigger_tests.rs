// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the transactional auto-creation batch: the claim
//! compare-and-set, idempotence, and the bookkeeping columns.

use avalia_domain::Evaluation;

use crate::PersistenceError;
use crate::tests::helpers::{
    NOW, pending_evaluation, seed_period, seed_user, test_event, test_persistence,
};

#[test]
fn test_batch_creates_evaluations_and_claims_period() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let gerente = seed_user(&mut persistence, "Carla", "carla@example.com");

    let batch: Vec<Evaluation> = vec![
        pending_evaluation(periodo_id, ana, gerente),
        pending_evaluation(periodo_id, bruno, gerente),
    ];

    let created = persistence
        .run_auto_creation_batch(periodo_id, &batch, 1, NOW, &test_event(Some(periodo_id), None))
        .unwrap();
    assert_eq!(created.len(), 2);

    let loaded = persistence.get_period(periodo_id).unwrap();
    assert!(loaded.criacao_automatica_executada);
    assert_eq!(loaded.data_criacao_automatica.as_deref(), Some(NOW));
    assert_eq!(loaded.total_avaliacoes_criadas, 2);

    // Every created evaluation starts pending with one history row.
    for avaliacao_id in created {
        let evaluation = persistence.get_evaluation(avaliacao_id).unwrap();
        assert_eq!(evaluation.status.as_str(), "pendente");
        let history = persistence.list_status_history(avaliacao_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status_anterior, None);
        assert_eq!(history[0].status_novo, "pendente");
    }
}

#[test]
fn test_second_run_loses_the_claim_and_creates_nothing() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Carla", "carla@example.com");

    let batch: Vec<Evaluation> = vec![pending_evaluation(periodo_id, ana, gerente)];

    persistence
        .run_auto_creation_batch(periodo_id, &batch, 1, NOW, &test_event(Some(periodo_id), None))
        .unwrap();

    // A second invocation, as a racing scheduler would issue, aborts and
    // rolls its batch back.
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let second_batch: Vec<Evaluation> = vec![pending_evaluation(periodo_id, bruno, gerente)];
    let second = persistence.run_auto_creation_batch(
        periodo_id,
        &second_batch,
        1,
        NOW,
        &test_event(Some(periodo_id), None),
    );
    assert!(matches!(
        second,
        Err(PersistenceError::AutoCreationAlreadyExecuted { periodo_id: id }) if id == periodo_id
    ));

    // Bruno got no evaluation, and the count still reflects the first run.
    assert_eq!(
        persistence.evaluation_id_for(bruno, periodo_id).unwrap(),
        None
    );
    let loaded = persistence.get_period(periodo_id).unwrap();
    assert_eq!(loaded.total_avaliacoes_criadas, 1);
}

#[test]
fn test_failed_batch_leaves_period_unclaimed() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Carla", "carla@example.com");

    // A batch with a duplicate collaborator violates the unique index and
    // fails partway through.
    let batch: Vec<Evaluation> = vec![
        pending_evaluation(periodo_id, ana, gerente),
        pending_evaluation(periodo_id, ana, gerente),
    ];
    let result = persistence.run_auto_creation_batch(
        periodo_id,
        &batch,
        1,
        NOW,
        &test_event(Some(periodo_id), None),
    );
    assert!(result.is_err());

    // Nothing committed: the period is still unclaimed and re-triggerable,
    // and no evaluation survived the rollback.
    let loaded = persistence.get_period(periodo_id).unwrap();
    assert!(!loaded.criacao_automatica_executada);
    assert_eq!(loaded.data_criacao_automatica, None);
    assert_eq!(
        persistence.evaluation_id_for(ana, periodo_id).unwrap(),
        None
    );

    // The retry with a clean batch succeeds.
    let retry: Vec<Evaluation> = vec![pending_evaluation(periodo_id, ana, gerente)];
    persistence
        .run_auto_creation_batch(periodo_id, &retry, 1, NOW, &test_event(Some(periodo_id), None))
        .unwrap();
    assert!(persistence.get_period(periodo_id).unwrap().criacao_automatica_executada);
}

#[test]
fn test_due_period_listing_uses_cutoff() {
    let mut persistence = test_persistence();
    seed_period(&mut persistence, "Perto", "2026-03-15");
    seed_period(&mut persistence, "Longe", "2026-09-15");

    // cutoff = today + 14 days, computed by the caller.
    let due = persistence.list_due_periods("2026-03-20").unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].nome, "Perto");

    let none = persistence.list_due_periods("2026-02-01").unwrap();
    assert!(none.is_empty());
}
