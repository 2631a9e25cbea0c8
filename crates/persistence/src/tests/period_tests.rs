// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for period persistence: CRUD, ordering, and deletion guards.

use avalia_domain::PeriodStatus;

use crate::PersistenceError;
use crate::tests::helpers::{
    NOW, pending_evaluation, seed_period, seed_user, test_persistence,
};

#[test]
fn test_create_and_get_period_round_trip() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();

    let loaded = persistence.get_period(periodo_id).unwrap();
    assert_eq!(loaded.nome, "Avaliação 2026/1");
    assert_eq!(loaded.data_fim, "2026-03-15");
    assert_eq!(loaded.data_inicio, "2026-03-01");
    assert_eq!(loaded.status, PeriodStatus::Planejado);
    assert!(loaded.ativo);
    assert!(!loaded.criacao_automatica_executada);
    assert_eq!(loaded.total_avaliacoes_criadas, 0);
}

#[test]
fn test_list_periods_newest_end_date_first() {
    let mut persistence = test_persistence();
    seed_period(&mut persistence, "Primeiro", "2026-03-15");
    seed_period(&mut persistence, "Segundo", "2026-09-15");
    seed_period(&mut persistence, "Antigo", "2025-09-15");

    let periods = persistence.list_periods(false).unwrap();
    let names: Vec<&str> = periods.iter().map(|p| p.nome.as_str()).collect();
    assert_eq!(names, vec!["Segundo", "Primeiro", "Antigo"]);
}

#[test]
fn test_update_period_and_not_found() {
    let mut persistence = test_persistence();
    let mut period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();

    period.nome = String::from("Avaliação 2026/1 (revisada)");
    period.status = PeriodStatus::EmAndamento;
    persistence.update_period(periodo_id, &period).unwrap();

    let loaded = persistence.get_period(periodo_id).unwrap();
    assert_eq!(loaded.nome, "Avaliação 2026/1 (revisada)");
    assert_eq!(loaded.status, PeriodStatus::EmAndamento);

    let missing = persistence.update_period(9_999, &period);
    assert!(matches!(missing, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_period_without_evaluations() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();

    persistence.delete_period(periodo_id).unwrap();
    assert!(matches!(
        persistence.get_period(periodo_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_period_blocked_while_evaluations_exist() {
    let mut persistence = test_persistence();
    let period = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    let periodo_id = period.periodo_id.unwrap();
    let colaborador = seed_user(&mut persistence, "Ana", "ana@example.com");
    let gerente = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    persistence
        .create_evaluation(&pending_evaluation(periodo_id, colaborador, gerente))
        .unwrap();

    let result = persistence.delete_period(periodo_id);
    assert!(matches!(
        result,
        Err(PersistenceError::PeriodHasEvaluations { count: 1, .. })
    ));

    // Still there.
    assert!(persistence.get_period(periodo_id).is_ok());
}

#[test]
fn test_active_and_upcoming_period_windows() {
    let mut persistence = test_persistence();
    seed_period(&mut persistence, "Corrente", "2026-03-15");
    seed_period(&mut persistence, "Futuro", "2026-09-15");
    seed_period(&mut persistence, "Passado", "2025-03-15");

    let active = persistence.list_active_periods("2026-03-10").unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].nome, "Corrente");

    let upcoming = persistence.list_upcoming_periods("2026-03-10").unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].nome, "Futuro");

    assert_eq!(persistence.list_evaluations_for_user(1).unwrap().len(), 0);
}
