// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the read-side projections: my evaluations, pending reviews,
//! and the per-user active/upcoming period pairings.

use avalia_domain::parse_date;

use crate::tests::helpers::{
    admin, assign_manager, cause, colaborador, complete_answers, gerente, seed_period, seed_user,
    ten_days_before, test_persistence,
};
use crate::{
    list_active_periods_for_user, list_my_evaluations, list_pending_reviews,
    list_upcoming_periods_for_user, run_auto_creation, submit_self_assessment,
};

#[test]
fn test_my_evaluations_covers_both_sides() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let carla = seed_user(&mut persistence, "Carla", "carla@example.com");
    assign_manager(&mut persistence, ana, carla);
    assign_manager(&mut persistence, bruno, carla);

    seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    run_auto_creation(&mut persistence, ten_days_before("2026-03-15"), &admin(), &cause())
        .unwrap();

    // Ana sees hers; Carla (the evaluator) sees both.
    let ana_view = list_my_evaluations(&mut persistence, &colaborador(ana)).unwrap();
    assert_eq!(ana_view.avaliacoes.len(), 1);
    assert_eq!(ana_view.avaliacoes[0].funcionario_id, ana);

    let carla_view = list_my_evaluations(&mut persistence, &gerente(carla)).unwrap();
    assert_eq!(carla_view.avaliacoes.len(), 2);
}

#[test]
fn test_pending_reviews_only_awaiting_status_and_assigned_manager() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let carla = seed_user(&mut persistence, "Carla", "carla@example.com");
    let diego = seed_user(&mut persistence, "Diego", "diego@example.com");
    assign_manager(&mut persistence, ana, carla);
    assign_manager(&mut persistence, bruno, diego);

    let periodo_id = seed_period(&mut persistence, "Avaliação 2026/1", "2026-03-15");
    run_auto_creation(&mut persistence, ten_days_before("2026-03-15"), &admin(), &cause())
        .unwrap();

    let ana_evaluation = persistence.evaluation_id_for(ana, periodo_id).unwrap().unwrap();
    submit_self_assessment(
        &mut persistence,
        ana_evaluation,
        complete_answers(),
        &colaborador(ana),
        cause(),
    )
    .unwrap();

    // Carla has exactly Ana's submission pending; Diego has none, because
    // Bruno never submitted.
    let carla_pending = list_pending_reviews(&mut persistence, &gerente(carla)).unwrap();
    assert_eq!(carla_pending.avaliacoes.len(), 1);
    assert_eq!(carla_pending.avaliacoes[0].funcionario_id, ana);
    assert_eq!(carla_pending.avaliacoes[0].status, "aguardando_aprovacao");

    let diego_pending = list_pending_reviews(&mut persistence, &gerente(diego)).unwrap();
    assert!(diego_pending.avaliacoes.is_empty());
}

#[test]
fn test_active_and_upcoming_periods_paired_with_evaluations() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    assign_manager(&mut persistence, ana, bruno);

    let current_id = seed_period(&mut persistence, "Corrente", "2026-03-15");
    seed_period(&mut persistence, "Futuro", "2026-09-15");

    run_auto_creation(&mut persistence, ten_days_before("2026-03-15"), &admin(), &cause())
        .unwrap();

    let today = parse_date("2026-03-10").unwrap();

    // Ana has an evaluation in the current period, none in the future one.
    let active = list_active_periods_for_user(&mut persistence, today, &colaborador(ana)).unwrap();
    assert_eq!(active.periodos.len(), 1);
    assert_eq!(active.periodos[0].periodo.periodo_id, current_id);
    assert!(active.periodos[0].avaliacao_id.is_some());

    let upcoming =
        list_upcoming_periods_for_user(&mut persistence, today, &colaborador(ana)).unwrap();
    assert_eq!(upcoming.periodos.len(), 1);
    assert_eq!(upcoming.periodos[0].periodo.nome, "Futuro");
    assert_eq!(upcoming.periodos[0].avaliacao_id, None);

    // An unmapped user sees the same periods with no evaluation paired.
    let zeca = seed_user(&mut persistence, "Zeca", "zeca@example.com");
    let active_zeca =
        list_active_periods_for_user(&mut persistence, today, &colaborador(zeca)).unwrap();
    assert_eq!(active_zeca.periodos.len(), 1);
    assert_eq!(active_zeca.periodos[0].avaliacao_id, None);
}
