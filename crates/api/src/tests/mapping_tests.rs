// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the manager-mapping handlers: self-mapping rejection, the
//! latest-write-wins invariant, and bulk-save partial reporting.

use crate::tests::helpers::{admin, cause, seed_user, test_persistence};
use crate::{
    ApiError, BulkSetMappingsRequest, MappingPair, SetMappingRequest, bulk_set_mappings,
    deactivate_mapping, list_mappings, set_mapping,
};

#[test]
fn test_self_mapping_rejected_and_nothing_written() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");

    let result = set_mapping(
        &mut persistence,
        &SetMappingRequest {
            colaborador_id: ana,
            gerente_id: ana,
        },
        &admin(),
        cause(),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "no_self_mapping");
        }
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }

    // No mapping row was created as a side effect.
    let listing = list_mappings(&mut persistence, &admin()).unwrap();
    assert!(listing.mapeamentos.is_empty());
}

#[test]
fn test_set_mapping_latest_write_wins() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let carla = seed_user(&mut persistence, "Carla", "carla@example.com");

    for gerente_id in [bruno, carla] {
        set_mapping(
            &mut persistence,
            &SetMappingRequest {
                colaborador_id: ana,
                gerente_id,
            },
            &admin(),
            cause(),
        )
        .unwrap();
    }

    let listing = list_mappings(&mut persistence, &admin()).unwrap();
    let rows: Vec<_> = listing
        .mapeamentos
        .iter()
        .filter(|m| m.colaborador_id == ana)
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].gerente_id, carla);
}

#[test]
fn test_self_mapping_keeps_previous_mapping_intact() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    set_mapping(
        &mut persistence,
        &SetMappingRequest {
            colaborador_id: ana,
            gerente_id: bruno,
        },
        &admin(),
        cause(),
    )
    .unwrap();

    let rejected = set_mapping(
        &mut persistence,
        &SetMappingRequest {
            colaborador_id: ana,
            gerente_id: ana,
        },
        &admin(),
        cause(),
    );
    assert!(rejected.is_err());

    let listing = list_mappings(&mut persistence, &admin()).unwrap();
    assert_eq!(listing.mapeamentos.len(), 1);
    assert_eq!(listing.mapeamentos[0].gerente_id, bruno);
}

#[test]
fn test_bulk_save_reports_partial_failure() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");
    let carla = seed_user(&mut persistence, "Carla", "carla@example.com");
    let gerente = seed_user(&mut persistence, "Diego", "diego@example.com");

    let response = bulk_set_mappings(
        &mut persistence,
        &BulkSetMappingsRequest {
            mapeamentos: vec![
                MappingPair {
                    colaborador_id: ana,
                    gerente_id: gerente,
                },
                // Self-mapping: fails, must not abort the batch.
                MappingPair {
                    colaborador_id: bruno,
                    gerente_id: bruno,
                },
                MappingPair {
                    colaborador_id: carla,
                    gerente_id: gerente,
                },
            ],
        },
        &admin(),
        cause(),
    )
    .unwrap();

    assert_eq!(response.salvos, 2);
    assert_eq!(response.com_erro, 1);
    assert_eq!(response.falhas.len(), 1);
    assert_eq!(response.falhas[0].colaborador_id, bruno);
    assert_eq!(response.message, "2 salvos, 1 com erro");

    // The pairs after the failure were still applied.
    let listing = list_mappings(&mut persistence, &admin()).unwrap();
    assert_eq!(listing.mapeamentos.len(), 2);
}

#[test]
fn test_deactivate_mapping() {
    let mut persistence = test_persistence();
    let ana = seed_user(&mut persistence, "Ana", "ana@example.com");
    let bruno = seed_user(&mut persistence, "Bruno", "bruno@example.com");

    set_mapping(
        &mut persistence,
        &SetMappingRequest {
            colaborador_id: ana,
            gerente_id: bruno,
        },
        &admin(),
        cause(),
    )
    .unwrap();

    deactivate_mapping(&mut persistence, ana, &admin(), cause()).unwrap();

    let listing = list_mappings(&mut persistence, &admin()).unwrap();
    assert_eq!(listing.mapeamentos.len(), 1);
    assert!(!listing.mapeamentos[0].ativo);

    let missing = deactivate_mapping(&mut persistence, 9_999, &admin(), cause());
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}
