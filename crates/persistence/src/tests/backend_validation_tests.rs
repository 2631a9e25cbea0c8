// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Purpose
//!
//! The purpose of these tests is to ensure:
//! 1. Migrations apply cleanly on all supported backends
//! 2. Foreign key constraints are enforced correctly
//! 3. Unique constraints work as expected
//! 4. Transactions and rollback behavior is consistent
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via
//!   `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `AVALIA_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! business logic: schema creation, constraint enforcement, and the
//! adapter's end-to-end behavior on the second backend. Business logic and
//! domain rules are validated by the standard test suite running against
//! `SQLite`.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;

use crate::Persistence;
use crate::backend::mysql;
use crate::tests::helpers::{NOW, test_user};

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `AVALIA_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("AVALIA_TEST_BACKEND").expect(
        "AVALIA_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "AVALIA_TEST_BACKEND must be 'mariadb'");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(
        result.is_ok(),
        "Failed to apply migrations on MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_mapping_upsert_round_trip() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut persistence =
        Persistence::new_with_mysql(&url).expect("Failed to initialize MariaDB persistence");

    let colaborador = persistence
        .create_directory_user(&test_user("Ana", "ana.mariadb@example.com"))
        .expect("Failed to create user");
    let gerente = persistence
        .create_directory_user(&test_user("Bruno", "bruno.mariadb@example.com"))
        .expect("Failed to create user");

    persistence
        .set_mapping(colaborador, gerente, NOW)
        .expect("Failed to set mapping");
    assert_eq!(
        persistence
            .get_active_mapping(colaborador)
            .expect("Failed to query mapping"),
        Some(gerente)
    );

    // Upsert: the second write replaces the first, no duplicate row.
    persistence
        .set_mapping(colaborador, gerente, NOW)
        .expect("Failed to re-set mapping");
    let rows = persistence
        .list_mappings()
        .expect("Failed to list mappings")
        .into_iter()
        .filter(|m| m.colaborador_id == colaborador)
        .count();
    assert_eq!(rows, 1);
}
