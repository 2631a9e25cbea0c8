// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory-mirror queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use avalia_domain::DirectoryUser;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Row tuple for a directory user, in schema column order.
type UserRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    i32,
    i32,
);

fn user_from_row(row: UserRow) -> DirectoryUser {
    let (user_id, first_name, last_name, email, position, department, role, is_authorized, active) =
        row;
    DirectoryUser {
        user_id: Some(user_id),
        first_name,
        last_name,
        email,
        position,
        department,
        role,
        is_authorized: is_authorized != 0,
        active: active != 0,
    }
}

backend_fn! {

/// Retrieves a directory user by id.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn get_user(conn: &mut _, user_id: i64) -> Result<DirectoryUser, PersistenceError> {
    let row: UserRow = users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id} does not exist")))?;
    Ok(user_from_row(row))
}

}

backend_fn! {

/// Lists every directory user, ordered by first name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(conn: &mut _) -> Result<Vec<DirectoryUser>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::first_name.asc())
        .load::<UserRow>(conn)?;
    Ok(rows.into_iter().map(user_from_row).collect())
}

}

backend_fn! {

/// Lists the trigger's eligible collaborator set: authorized, active users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_eligible_users(conn: &mut _) -> Result<Vec<DirectoryUser>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::is_authorized.eq(1))
        .filter(users::active.eq(1))
        .order(users::first_name.asc())
        .load::<UserRow>(conn)?;
    Ok(rows.into_iter().map(user_from_row).collect())
}

}
