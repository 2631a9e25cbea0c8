// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory-mirror mutations.
//!
//! The portal's user directory is the source of truth; this table is the
//! snapshot the evaluation core works against, seeded by administrators.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use avalia_domain::DirectoryUser;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {

/// Inserts a directory user and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate email).
pub fn insert_user(conn: &mut _, user: &DirectoryUser) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::first_name.eq(&user.first_name),
            users::last_name.eq(&user.last_name),
            users::email.eq(&user.email),
            users::position.eq(user.position.as_deref()),
            users::department.eq(user.department.as_deref()),
            users::role.eq(&user.role),
            users::is_authorized.eq(i32::from(user.is_authorized)),
            users::active.eq(i32::from(user.active)),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    info!(user_id, email = %user.email, "Registered directory user");
    Ok(user_id)
}

}
