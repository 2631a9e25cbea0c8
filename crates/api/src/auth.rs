// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Session handling belongs to the surrounding portal; the core trusts the
//! caller identity it is handed. What is enforced here is role-based
//! authorization for administrative operations. Subject/evaluator identity
//! checks on workflow transitions live in the transition engine, so that
//! wrong-actor and wrong-state rejections stay distinct.

use std::str::FromStr;

use avalia_audit::Actor;

use crate::error::AuthError;

/// Caller roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrators configure periods, mappings, the directory mirror,
    /// and may run the trigger or reassign in-flight evaluations.
    Admin,
    /// Managers review the evaluations assigned to them.
    Gerente,
    /// Collaborators fill their own self-assessments.
    Colaborador,
}

impl Role {
    /// Returns the audit actor-type string for this role.
    #[must_use]
    pub const fn as_actor_type(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Gerente => "gerente",
            Self::Colaborador => "colaborador",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "gerente" | "manager" => Ok(Self::Gerente),
            "colaborador" | "user" => Ok(Self::Colaborador),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role: '{other}'"),
            }),
        }
    }
}

/// An authenticated caller with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's directory user id.
    pub user_id: i64,
    /// The role assigned to this caller.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The caller's directory user id
    /// * `role` - The role assigned to this caller
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Converts this caller into an audit `Actor`.
    ///
    /// This is used when recording audit events to attribute actions to the
    /// authenticated caller.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(
            self.user_id.to_string(),
            self.role.as_actor_type().to_string(),
        )
    }
}

/// Stub authentication for the request-supplied identity seam.
///
/// The surrounding portal authenticates sessions; requests reaching this
/// core carry the already-resolved identity and role. A scheduled trigger
/// run authenticates the same way, as an admin-role system caller.
///
/// # Errors
///
/// Returns an error if the user id is not a plausible identity.
pub fn authenticate_stub(user_id: i64, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if user_id <= 0 {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("Invalid user id: {user_id}"),
        });
    }
    Ok(AuthenticatedActor::new(user_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Gerente | Role::Colaborador => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may manage manager mappings.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_mappings(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_mappings")
    }

    /// Checks if an actor may create, update or delete periods.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_periods(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_periods")
    }

    /// Checks if an actor may run the auto-creation trigger.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_run_auto_creation(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "run_auto_creation")
    }

    /// Checks if an actor may reassign an in-flight evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_reassign_evaluator(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "reassign_evaluator")
    }

    /// Checks if an actor may manage the directory mirror.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_directory(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_directory")
    }

    /// Checks if an actor may view a given evaluation.
    ///
    /// The subject, the assigned evaluator, and administrators may view an
    /// evaluation; everyone else is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is none of the above.
    pub fn authorize_view_evaluation(
        actor: &AuthenticatedActor,
        funcionario_id: i64,
        avaliador_id: i64,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin
            || actor.user_id == funcionario_id
            || actor.user_id == avaliador_id
        {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_evaluation"),
                required_role: String::from("subject, assigned evaluator or Admin"),
            })
        }
    }
}
