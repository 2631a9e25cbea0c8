// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A stored value could not be converted back into a domain value.
    ReconstructionError(String),
    /// The auto-creation trigger has already executed for this period.
    ///
    /// Raised by the compare-and-set claim; the losing invocation of a
    /// concurrent race sees this and creates nothing.
    AutoCreationAlreadyExecuted {
        /// The period that was already claimed.
        periodo_id: i64,
    },
    /// A period cannot be deleted while evaluations reference it.
    PeriodHasEvaluations {
        /// The period that was targeted.
        periodo_id: i64,
        /// How many evaluations reference it.
        count: usize,
    },
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ReconstructionError(msg) => {
                write!(f, "State reconstruction error: {msg}")
            }
            Self::AutoCreationAlreadyExecuted { periodo_id } => {
                write!(
                    f,
                    "Auto-creation already executed for period {periodo_id}"
                )
            }
            Self::PeriodHasEvaluations { periodo_id, count } => {
                write!(
                    f,
                    "Period {periodo_id} cannot be deleted: {count} evaluation(s) reference it"
                )
            }
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<avalia_domain::DomainError> for PersistenceError {
    fn from(err: avalia_domain::DomainError) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}
