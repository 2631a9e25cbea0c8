// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar rules for evaluation periods.
//!
//! Two rules live here:
//!
//! - **Validation**: a period's window and deadlines must be internally
//!   consistent. `data_inicio <= data_fim`, both deadlines on or before
//!   `data_fim`, and the self-assessment deadline on or before the approval
//!   deadline. Enforced on create and on update.
//! - **Auto-creation due**: the trigger fires for a period once today is
//!   within [`AUTO_CREATION_LEAD_DAYS`] of its end date, provided the period
//!   is active and the trigger has not already run for it.

use crate::dates::{format_date, parse_date};
use crate::error::DomainError;
use crate::types::EvaluationPeriod;
use time::{Date, Duration};

/// How many days before a period's end date the auto-creation trigger
/// becomes due. Also the suggested distance between `data_inicio` and
/// `data_fim`.
pub const AUTO_CREATION_LEAD_DAYS: i64 = 14;

/// Suggests a window start date for a given end date: two weeks earlier.
///
/// The admin form pre-fills `data_inicio` with this value; the field stays
/// editable.
///
/// # Errors
///
/// Returns an error if `data_fim` cannot be parsed or the subtraction
/// overflows the calendar range.
pub fn suggested_data_inicio(data_fim: &str) -> Result<String, DomainError> {
    let fim: Date = parse_date(data_fim)?;
    let inicio: Date = fim
        .checked_sub(Duration::days(AUTO_CREATION_LEAD_DAYS))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("subtracting {AUTO_CREATION_LEAD_DAYS} days from {data_fim}"),
        })?;
    format_date(inicio)
}

/// Validates a period's name, year, window and deadline ordering.
///
/// # Errors
///
/// Returns the first violated rule:
/// - `InvalidPeriodName` for a blank name
/// - `InvalidPeriodYear` for a year outside 2000-2100
/// - `DateParseError` for any malformed date
/// - `PeriodDatesOutOfOrder` when the window is inverted
/// - `DeadlineAfterPeriodEnd` when a deadline falls after `data_fim`
/// - `DeadlinesOutOfOrder` when the self-assessment deadline falls after
///   the approval deadline
pub fn validate_period(period: &EvaluationPeriod) -> Result<(), DomainError> {
    if period.nome.trim().is_empty() {
        return Err(DomainError::InvalidPeriodName(String::from(
            "name must not be blank",
        )));
    }
    if !(2000..=2100).contains(&period.ano) {
        return Err(DomainError::InvalidPeriodYear { ano: period.ano });
    }

    let inicio: Date = parse_date(&period.data_inicio)?;
    let fim: Date = parse_date(&period.data_fim)?;
    let limite_autoavaliacao: Date = parse_date(&period.data_limite_autoavaliacao)?;
    let limite_aprovacao: Date = parse_date(&period.data_limite_aprovacao)?;

    if inicio > fim {
        return Err(DomainError::PeriodDatesOutOfOrder {
            data_inicio: period.data_inicio.clone(),
            data_fim: period.data_fim.clone(),
        });
    }
    if limite_autoavaliacao > fim {
        return Err(DomainError::DeadlineAfterPeriodEnd {
            field: String::from("data_limite_autoavaliacao"),
            deadline: period.data_limite_autoavaliacao.clone(),
            data_fim: period.data_fim.clone(),
        });
    }
    if limite_aprovacao > fim {
        return Err(DomainError::DeadlineAfterPeriodEnd {
            field: String::from("data_limite_aprovacao"),
            deadline: period.data_limite_aprovacao.clone(),
            data_fim: period.data_fim.clone(),
        });
    }
    if limite_autoavaliacao > limite_aprovacao {
        return Err(DomainError::DeadlinesOutOfOrder {
            data_limite_autoavaliacao: period.data_limite_autoavaliacao.clone(),
            data_limite_aprovacao: period.data_limite_aprovacao.clone(),
        });
    }

    Ok(())
}

/// Returns whether the auto-creation trigger is due for a period.
///
/// Due means: the period is active, the trigger has not executed for it,
/// and `today >= data_fim - AUTO_CREATION_LEAD_DAYS`. Evaluated lazily by
/// whoever invokes the trigger (scheduled job or admin "run now"); periods
/// whose window has long passed remain due until executed, so a late run
/// never permanently misses a period.
///
/// # Errors
///
/// Returns an error if `data_fim` cannot be parsed or the lead-day
/// subtraction overflows.
pub fn auto_creation_due(period: &EvaluationPeriod, today: Date) -> Result<bool, DomainError> {
    if !period.ativo || period.criacao_automatica_executada {
        return Ok(false);
    }
    let fim: Date = parse_date(&period.data_fim)?;
    let due_from: Date = fim
        .checked_sub(Duration::days(AUTO_CREATION_LEAD_DAYS))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!(
                "subtracting {AUTO_CREATION_LEAD_DAYS} days from {}",
                period.data_fim
            ),
        })?;
    Ok(today >= due_from)
}
