//! The shadow simulation.
//!
//! Given an income and an ordered list of expenses, derive an alternate
//! spending scenario by applying per-category reduction rules, recompute both
//! balances and pick one advisory tip from the highest-spending category of
//! the actual (non-shadow) expenses.
//!
//! The whole computation is pure and single-pass: either the full
//! [`Simulation`] is produced or an [`InvalidInput`] error is raised before
//! any output is built.
//!
//! [`InvalidInput`]: crate::EngineError::InvalidInput

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, rules, tips};

/// A single expense line as submitted by the user.
///
/// The category is a free-form label; it is matched case-sensitively against
/// the reduction and tip tables, and labels with no match are valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
}

/// A reduced expense line in the shadow scenario.
///
/// Amounts are rounded to whole units, half away from zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowExpense {
    pub category: String,
    pub amount: i64,
}

/// Full result of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub total_expenses: f64,
    pub original_balance: f64,
    /// One entry per input expense, same order.
    pub shadow_expenses: Vec<ShadowExpense>,
    pub shadow_total: i64,
    pub shadow_balance: f64,
    pub tip: String,
}

/// Runs the shadow simulation for an income and a non-empty expense list.
///
/// Negative income is accepted and passed through arithmetically; expense
/// amounts must be finite and non-negative.
pub fn simulate(income: f64, expenses: &[Expense]) -> ResultEngine<Simulation> {
    if !income.is_finite() {
        return Err(EngineError::InvalidInput(
            "income must be a finite number".to_string(),
        ));
    }
    if expenses.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one expense is required".to_string(),
        ));
    }
    for expense in expenses {
        if !expense.amount.is_finite() || expense.amount < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "amount for \"{}\" must be a finite non-negative number",
                expense.category
            )));
        }
    }

    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let original_balance = income - total_expenses;

    let shadow_expenses: Vec<ShadowExpense> = expenses
        .iter()
        .map(|expense| ShadowExpense {
            category: expense.category.clone(),
            // f64::round ties away from zero; amounts are non-negative here,
            // so half-way cases round up.
            amount: (expense.amount * rules::multiplier(&expense.category)).round() as i64,
        })
        .collect();
    let shadow_total: i64 = shadow_expenses.iter().map(|e| e.amount).sum();
    let shadow_balance = income - shadow_total as f64;

    // Strict greater-than keeps the first maximum on ties.
    let mut highest = &expenses[0];
    for expense in &expenses[1..] {
        if expense.amount > highest.amount {
            highest = expense;
        }
    }
    let tip = tips::tip_for(&highest.category).to_string();

    Ok(Simulation {
        total_expenses,
        original_balance,
        shadow_expenses,
        shadow_total,
        shadow_balance,
        tip,
    })
}
