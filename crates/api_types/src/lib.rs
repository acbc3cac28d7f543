use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod budget {
    use super::*;

    /// A single expense line submitted for simulation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Free-form label, matched case-sensitively against the rule tables.
        pub category: String,
        pub amount: f64,
    }

    /// Request body for running a shadow simulation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub income: f64,
        pub expenses: Vec<ExpenseNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub category: String,
        pub amount: f64,
    }

    /// A reduced expense line; amounts are whole units.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShadowExpenseView {
        pub category: String,
        pub amount: i64,
    }

    /// A stored budget snapshot.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub income: f64,
        pub expenses: Vec<ExpenseView>,
        pub total_expenses: f64,
        pub original_balance: f64,
        /// One entry per expense, same order.
        pub shadow_expenses: Vec<ShadowExpenseView>,
        pub shadow_balance: f64,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
    }

    /// Response for a newly simulated budget.
    ///
    /// The tip is derived from the highest-spending category of the
    /// submitted expenses; the full snapshot is returned alongside it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreated {
        pub tip: String,
        pub budget: BudgetView,
    }

    /// Response body for listing stored snapshots, newest first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}
