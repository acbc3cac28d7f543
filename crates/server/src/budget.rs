//! Budget API endpoints

use api_types::budget::{
    BudgetCreated, BudgetListResponse, BudgetNew, BudgetView, ExpenseView, ShadowExpenseView,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

fn view(snapshot: engine::BudgetSnapshot) -> BudgetView {
    BudgetView {
        id: snapshot.id,
        income: snapshot.income,
        expenses: snapshot
            .expenses
            .into_iter()
            .map(|e| ExpenseView {
                category: e.category,
                amount: e.amount,
            })
            .collect(),
        total_expenses: snapshot.total_expenses,
        original_balance: snapshot.original_balance,
        shadow_expenses: snapshot
            .shadow_expenses
            .into_iter()
            .map(|e| ShadowExpenseView {
                category: e.category,
                amount: e.amount,
            })
            .collect(),
        shadow_balance: snapshot.shadow_balance,
        created_at: snapshot.created_at,
    }
}

/// Handle requests for running a shadow simulation.
///
/// The snapshot is persisted before the response is produced; the tip is
/// returned in the response only.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetCreated>), ServerError> {
    let expenses = payload
        .expenses
        .into_iter()
        .map(|e| engine::Expense {
            category: e.category,
            amount: e.amount,
        })
        .collect();

    let (snapshot, tip) = state
        .engine
        .create_budget(&user.username, payload.income, expenses, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BudgetCreated {
            tip,
            budget: view(snapshot),
        }),
    ))
}

/// Handle requests for listing stored snapshots, newest first.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let budgets = state.engine.list_budgets(&user.username).await?;

    Ok(Json(BudgetListResponse {
        budgets: budgets.into_iter().map(view).collect(),
    }))
}
