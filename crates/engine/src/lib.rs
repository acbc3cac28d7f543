use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use budgets::BudgetSnapshot;
pub use error::EngineError;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
pub use simulation::{Expense, ShadowExpense, Simulation, simulate};

mod budget_expenses;
mod budgets;
mod error;
mod rules;
mod simulation;
mod tips;

type ResultEngine<T> = Result<T, EngineError>;

/// The engine wraps the pure [`simulate`] computation with the append-only
/// snapshot store.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Runs the shadow simulation and stores the resulting snapshot.
    ///
    /// The snapshot row and its expense lines are inserted in a single
    /// database transaction. The advisory tip is returned alongside the
    /// snapshot and is never persisted.
    pub async fn create_budget(
        &self,
        user_id: &str,
        income: f64,
        expenses: Vec<Expense>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<(BudgetSnapshot, String)> {
        let sim = simulation::simulate(income, &expenses)?;

        let snapshot = BudgetSnapshot {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            income,
            expenses,
            total_expenses: sim.total_expenses,
            original_balance: sim.original_balance,
            shadow_expenses: sim.shadow_expenses,
            shadow_balance: sim.shadow_balance,
            created_at,
        };

        let db_tx = self.database.begin().await?;
        budgets::ActiveModel::from(&snapshot).insert(&db_tx).await?;
        for (position, (expense, shadow)) in snapshot
            .expenses
            .iter()
            .zip(&snapshot.shadow_expenses)
            .enumerate()
        {
            let line = budget_expenses::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                budget_id: ActiveValue::Set(snapshot.id.to_string()),
                position: ActiveValue::Set(position as i32),
                category: ActiveValue::Set(expense.category.clone()),
                amount: ActiveValue::Set(expense.amount),
                shadow_amount: ActiveValue::Set(shadow.amount),
            };
            line.insert(&db_tx).await?;
        }
        db_tx.commit().await?;

        Ok((snapshot, sim.tip))
    }

    /// Lists stored snapshots for a user, newest first.
    pub async fn list_budgets(&self, user_id: &str) -> ResultEngine<Vec<BudgetSnapshot>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let lines = budget_expenses::Entity::find()
                .filter(budget_expenses::Column::BudgetId.eq(model.id.clone()))
                .order_by_asc(budget_expenses::Column::Position)
                .all(&self.database)
                .await?;
            out.push(BudgetSnapshot::try_from_rows(model, lines)?);
        }
        Ok(out)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
