//! Budget snapshot primitives.
//!
//! A `BudgetSnapshot` records one simulation run: the submitted budget, the
//! derived shadow scenario and both balances. Snapshots are append-only and
//! never mutated after creation.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Expense, ResultEngine, ShadowExpense};

use super::budget_expenses;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub id: Uuid,
    pub user_id: String,
    pub income: f64,
    pub expenses: Vec<Expense>,
    pub total_expenses: f64,
    pub original_balance: f64,
    /// One entry per expense, same order.
    pub shadow_expenses: Vec<ShadowExpense>,
    pub shadow_balance: f64,
    pub created_at: DateTime<Utc>,
}

impl BudgetSnapshot {
    /// Rebuilds a snapshot from its stored row and expense lines.
    ///
    /// Lines must already be ordered by `position`.
    pub(crate) fn try_from_rows(
        model: Model,
        lines: Vec<budget_expenses::Model>,
    ) -> ResultEngine<Self> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?;

        let mut expenses = Vec::with_capacity(lines.len());
        let mut shadow_expenses = Vec::with_capacity(lines.len());
        for line in lines {
            expenses.push(Expense {
                category: line.category.clone(),
                amount: line.amount,
            });
            shadow_expenses.push(ShadowExpense {
                category: line.category,
                amount: line.shadow_amount,
            });
        }

        Ok(Self {
            id,
            user_id: model.user_id,
            income: model.income,
            expenses,
            total_expenses: model.total_expenses,
            original_balance: model.original_balance,
            shadow_expenses,
            shadow_balance: model.shadow_balance,
            created_at: model.created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub income: f64,
    pub total_expenses: f64,
    pub original_balance: f64,
    pub shadow_balance: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_expenses::Entity")]
    Expenses,
}

impl Related<super::budget_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BudgetSnapshot> for ActiveModel {
    fn from(snapshot: &BudgetSnapshot) -> Self {
        Self {
            id: ActiveValue::Set(snapshot.id.to_string()),
            user_id: ActiveValue::Set(snapshot.user_id.clone()),
            income: ActiveValue::Set(snapshot.income),
            total_expenses: ActiveValue::Set(snapshot.total_expenses),
            original_balance: ActiveValue::Set(snapshot.original_balance),
            shadow_balance: ActiveValue::Set(snapshot.shadow_balance),
            created_at: ActiveValue::Set(snapshot.created_at),
        }
    }
}
