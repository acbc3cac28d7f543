use sea_orm_migration::prelude::*;

use crate::m20260801_000001_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    UserId,
    Income,
    TotalExpenses,
    OriginalBalance,
    ShadowBalance,
    CreatedAt,
}

#[derive(Iden)]
enum BudgetExpenses {
    Table,
    Id,
    BudgetId,
    Position,
    Category,
    Amount,
    ShadowAmount,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::UserId).string().not_null())
                    .col(ColumnDef::new(Budgets::Income).double().not_null())
                    .col(
                        ColumnDef::new(Budgets::TotalExpenses)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budgets::OriginalBalance)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budgets::ShadowBalance)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budgets::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id-created_at")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BudgetExpenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetExpenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BudgetExpenses::BudgetId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetExpenses::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetExpenses::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetExpenses::Amount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetExpenses::ShadowAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget_expenses-budget_id")
                            .from(BudgetExpenses::Table, BudgetExpenses::BudgetId)
                            .to(Budgets::Table, Budgets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budget_expenses-budget_id")
                    .table(BudgetExpenses::Table)
                    .col(BudgetExpenses::BudgetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BudgetExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        Ok(())
    }
}
