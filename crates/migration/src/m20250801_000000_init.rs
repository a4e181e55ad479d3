//! Initial schema: the full Centavo ledger in one migration.
//!
//! - `users`: authentication
//! - `accounts`: cash accounts (checking/savings) with a denormalized balance
//! - `payees`: entities the user owes money to
//! - `payee_accounts`: individual debt instruments held by a payee
//! - `deposits`, `payments`, `transfers`: movement records
//!
//! Cross-record references other than ownership are plain string columns, not
//! foreign keys: a payee may be deleted while its accounts remain, and the
//! read path resolves the dangling reference to an "Unknown" display name.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    UserId,
    Kind,
    Nickname,
    BalanceMinor,
}

#[derive(Iden)]
enum Payees {
    Table,
    Id,
    UserId,
    Name,
}

#[derive(Iden)]
enum PayeeAccounts {
    Table,
    Id,
    UserId,
    PayeeId,
    Label,
    AccountNumber,
    Category,
    InterestMode,
    InterestRate,
    CurrentBalanceMinor,
    PrincipalBalanceMinor,
    AccruedInterestMinor,
    DueDate,
    LastInterestAccrual,
    LoanTermMonths,
    PromoTermMonths,
    MinPaymentMinor,
}

#[derive(Iden)]
enum Deposits {
    Table,
    Id,
    AccountId,
    Source,
    AmountMinor,
    Date,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    CheckingAccountId,
    PayeeAccountId,
    AmountMinor,
    Date,
}

#[derive(Iden)]
enum Transfers {
    Table,
    Id,
    FromAccountId,
    ToAccountId,
    AmountMinor,
    Date,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::UserId).string().not_null())
                    .col(ColumnDef::new(Accounts::Kind).string().not_null())
                    .col(ColumnDef::new(Accounts::Nickname).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-user_id")
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-user_id")
                    .table(Accounts::Table)
                    .col(Accounts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payees::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Payees::UserId).string().not_null())
                    .col(ColumnDef::new(Payees::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payees-user_id")
                            .from(Payees::Table, Payees::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payees-user_id")
                    .table(Payees::Table)
                    .col(Payees::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PayeeAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PayeeAccounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PayeeAccounts::UserId).string().not_null())
                    .col(ColumnDef::new(PayeeAccounts::PayeeId).string().not_null())
                    .col(ColumnDef::new(PayeeAccounts::Label).string().not_null())
                    .col(ColumnDef::new(PayeeAccounts::AccountNumber).string())
                    .col(ColumnDef::new(PayeeAccounts::Category).string().not_null())
                    .col(
                        ColumnDef::new(PayeeAccounts::InterestMode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PayeeAccounts::InterestRate).double())
                    .col(ColumnDef::new(PayeeAccounts::CurrentBalanceMinor).big_integer())
                    .col(ColumnDef::new(PayeeAccounts::PrincipalBalanceMinor).big_integer())
                    .col(ColumnDef::new(PayeeAccounts::AccruedInterestMinor).big_integer())
                    .col(ColumnDef::new(PayeeAccounts::DueDate).date())
                    .col(ColumnDef::new(PayeeAccounts::LastInterestAccrual).date())
                    .col(ColumnDef::new(PayeeAccounts::LoanTermMonths).integer())
                    .col(ColumnDef::new(PayeeAccounts::PromoTermMonths).integer())
                    .col(ColumnDef::new(PayeeAccounts::MinPaymentMinor).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payee_accounts-user_id")
                            .from(PayeeAccounts::Table, PayeeAccounts::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payee_accounts-user_id")
                    .table(PayeeAccounts::Table)
                    .col(PayeeAccounts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payee_accounts-payee_id")
                    .table(PayeeAccounts::Table)
                    .col(PayeeAccounts::PayeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deposits::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deposits::AccountId).string().not_null())
                    .col(ColumnDef::new(Deposits::Source).string().not_null())
                    .col(
                        ColumnDef::new(Deposits::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deposits::Date).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-deposits-account_id-date")
                    .table(Deposits::Table)
                    .col(Deposits::AccountId)
                    .col(Deposits::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::CheckingAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::PayeeAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::Date).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-payee_account_id-date")
                    .table(Payments::Table)
                    .col(Payments::PayeeAccountId)
                    .col(Payments::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transfers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transfers::FromAccountId).string().not_null())
                    .col(ColumnDef::new(Transfers::ToAccountId).string().not_null())
                    .col(
                        ColumnDef::new(Transfers::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transfers::Date).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-from_account_id")
                    .table(Transfers::Table)
                    .col(Transfers::FromAccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PayeeAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
