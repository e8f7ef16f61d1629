use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(AccountUser::Email)
                            .string_len(255)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(AccountUser::Password)
                            .string_len(255)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(AccountUser::DateOfBirth)
                            .date()
                            .not_null()
                    )
                    .col(ColumnDef::new(AccountUser::FirstName).string_len(30).not_null().default(""))
                    .col(ColumnDef::new(AccountUser::LastName).string_len(30).not_null().default(""))
                    .col(ColumnDef::new(AccountUser::Nickname).string_len(30).not_null().default(""))
                    .col(ColumnDef::new(AccountUser::Username).string_len(20).not_null().default(""))
                    .col(ColumnDef::new(AccountUser::PhoneNumber).string_len(15).null())
                    .col(
                        ColumnDef::new(AccountUser::IsActive)
                            .boolean()
                            .not_null()
                            .default(true)
                    )
                    .col(
                        ColumnDef::new(AccountUser::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false)
                    )
                    .col(
                        ColumnDef::new(AccountUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(AccountUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .to_owned()
            )
            .await?;

        // email is the identity field
        manager
            .create_index(
                Index::create()
                    .name("uk_account_user_email")
                    .table(AccountUser::Table)
                    .col(AccountUser::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())

    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uk_account_user_email")
                    .table(AccountUser::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AccountUser::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AccountUser {
    Table,
    Id,
    Email,
    Password,
    DateOfBirth,
    FirstName,
    LastName,
    Nickname,
    Username,
    PhoneNumber,
    IsActive,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}
