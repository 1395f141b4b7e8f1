use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Queries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Queries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Queries::CaseType).string().not_null())
                    .col(ColumnDef::new(Queries::CaseNumber).string().not_null())
                    .col(ColumnDef::new(Queries::FilingYear).string().not_null())
                    .col(ColumnDef::new(Queries::QueryTime).string().not_null())
                    .col(ColumnDef::new(Queries::RawResponse).text().null())
                    .col(ColumnDef::new(Queries::Status).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Queries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Queries {
    Table,
    Id,
    CaseType,
    CaseNumber,
    FilingYear,
    QueryTime,
    RawResponse,
    Status,
}
