use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251112_000001_create_etchings_table::Migration),
            Box::new(m20251112_000002_create_submitters_table::Migration),
            Box::new(m20251112_000003_create_partslog_table::Migration),
        ]
    }
}

// Every table is created IF NOT EXISTS so a database file written by an
// earlier deployment (without the seaql_migrations bookkeeping) is adopted as-is.

mod m20251112_000001_create_etchings_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251112_000001_create_etchings_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Etchings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Etchings::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Etchings::PartName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Etchings::Etching)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Etchings::Status)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Etchings::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Etchings {
        Table,
        Id,
        PartName,
        Etching,
        Status,
    }
}

mod m20251112_000002_create_submitters_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251112_000002_create_submitters_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Submitters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Submitters::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Submitters::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Submitters::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Submitters {
        Table,
        Id,
        Name,
    }
}

mod m20251112_000003_create_partslog_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251112_000003_create_partslog_table"
        }
    }

    fn text_column(column: PartsLog) -> ColumnDef {
        ColumnDef::new(column)
            .string()
            .not_null()
            .default("")
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PartsLog::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PartsLog::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PartsLog::Ts).big_integer().not_null())
                        .col(text_column(PartsLog::PartName))
                        .col(text_column(PartsLog::Etching))
                        .col(text_column(PartsLog::LastMoveDate))
                        .col(text_column(PartsLog::LastLocation))
                        .col(text_column(PartsLog::ReasonToLast))
                        .col(text_column(PartsLog::CurrentMoveDate))
                        .col(text_column(PartsLog::NextLocation))
                        .col(text_column(PartsLog::ReasonToNext))
                        .col(text_column(PartsLog::PartStatus))
                        .col(text_column(PartsLog::Issues))
                        .col(text_column(PartsLog::Dept))
                        .col(text_column(PartsLog::SubmittedBy))
                        .to_owned(),
                )
                .await?;

            // Listings are always newest first
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_partslog_ts")
                        .table(PartsLog::Table)
                        .col(PartsLog::Ts)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PartsLog::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum PartsLog {
        #[sea_orm(iden = "partslog")]
        Table,
        Id,
        #[sea_orm(iden = "_ts")]
        Ts,
        PartName,
        Etching,
        LastMoveDate,
        LastLocation,
        ReasonToLast,
        CurrentMoveDate,
        NextLocation,
        ReasonToNext,
        PartStatus,
        Issues,
        Dept,
        SubmittedBy,
    }
}
