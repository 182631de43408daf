use sea_query::{ColumnDef, SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement};

use crate::table::User;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .col(
            ColumnDef::new(User::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(User::Email)
                .string()
                .not_null()
                .string_len(254),
        )
        .col(
            ColumnDef::new(User::Username)
                .string()
                .not_null()
                .string_len(150),
        )
        .col(
            ColumnDef::new(User::FirstName)
                .string()
                .not_null()
                .string_len(150),
        )
        .col(
            ColumnDef::new(User::LastName)
                .string()
                .not_null()
                .string_len(150),
        )
        .col(ColumnDef::new(User::Password).string().not_null())
        .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(User::Table).to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder)
);

// sea-query cannot express a collation on an index column.
operation!(
    CreateUk1,
    r#"CREATE UNIQUE INDEX "uk_user_email" ON "user" ("email" COLLATE NOCASE)"#.to_owned(),
    r#"DROP INDEX "uk_user_email""#.to_owned()
);

operation!(
    CreateUk2,
    r#"CREATE UNIQUE INDEX "uk_user_username" ON "user" ("username" COLLATE NOCASE)"#.to_owned(),
    r#"DROP INDEX "uk_user_username""#.to_owned()
);
