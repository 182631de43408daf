use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Follow, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Follow::Table)
        .col(
            ColumnDef::new(Follow::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Follow::AuthorId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Follow::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_follow_user")
                .from(Follow::Table, Follow::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_follow_author")
                .from(Follow::Table, Follow::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Follow::Table).to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder)
);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_follow_user_author")
        .table(Follow::Table)
        .unique()
        .col(Follow::UserId)
        .col(Follow::AuthorId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_follow_user_author")
        .table(Follow::Table)
        .to_owned()
}

operation!(
    CreateUk1,
    create_uk_1().to_string(SqliteQueryBuilder),
    drop_uk_1().to_string(SqliteQueryBuilder)
);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_follow_author")
        .table(Follow::Table)
        .col(Follow::AuthorId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_follow_author")
        .table(Follow::Table)
        .to_owned()
}

operation!(
    CreateIdx1,
    create_idx_1().to_string(SqliteQueryBuilder),
    drop_idx_1().to_string(SqliteQueryBuilder)
);
