use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::AuthorId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Recipe::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Recipe::Image)
                .string()
                .not_null()
                .string_len(255)
                .default(""),
        )
        .col(ColumnDef::new(Recipe::Description).text().not_null())
        .col(ColumnDef::new(Recipe::CookingTime).integer().not_null())
        .col(ColumnDef::new(Recipe::PubDate).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_author")
                .from(Recipe::Table, Recipe::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder)
);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_pub_date")
        .table(Recipe::Table)
        .col(Recipe::PubDate)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_pub_date")
        .table(Recipe::Table)
        .to_owned()
}

operation!(
    CreateIdx1,
    create_idx_1().to_string(SqliteQueryBuilder),
    drop_idx_1().to_string(SqliteQueryBuilder)
);

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_author_id")
        .table(Recipe::Table)
        .col(Recipe::AuthorId)
        .col(Recipe::PubDate)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_author_id")
        .table(Recipe::Table)
        .to_owned()
}

operation!(
    CreateIdx2,
    create_idx_2().to_string(SqliteQueryBuilder),
    drop_idx_2().to_string(SqliteQueryBuilder)
);
