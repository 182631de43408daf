use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, SqliteQueryBuilder, Table,
    TableCreateStatement, TableDropStatement,
};

use crate::table::Ingredient;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Ingredient::MeasurementUnit)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Ingredient::SearchName)
                .string()
                .not_null()
                .string_len(100),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder)
);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .unique()
        .col(Ingredient::Name)
        .col(Ingredient::MeasurementUnit)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .to_owned()
}

operation!(
    CreateUk1,
    create_uk_1().to_string(SqliteQueryBuilder),
    drop_uk_1().to_string(SqliteQueryBuilder)
);
