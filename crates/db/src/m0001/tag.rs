use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, SqliteQueryBuilder, Table,
    TableCreateStatement, TableDropStatement,
};

use crate::table::Tag;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Tag::Name).string().not_null().string_len(16))
        .col(ColumnDef::new(Tag::Color).string().not_null().string_len(7))
        .col(ColumnDef::new(Tag::Slug).string().not_null().string_len(200))
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder)
);

fn create_uk(name: &str, col: Tag) -> IndexCreateStatement {
    Index::create()
        .name(name)
        .table(Tag::Table)
        .unique()
        .col(col)
        .to_owned()
}

fn drop_uk(name: &str) -> IndexDropStatement {
    Index::drop().name(name).table(Tag::Table).to_owned()
}

operation!(
    CreateUk1,
    create_uk("uk_tag_name", Tag::Name).to_string(SqliteQueryBuilder),
    drop_uk("uk_tag_name").to_string(SqliteQueryBuilder)
);

operation!(
    CreateUk2,
    create_uk("uk_tag_color", Tag::Color).to_string(SqliteQueryBuilder),
    drop_uk("uk_tag_color").to_string(SqliteQueryBuilder)
);

operation!(
    CreateUk3,
    create_uk("uk_tag_slug", Tag::Slug).to_string(SqliteQueryBuilder),
    drop_uk("uk_tag_slug").to_string(SqliteQueryBuilder)
);
