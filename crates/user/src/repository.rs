use foodgram_db::table::{Follow, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteExecutor, prelude::FromRow};

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

pub enum FindType {
    Id(String),
    Email(String),
    Username(String),
}

pub(crate) async fn find<'c>(
    executor: impl SqliteExecutor<'c>,
    arg_type: FindType,
) -> foodgram_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([User::Id, User::Email, User::Username, User::Password])
        .from(User::Table)
        .limit(1)
        .to_owned();

    // Uniqueness of email and username is case-insensitive, so are lookups.
    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::cust_with_values(
            r#""email" = ? COLLATE NOCASE"#,
            [email],
        )),
        FindType::Username(username) => statement.and_where(Expr::cust_with_values(
            r#""username" = ? COLLATE NOCASE"#,
            [username],
        )),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) struct CreateInput {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub(crate) async fn create<'c>(
    executor: impl SqliteExecutor<'c>,
    input: CreateInput,
) -> foodgram_shared::Result<()> {
    let now = foodgram_shared::timestamp()?;
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(())
}

pub(crate) async fn is_following<'c>(
    executor: impl SqliteExecutor<'c>,
    user_id: &str,
    author_id: &str,
) -> foodgram_shared::Result<bool> {
    let statement = Query::select()
        .column(Follow::AuthorId)
        .from(Follow::Table)
        .and_where(Expr::col(Follow::UserId).eq(user_id))
        .and_where(Expr::col(Follow::AuthorId).eq(author_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}
