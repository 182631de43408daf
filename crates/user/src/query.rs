use foodgram_db::table::{Follow, User};
use sea_query::{Alias, Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserView {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting user follows this one, false when anonymous.
    pub is_subscribed: bool,
}

impl UserView {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    fn select(viewer: Option<&str>) -> SelectStatement {
        let is_subscribed = match viewer {
            Some(viewer) => Expr::cust_with_values(
                r#"EXISTS (SELECT 1 FROM "follow" WHERE "follow"."user_id" = ? AND "follow"."author_id" = "user"."id")"#,
                [viewer.to_owned()],
            ),
            None => Expr::cust("0"),
        };

        sea_query::Query::select()
            .columns([
                (User::Table, User::Email),
                (User::Table, User::Id),
                (User::Table, User::Username),
                (User::Table, User::FirstName),
                (User::Table, User::LastName),
            ])
            .expr_as(is_subscribed, Alias::new("is_subscribed"))
            .from(User::Table)
            .to_owned()
    }

    pub async fn find(
        &self,
        id: impl Into<String>,
        viewer: Option<&str>,
    ) -> anyhow::Result<Option<UserView>> {
        let statement = Self::select(viewer)
            .and_where(Expr::col((User::Table, User::Id)).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn list(&self, viewer: Option<&str>) -> anyhow::Result<Vec<UserView>> {
        let statement = Self::select(viewer)
            .order_by_expr(Expr::cust(r#""user"."rowid""#), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Batch lookup used when hydrating recipe authors. Order is unspecified.
    pub async fn find_many(
        &self,
        ids: impl IntoIterator<Item = String>,
        viewer: Option<&str>,
    ) -> anyhow::Result<Vec<UserView>> {
        let ids = ids.into_iter().collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Self::select(viewer)
            .and_where(Expr::col((User::Table, User::Id)).is_in(ids))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Authors followed by `user_id`, in subscription order.
    pub async fn following(&self, user_id: &str) -> anyhow::Result<Vec<UserView>> {
        let statement = Self::select(Some(user_id))
            .inner_join(
                Follow::Table,
                Expr::col((Follow::Table, Follow::AuthorId)).equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Follow::Table, Follow::UserId)).eq(user_id))
            .order_by((Follow::Table, Follow::CreatedAt), Order::Asc)
            .order_by_expr(Expr::cust(r#""follow"."rowid""#), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
