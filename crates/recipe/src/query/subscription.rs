use foodgram_db::table::Recipe;
use foodgram_user::UserView;
use sea_query::{Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;

use super::ShortRecipeView;

/// A followed author with a preview of their latest recipes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub author: UserView,
    pub recipes_count: i64,
    pub recipes: Vec<ShortRecipeView>,
}

impl super::Query {
    /// `recipes_limit` of `None` embeds every recipe of each author.
    pub async fn subscriptions(
        &self,
        user_id: &str,
        recipes_limit: Option<u32>,
    ) -> anyhow::Result<Vec<SubscriptionView>> {
        let authors = foodgram_user::Query(self.pool.clone())
            .following(user_id)
            .await?;

        let mut subscriptions = Vec::with_capacity(authors.len());
        for author in authors {
            subscriptions.push(self.subscription_of(author, recipes_limit).await?);
        }

        Ok(subscriptions)
    }

    pub async fn subscription(
        &self,
        author_id: &str,
        viewer: &str,
        recipes_limit: Option<u32>,
    ) -> anyhow::Result<Option<SubscriptionView>> {
        let Some(author) = foodgram_user::Query(self.pool.clone())
            .find(author_id, Some(viewer))
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.subscription_of(author, recipes_limit).await?))
    }

    async fn subscription_of(
        &self,
        author: UserView,
        recipes_limit: Option<u32>,
    ) -> anyhow::Result<SubscriptionView> {
        let statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author.id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (recipes_count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        let mut statement = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author.id.to_owned()))
            .order_by(Recipe::PubDate, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc)
            .to_owned();

        if let Some(limit) = recipes_limit {
            statement.limit(u64::from(limit));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipes = sqlx::query_as_with::<_, ShortRecipeView, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|mut recipe| {
                recipe.image = self.image_url(&recipe.image);
                recipe
            })
            .collect();

        Ok(SubscriptionView {
            author,
            recipes_count,
            recipes,
        })
    }
}
