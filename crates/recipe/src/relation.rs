use foodgram_db::table::{Favorite, Recipe, ShoppingCart};
use sea_query::{
    DynIden, Expr, ExprTrait, IntoIden, IntoTableRef, Query, SqliteQueryBuilder, TableRef,
};
use sea_query_sqlx::SqlxBinder;

/// Per-user recipe bookmarks, both keyed by (user_id, recipe_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Favorite,
    ShoppingCart,
}

impl Relation {
    pub(crate) fn table(self) -> TableRef {
        match self {
            Self::Favorite => Favorite::Table.into_table_ref(),
            Self::ShoppingCart => ShoppingCart::Table.into_table_ref(),
        }
    }

    pub(crate) fn user_id(self) -> DynIden {
        match self {
            Self::Favorite => Favorite::UserId.into_iden(),
            Self::ShoppingCart => ShoppingCart::UserId.into_iden(),
        }
    }

    pub(crate) fn recipe_id(self) -> DynIden {
        match self {
            Self::Favorite => Favorite::RecipeId.into_iden(),
            Self::ShoppingCart => ShoppingCart::RecipeId.into_iden(),
        }
    }

    fn created_at(self) -> DynIden {
        match self {
            Self::Favorite => Favorite::CreatedAt.into_iden(),
            Self::ShoppingCart => ShoppingCart::CreatedAt.into_iden(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Favorite => "favorites",
            Self::ShoppingCart => "shopping cart",
        }
    }
}

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn add_relation(
        &self,
        relation: Relation,
        recipe_id: &str,
        user_id: &str,
    ) -> foodgram_shared::Result<()> {
        let mut tx = self.state.write_db.begin().await?;

        let statement = Query::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(recipe_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("recipe {recipe_id}");
        }

        let statement = Query::select()
            .column(relation.recipe_id())
            .from(relation.table())
            .and_where(Expr::col(relation.user_id()).eq(user_id))
            .and_where(Expr::col(relation.recipe_id()).eq(recipe_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .is_some()
        {
            foodgram_shared::conflict!("recipe is already in {}", relation.label());
        }

        let statement = Query::insert()
            .into_table(relation.table())
            .columns([relation.user_id(), relation.recipe_id(), relation.created_at()])
            .values_panic([
                user_id.into(),
                recipe_id.into(),
                foodgram_shared::timestamp()?.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_relation(
        &self,
        relation: Relation,
        recipe_id: &str,
        user_id: &str,
    ) -> foodgram_shared::Result<()> {
        let statement = Query::delete()
            .from_table(relation.table())
            .and_where(Expr::col(relation.user_id()).eq(user_id))
            .and_where(Expr::col(relation.recipe_id()).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.state.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::not_found!("recipe {recipe_id} in {}", relation.label());
        }

        Ok(())
    }
}
