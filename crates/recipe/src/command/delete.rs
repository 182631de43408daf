use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Ingredient lines, tag links, favorites and cart entries go with it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str, request_by: &str) -> foodgram_shared::Result<()> {
        let mut tx = self.state.write_db.begin().await?;

        if Self::author_of(&mut tx, id).await? != request_by {
            foodgram_shared::forbidden!("only the author can delete this recipe");
        }

        let statement = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        if let Err(err) = self.images.remove(id).await {
            tracing::warn!(recipe = id, err = %err, "failed to remove recipe photo");
        }

        Ok(())
    }
}
