use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{Sqlite, Transaction};

use super::Checked;
use crate::UpdateInput;

impl super::Command {
    /// Full replace: tag links and ingredient lines end up exactly as sent.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateInput,
        request_by: &str,
    ) -> foodgram_shared::Result<()> {
        let mut tx = self.state.write_db.begin().await?;

        if Self::author_of(&mut tx, id).await? != request_by {
            foodgram_shared::forbidden!("only the author can change this recipe");
        }

        let checked = Self::check(&mut tx, input.into()).await?;

        // The current photo stays on disk until the new one is committed.
        let staged = match checked.image.as_ref() {
            Some(image) => Some(self.images.stage(id, image).await?),
            None => None,
        };

        let result = Self::apply(tx, id, &checked, staged.as_deref()).await;
        self.images
            .settle(id, staged.as_deref(), result.is_ok())
            .await;
        result?;

        tracing::info!(recipe = id, "recipe updated");

        Ok(())
    }

    async fn apply(
        mut tx: Transaction<'static, Sqlite>,
        id: &str,
        checked: &Checked,
        image: Option<&str>,
    ) -> foodgram_shared::Result<()> {
        let mut statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::Name, checked.name.to_owned())
            .value(Recipe::Description, checked.description.to_owned())
            .value(Recipe::CookingTime, checked.cooking_time)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        if let Some(image) = image {
            statement.value(Recipe::Image, image);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        Self::write_links(&mut tx, id, checked).await?;

        tx.commit().await?;

        Ok(())
    }
}
