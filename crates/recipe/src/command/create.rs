use foodgram_db::table::Recipe;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{Sqlite, Transaction};

use super::Checked;
use crate::CreateInput;

impl super::Command {
    #[tracing::instrument(skip_all, fields(author = %request_by))]
    pub async fn create(
        &self,
        input: CreateInput,
        request_by: &str,
    ) -> foodgram_shared::Result<String> {
        let mut tx = self.state.write_db.begin().await?;
        let checked = Self::check(&mut tx, input.into()).await?;

        let id = foodgram_shared::new_id();
        let staged = match checked.image.as_ref() {
            Some(image) => Some(self.images.stage(&id, image).await?),
            None => None,
        };

        let result = Self::insert(tx, &id, request_by, &checked, staged.as_deref()).await;
        self.images
            .settle(&id, staged.as_deref(), result.is_ok())
            .await;
        result?;

        tracing::info!(recipe = id, "recipe created");

        Ok(id)
    }

    async fn insert(
        mut tx: Transaction<'static, Sqlite>,
        id: &str,
        author_id: &str,
        checked: &Checked,
        image: Option<&str>,
    ) -> foodgram_shared::Result<()> {
        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Description,
                Recipe::CookingTime,
                Recipe::PubDate,
            ])
            .values_panic([
                id.into(),
                author_id.into(),
                checked.name.to_owned().into(),
                image.unwrap_or_default().into(),
                checked.description.to_owned().into(),
                checked.cooking_time.into(),
                foodgram_shared::timestamp()?.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        Self::write_links(&mut tx, id, checked).await?;

        tx.commit().await?;

        Ok(())
    }
}
