use sqlx_migrator::{Info, Migrator};

macro_rules! operation {
    ($name:ident, $up:expr, $down:expr) => {
        pub struct $name;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $name {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement: String = $up;
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement: String = $down;
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

mod m0001;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}

/// Apply every pending migration on the given pool.
pub async fn migrate(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    use sqlx_migrator::{Migrate, Plan};

    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut conn, &Plan::apply_all()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrate_creates_tables() -> anyhow::Result<()> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        super::migrate(&pool).await?;

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&pool)
                .await?;
        let tables = tables.into_iter().map(|(name,)| name).collect::<Vec<_>>();

        for table in [
            "favorite",
            "follow",
            "ingredient",
            "recipe",
            "recipe_ingredient",
            "recipe_tag",
            "shopping_cart",
            "tag",
            "user",
        ] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }

        Ok(())
    }
}
