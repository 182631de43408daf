use std::sync::LazyLock;

use foodgram_db::table::Follow;
use regex::Regex;
use serde::Deserialize;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::{Validate, ValidationError};

use crate::repository::{self, FindType};

static RE_USERNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.eq_ignore_ascii_case("me") {
        return Err(ValidationError::new("username_reserved")
            .with_message("The username \"me\" is reserved.".into()));
    }

    Ok(())
}

#[derive(Validate, Deserialize, Clone)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(
        length(min = 1, max = 150),
        regex(path = *RE_USERNAME, message = "Letters, digits and @/./+/-/_ only."),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let mut tx = self.0.write_db.begin().await?;

        if repository::find(&mut *tx, FindType::Email(input.email.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::conflict!("a user with that email already exists");
        }

        if repository::find(&mut *tx, FindType::Username(input.username.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::conflict!("a user with that username already exists");
        }

        let id = foodgram_shared::new_id();
        let password = crate::hash_password(&input.password)?;

        repository::create(
            &mut *tx,
            repository::CreateInput {
                id: id.to_owned(),
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(user = id, "user registered");

        Ok(id)
    }

    /// Returns the user id when the credentials match.
    pub async fn verify_password(
        &self,
        email: impl Into<String>,
        password: &str,
    ) -> foodgram_shared::Result<String> {
        let Some(user) = repository::find(&self.0.read_db, FindType::Email(email.into())).await?
        else {
            return Err(foodgram_shared::Error::Unauthenticated);
        };

        if !crate::verify_password(password, &user.password)? {
            return Err(foodgram_shared::Error::Unauthenticated);
        }

        Ok(user.id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn subscribe(&self, user_id: &str, author_id: &str) -> foodgram_shared::Result<()> {
        if user_id == author_id {
            foodgram_shared::invalid_argument!("you cannot subscribe to yourself");
        }

        let mut tx = self.0.write_db.begin().await?;

        if repository::find(&mut *tx, FindType::Id(author_id.to_owned()))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user {author_id}");
        }

        if repository::is_following(&mut *tx, user_id, author_id).await? {
            foodgram_shared::conflict!("you are already subscribed to this author");
        }

        let statement = Query::insert()
            .into_table(Follow::Table)
            .columns([Follow::UserId, Follow::AuthorId, Follow::CreatedAt])
            .values_panic([
                user_id.into(),
                author_id.into(),
                foodgram_shared::timestamp()?.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn unsubscribe(
        &self,
        user_id: &str,
        author_id: &str,
    ) -> foodgram_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Follow::Table)
            .and_where(Expr::col(Follow::UserId).eq(user_id))
            .and_where(Expr::col(Follow::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::not_found!("subscription to {author_id}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(username: &str) -> RegisterInput {
        RegisterInput {
            email: "cook@foodgram.localhost".to_owned(),
            username: username.to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            password: "long enough".to_owned(),
        }
    }

    #[test]
    fn test_username_rules() {
        assert!(input("chef.ada+1@home").validate().is_ok());
        assert!(input("me").validate().is_err());
        assert!(input("ME").validate().is_err());
        assert!(input("with space").validate().is_err());
        assert!(input("").validate().is_err());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let mut input = input("ada");
        input.password = "short".to_owned();

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
