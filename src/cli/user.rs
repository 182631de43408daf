use anyhow::anyhow;

use crate::config::Config;

/// Prints a bearer token for the user owning these credentials.
pub async fn issue_token(config: &Config, email: String, password: String) -> anyhow::Result<()> {
    let token = token_for(config, &email, &password).await?;
    println!("{token}");

    Ok(())
}

pub async fn token_for(config: &Config, email: &str, password: &str) -> anyhow::Result<String> {
    let command = foodgram_user::Command(super::command_state(config).await?);

    let user_id = match command.verify_password(email, password).await {
        Ok(user_id) => user_id,
        Err(foodgram_shared::Error::Unauthenticated) => {
            return Err(anyhow!("invalid credentials for {email}"));
        }
        Err(err) => return Err(err.into()),
    };

    crate::auth::generate_token(&config.jwt, user_id)
}
