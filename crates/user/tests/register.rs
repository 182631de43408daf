use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_register_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = foodgram_user::Command(state.clone());
    let query = foodgram_user::Query(state.read_db.clone());

    let id = command.register(helpers::register_input("ada")).await?;
    let user = query.find(&id, None).await?.unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "ada@foodgram.localhost");
    assert_eq!(user.full_name(), "ada Tester");
    assert!(!user.is_subscribed);

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_duplicates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = foodgram_user::Command(state.clone());

    command.register(helpers::register_input("ada")).await?;

    let mut same_email = helpers::register_input("grace");
    same_email.email = "ADA@foodgram.localhost".to_owned();
    let err = command.register(same_email).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let mut same_username = helpers::register_input("ADA");
    same_username.email = "other@foodgram.localhost".to_owned();
    let err = command.register(same_username).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let users = foodgram_user::Query(state.read_db.clone()).list(None).await?;
    assert_eq!(users.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_register_validates_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = foodgram_user::Command(state);

    let mut input = helpers::register_input("ada");
    input.email = "not an email".to_owned();

    let err = command.register(input).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = command
        .register(helpers::register_input("me"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}

#[tokio::test]
async fn test_verify_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = foodgram_user::Command(state.clone());

    let id = command.register(helpers::register_input("ada")).await?;

    assert_eq!(
        command
            .verify_password("ada@foodgram.localhost", "my_password")
            .await?,
        id
    );

    let err = command
        .verify_password("ada@foodgram.localhost", "wrong_password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    let err = command
        .verify_password("nobody@foodgram.localhost", "my_password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    Ok(())
}
