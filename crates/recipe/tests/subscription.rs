use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_subscriptions_embed_latest_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let f = helpers::setup(&dir).await?;
    let (ada, grace) = (&f.users[0], &f.users[1]);
    let lines = [(&f.ingredients[0], 1)];

    let mut ids = vec![];
    for name in ["Borscht", "Pelmeni", "Blini"] {
        ids.push(
            f.command
                .create(helpers::create_input(name, &[&f.tags[0]], &lines, 30), grace)
                .await?,
        );
    }

    foodgram_user::Command(f.state.clone())
        .subscribe(ada, grace)
        .await?;

    let subscriptions = f.query.subscriptions(ada, Some(2)).await?;
    assert_eq!(subscriptions.len(), 1);

    let subscription = &subscriptions[0];
    assert_eq!(subscription.author.id, *grace);
    assert!(subscription.author.is_subscribed);
    assert_eq!(subscription.recipes_count, 3);
    assert_eq!(
        subscription
            .recipes
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Blini", "Pelmeni"]
    );

    let json = serde_json::to_value(subscription)?;
    assert_eq!(json["username"], "grace");
    assert_eq!(json["recipes_count"], 3);

    let all = f.query.subscription(grace, ada, None).await?.unwrap();
    assert_eq!(all.recipes.len(), 3);

    let widest = f.query.subscriptions(ada, Some(u32::MAX)).await?;
    assert_eq!(widest[0].recipes.len(), 3);

    assert!(f.query.subscriptions(grace, None).await?.is_empty());

    Ok(())
}
