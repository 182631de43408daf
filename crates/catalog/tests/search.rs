use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_prefix_matches_rank_first() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::add_ingredients(
        &state,
        [
            ("Мангал", "шт."),
            ("Соль", "г"),
            ("Алыча", "г"),
            ("Сало", "г"),
        ],
    )
    .await?;

    let query = foodgram_catalog::Query(state.read_db.clone());
    let names = query
        .search_ingredients(Some("ал"))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Алыча", "Мангал", "Сало"]);

    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::add_ingredients(&state, [("Sugar", "g"), ("brown sugar", "g"), ("Salt", "g")])
        .await?;

    let query = foodgram_catalog::Query(state.read_db.clone());
    let names = query
        .search_ingredients(Some("SUG"))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Sugar", "brown sugar"]);

    Ok(())
}

#[tokio::test]
async fn test_empty_search_lists_catalog_in_insertion_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::add_ingredients(&state, [("Salt", "g"), ("Apple", "pcs"), ("Milk", "ml")]).await?;

    let query = foodgram_catalog::Query(state.read_db.clone());
    let names = query
        .search_ingredients(None)
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Salt", "Apple", "Milk"]);

    let names = query
        .search_ingredients(Some("  "))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Salt", "Apple", "Milk"]);

    Ok(())
}

#[tokio::test]
async fn test_find_ingredient() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let ids = helpers::add_ingredients(&state, [("Salt", "g")]).await?;

    let query = foodgram_catalog::Query(state.read_db.clone());
    let salt = query.find_ingredient(&ids[0]).await?.unwrap();
    assert_eq!(salt.name, "Salt");
    assert_eq!(salt.measurement_unit, "g");
    assert!(query.find_ingredient("unknown").await?.is_none());

    Ok(())
}
