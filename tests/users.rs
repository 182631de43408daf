use axum::http::{Method, StatusCode};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn subscribe_returns_the_author_with_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup(&dir).await?;
    let (ada_id, ada) = app.register("ada").await?;
    let (_, grace) = app.register("grace").await?;

    for name in ["Pancakes", "Porridge", "Omelette"] {
        app.create_recipe(&ada, name, &[1]).await?;
    }

    let uri = format!("/api/users/{ada_id}/subscribe?recipes_limit=2");
    let res = app.send(Method::POST, &uri, Some(&grace), None).await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.text());

    let body = res.json();
    assert_eq!(body["id"], ada_id.as_str());
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(body["recipes"][0]["name"], "Omelette");

    let res = app.send(Method::POST, &uri, Some(&grace), None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .send(
            Method::GET,
            "/api/users/subscriptions?recipes_limit=1",
            Some(&grace),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let subscriptions = res.json();
    assert_eq!(subscriptions.as_array().unwrap().len(), 1);
    assert_eq!(subscriptions[0]["username"], "ada");
    assert_eq!(subscriptions[0]["recipes"].as_array().unwrap().len(), 1);

    let res = app
        .send(Method::GET, &format!("/api/users/{ada_id}"), Some(&grace), None)
        .await?;
    assert_eq!(res.json()["is_subscribed"], true);

    let res = app
        .send(Method::GET, &format!("/api/users/{ada_id}"), None, None)
        .await?;
    assert_eq!(res.json()["is_subscribed"], false);

    let uri = format!("/api/users/{ada_id}/subscribe");
    let res = app.send(Method::DELETE, &uri, Some(&grace), None).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.send(Method::DELETE, &uri, Some(&grace), None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn out_of_range_recipes_limit_is_bad_request() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup(&dir).await?;
    let (ada_id, ada) = app.register("ada").await?;
    let (_, grace) = app.register("grace").await?;
    app.create_recipe(&ada, "Pancakes", &[1]).await?;

    let res = app
        .send(
            Method::POST,
            &format!("/api/users/{ada_id}/subscribe"),
            Some(&grace),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);

    for limit in ["18446744073709551615", "-1", "ten"] {
        let res = app
            .send(
                Method::GET,
                &format!("/api/users/subscriptions?recipes_limit={limit}"),
                Some(&grace),
                None,
            )
            .await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{limit}");
        assert!(res.json()["detail"].is_string(), "{limit}");
    }

    let res = app
        .send(
            Method::GET,
            "/api/users/subscriptions?recipes_limit=4294967295",
            Some(&grace),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()[0]["recipes"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn cannot_subscribe_to_self_or_unknown() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup(&dir).await?;
    let (ada_id, ada) = app.register("ada").await?;

    let res = app
        .send(
            Method::POST,
            &format!("/api/users/{ada_id}/subscribe"),
            Some(&ada),
            None,
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["detail"], "you cannot subscribe to yourself");

    let res = app
        .send(Method::POST, "/api/users/nobody/subscribe", Some(&ada), None)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn catalog_endpoints() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup(&dir).await?;

    let res = app
        .send(Method::GET, "/api/ingredients?name=MI", None, None)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let ingredients = res.json();
    assert_eq!(ingredients.as_array().unwrap().len(), 1);
    assert_eq!(ingredients[0]["measurement_unit"], "ml");

    let res = app
        .send(Method::GET, "/api/ingredients/unknown", None, None)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.send(Method::GET, "/api/tags", None, None).await?;
    assert_eq!(res.json().as_array().unwrap().len(), 2);

    let res = app
        .send(Method::GET, &format!("/api/tags/{}", app.tags[1]), None, None)
        .await?;
    assert_eq!(res.json()["slug"], "lunch");

    let res = app.send(Method::GET, "/health", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);

    Ok(())
}
