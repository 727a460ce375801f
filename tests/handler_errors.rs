mod common;

use wanderlust::domain::repositories::ListingRepository;

#[tokio::test]
async fn test_unmatched_route_renders_404_page() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/no/such/page").await;

    response.assert_status_not_found();
    let body = response.text();
    assert!(body.contains("Page not found!"));
    assert!(body.contains("Error 404"));
}

#[tokio::test]
async fn test_unsupported_method_renders_404_page() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/listings/1/reviews").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Page not found!"));
}

#[tokio::test]
async fn test_override_only_applies_to_post() {
    let (server, store) = common::create_test_server();
    let listing = common::create_test_listing(&store, "Safe").await;

    server
        .get(&format!("/listings/{}?_method=DELETE", listing.id))
        .await
        .assert_status_ok();

    assert!(store.find_by_id(listing.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let (server, _store) = common::create_test_server();

    server.get("/static/css/style.css").await.assert_status_ok();
}

#[tokio::test]
async fn test_missing_static_file_renders_404_page() {
    let (server, _store) = common::create_test_server();

    for path in ["/static/css/nope.css", "/uploads/missing.jpg"] {
        let response = server.get(path).await;

        response.assert_status_not_found();
        assert!(response.text().contains("Page not found!"), "{path}");
    }
}
