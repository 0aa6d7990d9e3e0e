//! Integration tests for the cart and the checkout hand-off.

#![allow(clippy::unwrap_used)]

use fraghead_integration_tests::{Fixture, TestServer};
use reqwest::StatusCode;
use tokio::task::JoinSet;
use url::Url;

const ROSE_5ML: [(&str, &str); 3] = [("id", "1"), ("provenance", "collection"), ("size", "5ml")];

#[tokio::test]
async fn test_add_returns_panel_fragment_with_trigger() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    let response = server.htmx_post("/cart/add", &ROSE_5ML).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");
    let body = response.text().await.unwrap();
    assert!(body.starts_with(r#"<section id="cart-panel""#));
    assert!(body.contains("Rose"));
    assert!(body.contains("Total: <strong>₹200</strong>"));
}

#[tokio::test]
async fn test_adding_same_item_twice_increments_quantity() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    server.htmx_post("/cart/add", &ROSE_5ML).await;
    let body = server
        .htmx_post("/cart/add", &ROSE_5ML)
        .await
        .text()
        .await
        .unwrap();

    assert_eq!(body.matches(r#"class="cart-line""#).count(), 1);
    assert!(body.contains(r#"name="quantity" value="2""#));
    assert!(body.contains("Total: <strong>₹400</strong>"));

    let (_, count) = server.get("/cart/count").await;
    assert!(count.contains(">1</span>"));
}

#[tokio::test]
async fn test_overlapping_adds_from_one_visitor_are_all_kept() {
    const ADDS: usize = 200;

    let server = TestServer::spawn(Fixture::Catalog).await;
    // First add sets the session cookie every later request shares.
    server.htmx_post("/cart/add", &ROSE_5ML).await;

    let mut tasks = JoinSet::new();
    for _ in 0..ADDS {
        let server = server.clone();
        tasks.spawn(async move { server.htmx_post("/cart/add", &ROSE_5ML).await.status() });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let (_, body) = server.get("/cart").await;
    let expected = format!(r#"name="quantity" value="{}""#, ADDS + 1);
    assert!(body.contains(&expected), "{body}");
}

#[tokio::test]
async fn test_same_id_from_each_source_are_separate_lines() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    server.htmx_post("/cart/add", &ROSE_5ML).await;
    let body = server
        .htmx_post(
            "/cart/add",
            &[("id", "1"), ("provenance", "official"), ("size", "5ml")],
        )
        .await
        .text()
        .await
        .unwrap();

    assert_eq!(body.matches(r#"class="cart-line""#).count(), 2);
    assert!(body.contains("Bergamot Bloom"));
    assert!(body.contains("Total: <strong>₹500</strong>"));
}

#[tokio::test]
async fn test_unavailable_size_and_unknown_item_leave_cart_unchanged() {
    let server = TestServer::spawn(Fixture::Catalog).await;

    // Rose has no 20ml price.
    let body = server
        .htmx_post(
            "/cart/add",
            &[("id", "1"), ("provenance", "collection"), ("size", "20ml")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));

    let body = server
        .htmx_post(
            "/cart/add",
            &[("id", "42"), ("provenance", "collection"), ("size", "5ml")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_update_remove_and_clear() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    server.htmx_post("/cart/add", &ROSE_5ML).await;
    server
        .htmx_post(
            "/cart/add",
            &[("id", "2"), ("provenance", "official"), ("size", "10ml")],
        )
        .await;

    let body = server
        .htmx_post("/cart/update", &[("index", "1"), ("quantity", "3")])
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Total: <strong>₹2600</strong>"));

    // Quantity 0 removes exactly that line.
    let body = server
        .htmx_post("/cart/update", &[("index", "0"), ("quantity", "0")])
        .await
        .text()
        .await
        .unwrap();
    assert!(!body.contains("Rose"));
    assert!(body.contains("Cedar Smoke"));
    assert!(body.contains("Total: <strong>₹2400</strong>"));

    // Out-of-range index is ignored.
    let response = server.htmx_post("/cart/remove", &[("index", "5")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Cedar Smoke"));

    let body = server
        .htmx_post("/cart/remove", &[("index", "0")])
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));

    server.htmx_post("/cart/add", &ROSE_5ML).await;
    let body = server.htmx_post("/cart/clear", &[]).await.text().await.unwrap();
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_plain_form_post_redirects_home() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    let response = server.post("/cart/add", &ROSE_5ML).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");

    let (_, body) = server.get("/cart").await;
    assert!(body.contains("Total: <strong>₹200</strong>"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let first = TestServer::spawn(Fixture::Catalog).await;
    first.htmx_post("/cart/add", &ROSE_5ML).await;

    let other_client = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let body = other_client
        .get(first.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_home() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    let response = server.client.get(server.url("/checkout")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn test_checkout_redirects_to_prefilled_chat() {
    let server = TestServer::spawn(Fixture::Catalog).await;
    server.htmx_post("/cart/add", &ROSE_5ML).await;
    server.htmx_post("/cart/add", &ROSE_5ML).await;
    server
        .htmx_post(
            "/cart/add",
            &[("id", "2"), ("provenance", "official"), ("size", "30ml")],
        )
        .await;

    let response = server.client.get(server.url("/checkout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response.headers().get("location").unwrap().to_str().unwrap();
    let url = Url::parse(location).unwrap();
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/918767578885");

    let text = url
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert_eq!(
        text,
        "Hi, I would like to order these fragrances:\n\n\
         1. Rose\n   Size: 5ml\n   Price: ₹200\n   Quantity: 2\n   Subtotal: ₹400\n\n\
         2. Cedar Smoke (Official Vial)\n   Size: 30ml\n   Price: ₹2000\n   Quantity: 1\n   Subtotal: ₹2000\n\n\
         *Total: ₹2400*\n\n\
         Please confirm availability and shipping details."
    );
}
