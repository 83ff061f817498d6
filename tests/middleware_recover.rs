use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use redirector::middlewares::{access_log::access_log_mw, recover};

async fn boom() -> &'static str {
    panic!("handler exploded")
}

async fn fine() -> &'static str {
    "fine"
}

/// The production middleware chain around a deliberately panicking route.
fn test_server() -> TestServer {
    let app = Router::new()
        .route("/boom", get(boom))
        .route("/fine", get(fine))
        .layer(recover::layer())
        .layer(middleware::from_fn(access_log_mw));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn panic_becomes_generic_500() {
    let server = test_server();

    let response = server.get("/boom").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.text(),
        "There was an error processing your request"
    );
}

#[tokio::test]
async fn panic_response_closes_connection() {
    let server = test_server();

    let response = server.get("/boom").await;

    assert_eq!(response.header("connection"), "close");
}

#[tokio::test]
async fn serving_continues_after_a_panic() {
    let server = test_server();

    assert_eq!(server.get("/boom").await.status_code(), 500);

    let response = server.get("/fine").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "fine");
}
