use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, web};
use onpage::fetcher::PageFetcher;
use onpage::server::build_router;
use onpage::state::AppState;
use std::sync::Arc;

/// Serves `tests/static/` plus a few fixed-status routes on an ephemeral port.
#[allow(dead_code)]
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route(
                "/not-found",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/server-error",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
            .route(
                "/redirect",
                web::get().to(|| async {
                    HttpResponse::MovedPermanently()
                        .append_header(("Location", "/index.html"))
                        .finish()
                }),
            )
            .route(
                "/redirect-loop",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/redirect-loop"))
                        .finish()
                }),
            )
            .service(Files::new("/", "tests/static/").index_file("index.html"))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

/// Runs the analysis service on an ephemeral port and returns its base URL.
#[allow(dead_code)]
pub async fn spawn_app<F: PageFetcher>(state: AppState<F>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind app listener");
    let addr = listener.local_addr().expect("No local address");
    let router = build_router(Arc::new(state));

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("App server error: {}", e);
        }
    });

    format!("http://{}", addr)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}/", addr)
}
