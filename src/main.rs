use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use cloud_notes::config::{config, StoreBackend};
use cloud_notes::notes::local::LocalPersistedStore;
use cloud_notes::notes::store::{NoteStore, SqliteNoteStore};
use cloud_notes::state::AppState;
use cloud_notes::{app, errors, init_db};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{self, TraceLayer};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloud_notes=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(console_subscriber::spawn())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(false),
        )
        .try_init()
        .ok();

    let store: Arc<dyn NoteStore> = match config.store_backend {
        StoreBackend::Sqlite => Arc::new(SqliteNoteStore::new(init_db().await?)),
        StoreBackend::Local => Arc::new(LocalPersistedStore::open(&config.local_store_path).await?),
    };

    let app = app::create(AppState { store }).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<Body>| {
                    let headers = request.headers();
                    let request_id = headers
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let method = request.method().to_string();
                    tracing::span!(
                        tracing::Level::DEBUG,
                        "request",
                        method = method,
                        request_id = request_id,
                        uri = request.uri().to_string(),
                    )
                })
                .on_request(trace::DefaultOnRequest::new())
                .on_response(trace::DefaultOnResponse::new().include_headers(false))
                .on_failure(trace::DefaultOnFailure::new()),
        ),
    );

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await.unwrap();

    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .unwrap();

    Ok(())
}
