use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::{auth, bookings, dashboard, rooms, token::TokenSigner};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: TokenSigner,
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/rooms/book/{rid}", post(bookings::book_room))
        .route("/bookings", get(bookings::list))
        .route("/bookings/{id}", get(bookings::get).put(bookings::update))
        .route("/bookings/{id}/delete", patch(bookings::soft_delete))
        .route("/dashboard", get(dashboard::get))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ));

    Router::new()
        .route("/health", get(dashboard::health))
        .route("/auth/login", post(auth::login))
        .route("/rooms", get(rooms::list))
        .route("/rooms/check", post(rooms::check))
        .route("/rooms/bookings/{rid}", get(rooms::bookings))
        .merge(protected)
        .with_state(state)
}

/// The full application router, without a listener.
pub fn app(engine: Engine, tokens: TokenSigner) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        tokens,
    })
}

pub async fn run_with_listener(
    engine: Engine,
    tokens: TokenSigner,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, tokens)).await
}
