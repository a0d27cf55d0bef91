use axum::{response::Html, routing::get, Router};

use crate::{domains::verification::rest::verification_routes, state::SharedAppState};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/", get(index_handler))
    .merge(verification_routes())
    .with_state(state)
}

pub async fn index_handler() -> Html<String> {
  Html("<p>Email verifier dev server. Use /verify?token=...</p>".to_string())
}
