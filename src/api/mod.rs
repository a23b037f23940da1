use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{auth, SharedState};

pub mod handlers;

/// Assemble the full application router.
///
/// The items routes live under `/api`. When authentication is enabled
/// they sit behind the bearer guard and `/token` is mounted; the
/// unauthenticated variant exposes no token endpoint at all.
pub fn router(state: SharedState) -> Router {
    let mut items = Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/:id",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .route("/data", get(handlers::legacy_data));

    if state.config.auth_required {
        items = items.layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));
    }

    let mut app = Router::new().route("/", get(handlers::root));
    if state.config.auth_required {
        app = app.route("/token", post(handlers::issue_token));
    }

    app.nest("/api", items)
        .fallback(fallback_404)
        .with_state(state)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
