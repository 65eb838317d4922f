use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    normalize_path::NormalizePath,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        dogs::{create_dog, delete_dog, get_dog, list_dogs, update_dog},
        error::handle_panic,
        health::{livez, readyz},
        root::hello,
    },
    state::AppState,
};

/// The router wrapped so that `/dogs/` and `/dogs` reach the same route.
pub type App = NormalizePath<Router>;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> App {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        .route("/", get(hello))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .route("/dogs", get(list_dogs).post(create_dog))
        .route(
            "/dogs/{id}",
            get(get_dog).patch(update_dog).delete(delete_dog),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state);

    // Path normalization has to run before routing, so it wraps the router
    NormalizePath::trim_trailing_slash(router)
}
