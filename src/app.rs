use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{any, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::middleware::session_context_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Operational
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Story API
        .merge(public_routes())
        .merge(protected_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(state.clone(), session_context_middleware)),
        );

    let router = match cors_layer(&state.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

// Method checks live in the handlers so identity failures are reported first
fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/api/login/", any(public::login))
        .route("/api/getstories/", any(public::list_stories))
}

fn protected_routes() -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route("/api/logout/", any(protected::logout))
        .route("/api/poststory/", any(protected::post_story))
        .route("/api/deletestory/", any(protected::delete_story))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true),
    )
}
