use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::models::ReferenceKind;
use crate::handlers::{self, params::QueryParams, reference};
use crate::state::AppState;

/// Full application router with middleware applied
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.api.request_timeout()))
        .layer(cors_layer(config));

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .merge(product_routes())
        .merge(reference_routes())
        .layer(middleware)
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/products", get(products::list))
        // Recommendations: two routes, never one route with an optional segment
        .route("/products/select/:concern_id/:skin_type_id", get(products::select))
        .route(
            "/products/selectspec/:concern_id/:skin_type_id/:product_type_id",
            get(products::select_by_type),
        )
        .route("/products/create", post(products::create))
        .route("/products/update", put(products::update))
        .route("/products/delete/:products_id", delete(products::delete))
}

fn reference_routes() -> Router<AppState> {
    ReferenceKind::ALL.into_iter().fold(Router::new(), |router, kind| {
        let base = format!("/{}", kind.route_segment());
        router
            .route(
                &base,
                get(move |state: State<AppState>| reference::list(kind, state)),
            )
            .route(
                &format!("{}/create", base),
                post(move |state: State<AppState>, query: Query<QueryParams>| {
                    reference::create(kind, state, query)
                }),
            )
            .route(
                &format!("{}/update", base),
                put(move |state: State<AppState>, query: Query<QueryParams>| {
                    reference::update(kind, state, query)
                }),
            )
            .route(
                &format!("{}/delete/:{}", base, kind.id_key()),
                delete(move |state: State<AppState>, path: Path<String>| {
                    reference::delete(kind, state, path)
                }),
            )
    })
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let origins = &config.security.cors_origins;
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
}
