use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState, app_url: &str) -> Router<()> {
    let app = Router::new()
        .route("/", get(|| async { "BuildTrack API" }))
        .nest("/projects", routes::projects::router())
        .nest("/calendar", routes::calendar::router())
        .nest("/notifications", routes::notifications::router())
        .nest("/dashboard", routes::dashboard::router())
        .nest("/pccc", routes::pccc::router())
        .nest("/qaqc", routes::qaqc::router())
        .nest("/assistant", routes::assistant::router());

    // Finally, wrap the app with tracing layer, state and CORS
    let app_url = app_url.trim_end_matches('/').to_string();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
