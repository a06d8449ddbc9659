use crate::{handlers, middleware::require_token, AppState};
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the HTTP surface.
///
/// Routes under `protected_routes` run behind the access guard; `/users`
/// is split so that listing is guarded while registration is open.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(handlers::list_users_handler))
        .route("/users/admin/{email}", get(handlers::check_admin_handler))
        // GET takes an email, PATCH a user id
        .route(
            "/users/hr/{target}",
            get(handlers::check_hr_handler).patch(handlers::promote_to_hr_handler),
        )
        .route("/users/em/{id}", patch(handlers::assign_employee_handler))
        .route("/users/verify/{id}", patch(handlers::verify_user_handler))
        .route("/users/unVerify/{id}", patch(handlers::unverify_user_handler))
        .route(
            "/work-sheet",
            get(handlers::list_worksheets_handler).post(handlers::create_worksheet_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/", get(handlers::liveness_handler))
        .route("/jwt", post(handlers::issue_token_handler))
        .route("/users", post(handlers::register_user_handler))
        .route("/services", get(handlers::list_services_handler))
        .route("/testimonials", get(handlers::list_testimonials_handler))
        .merge(protected_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
