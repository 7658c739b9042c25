use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{accounts, admin, region, roles, root, vendors};
use crate::state::SharedContext;

pub fn app(ctx: SharedContext) -> Router {
    let cors = cors_layer(&ctx.config.api.cors_origins);
    let request_logging = ctx.config.api.enable_request_logging;

    let router = Router::new()
        // Public
        .route("/", get(root::root))
        .route("/health", get(root::health))
        // Lookups
        .merge(lookup_routes())
        // Mutations
        .merge(admin_routes())
        .with_state(ctx)
        .layer(cors);

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn lookup_routes() -> Router<SharedContext> {
    Router::new()
        .route("/api/region", post(region::check_region))
        .route("/api/accounts/vendor/:id", get(accounts::by_vendor))
        .route("/api/accounts/tenant/:id", get(accounts::by_tenant))
        .route("/api/accounts/email/:email", get(accounts::by_email))
        .route("/api/accounts/ticket/:ticket", get(accounts::by_ticket))
        .route("/api/vendors/:id/sso", get(vendors::sso_report))
        .route("/api/vendors/by-email/:email", get(vendors::by_email))
        .route("/api/roles", post(roles::user_roles))
}

fn admin_routes() -> Router<SharedContext> {
    Router::new()
        .route("/api/remove_trial", post(admin::remove_trial))
        .route("/api/white_label", post(admin::white_label))
}

/// `*` allows any origin; otherwise only the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
