use axum::routing::{delete, get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::Role;
use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::auth::{require_role, AccessGate};

/// Roles allowed on the file-retrieval routes.
const MEMBER_ROLES: &[Role] = &[Role::Admin, Role::User];
/// Roles allowed on the write routes.
const ADMIN_ONLY: &[Role] = &[Role::Admin];

pub fn app() -> Router {
    let security = &config::config().security;
    let member_gate =
        middleware::from_fn_with_state(AccessGate::new(MEMBER_ROLES, security), require_role);
    let admin_gate =
        middleware::from_fn_with_state(AccessGate::new(ADMIN_ONLY, security), require_role);

    let cors = if security.enable_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Public catalog listings
        .route("/resources/languages", get(public::resources::languages_get))
        .route("/resources/subjects", get(public::resources::subjects_get))
        // Admin-gated collection writes
        .route(
            "/resources",
            post(protected::resources::resource_post).route_layer(admin_gate.clone()),
        )
        .route(
            "/resources/:id",
            delete(protected::resources::resource_delete).route_layer(admin_gate.clone()),
        )
        .route(
            "/resource-data-entries",
            post(protected::resources::entry_post).route_layer(admin_gate.clone()),
        )
        .route(
            "/subdata",
            post(protected::resources::sub_data_post).route_layer(admin_gate.clone()),
        )
        .route(
            "/resource-items",
            post(protected::resources::item_post).route_layer(admin_gate.clone()),
        )
        // Parent-key listings share a path with the gated deletes; the gate
        // is attached before the public GET so it wraps only the delete.
        .route(
            "/resource-data-entries/:resource_id",
            delete(protected::resources::entry_delete)
                .route_layer(admin_gate.clone())
                .get(public::resources::entries_get),
        )
        .route(
            "/subdata/:resource_data_entry_id",
            delete(protected::resources::sub_data_delete)
                .route_layer(admin_gate.clone())
                .get(public::resources::sub_data_get),
        )
        .route(
            "/resource-items/:sub_data_id",
            delete(protected::resources::item_delete)
                .route_layer(admin_gate)
                .get(public::resources::items_get),
        )
        // Member-gated file retrieval
        .route(
            "/resource-items/link/:id",
            get(protected::files::item_download).route_layer(member_gate.clone()),
        )
        .route(
            "/subdata/link/:id",
            get(protected::files::sub_data_media).route_layer(member_gate),
        )
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Resource Library API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "languages": "/resources/languages (public)",
            "subjects": "/resources/subjects?lan= (public)",
            "entries": "/resource-data-entries/:resourceId (public)",
            "subdata": "/subdata/:resourceDataEntryId (public)",
            "items": "/resource-items/:subDataId (public)",
            "item_download": "/resource-items/link/:id (ADMIN, USER)",
            "subdata_media": "/subdata/link/:id (ADMIN, USER)",
            "writes": "POST/DELETE per collection (ADMIN)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
