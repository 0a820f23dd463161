use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{graphql, health};
use super::middleware::resolve_identity;
use crate::auth::{Authenticator, DatabaseIdentityResolver, JwtSettings, JwtValidator};
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub graphql_schema: GraphQLSchema,
}

pub async fn create_app(
    db: DatabaseConnection,
    jwt: &JwtSettings,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let graphql_schema = build_schema(GraphQLContext::new(db.clone()));
    let authenticator = Arc::new(Authenticator::new(
        Arc::new(JwtValidator::new(jwt)),
        Arc::new(DatabaseIdentityResolver::new(db.clone())),
    ));

    let state = AppState { db, graphql_schema };

    let cors = match cors_origin.filter(|origin| *origin != "*") {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/graphql",
            get(graphql::graphql_playground).post(graphql::graphql_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn_with_state(authenticator, resolve_identity)),
        )
        .with_state(state);

    Ok(app)
}
