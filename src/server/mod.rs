pub mod app;
pub mod handlers;
pub mod middleware;

use anyhow::Result;
use tracing::info;

use crate::config::{CreateUserArgs, ServeArgs};
use crate::database::{establish_connection, get_database_url, setup_database};
use crate::services::UserService;

pub async fn start_server(args: ServeArgs) -> Result<()> {
    let database_url = get_database_url(Some(&args.database));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;
    info!("Database schema ready");

    let app = app::create_app(db, &args.jwt.settings(), args.cors_origin.as_deref()).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("Server running on http://0.0.0.0:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /graphql                    - GraphQL API (POST) & Playground (GET)");
}

pub async fn create_user(args: CreateUserArgs) -> Result<()> {
    let database_url = get_database_url(Some(&args.database));
    let db = establish_connection(&database_url).await?;
    setup_database(&db).await?;

    let user = UserService::new(db).create_user(&args.username).await?;
    info!("Created user '{}' with id {}", user.username, user.id);

    Ok(())
}
