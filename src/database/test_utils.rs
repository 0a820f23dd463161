use sea_orm::{ActiveModelTrait, DatabaseConnection};

use super::connection::{establish_connection, setup_database};
use super::entities::users;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = establish_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    setup_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn insert_test_user(db: &DatabaseConnection, username: &str) -> users::Model {
    users::ActiveModel::new(username.to_string())
        .insert(db)
        .await
        .expect("Failed to insert test user")
}
