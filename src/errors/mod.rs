//! Error types for the catalog
//!
//! - **CoreError**: domain failures raised by services and surfaced to GraphQL
//!   clients (unauthenticated access, validation, missing records)
//! - **AuthError**: bearer token failures, consumed by the auth middleware
//!
//! GraphQL conversion lives in `graphql::errors`.

pub mod auth;
pub mod core_error;

pub use auth::AuthError;
pub use core_error::{CoreError, CoreErrorKind, FieldErrors, AUTHENTICATION_REQUIRED};

/// Result type alias for service operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
