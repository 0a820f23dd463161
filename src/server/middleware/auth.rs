use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::Authenticator;

/// Attach the caller's [`Identity`](crate::auth::Identity) to the request.
/// Never rejects: unauthenticated requests continue as anonymous.
pub async fn resolve_identity(
    State(authenticator): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = authenticator.authenticate(request.headers()).await;
    request.extensions_mut().insert(identity);
    next.run(request).await
}
