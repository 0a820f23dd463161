//! Bearer token errors
//!
//! These never reach a client: the auth middleware logs them and continues
//! the request as anonymous. Resolvers then decide whether anonymous access
//! is acceptable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Authorization header present but not `Bearer <token>`
    #[error("Authorization header must contain two space-delimited values")]
    MalformedHeader,

    /// Header bytes are not visible ASCII
    #[error("Authorization header is not valid ASCII")]
    InvalidHeaderEncoding,

    /// Signature, structure or claim checks failed
    #[error("Invalid authentication token: {0}")]
    InvalidToken(String),

    /// Token has expired
    #[error("Authentication token has expired")]
    TokenExpired,

    /// Token is valid but not an access token
    #[error("Token has wrong type: expected 'access', got '{0}'")]
    WrongTokenType(String),

    /// Token subject does not resolve to a user
    #[error("User not found")]
    UserNotFound,

    /// Token subject resolves to a deactivated user
    #[error("User is inactive")]
    UserInactive,

    /// User lookup failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

impl AuthError {
    /// Failures caused by the token itself rather than the user store
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedHeader
                | AuthError::InvalidHeaderEncoding
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired
                | AuthError::WrongTokenType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_signature_maps_to_token_expired() {
        let err: AuthError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature)
                .into();
        assert!(matches!(err, AuthError::TokenExpired));
        assert!(err.is_token_error());
    }

    #[test]
    fn other_jwt_errors_map_to_invalid_token() {
        let err: AuthError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSignature)
                .into();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn user_errors_are_not_token_errors() {
        assert!(!AuthError::UserNotFound.is_token_error());
        assert!(!AuthError::UserInactive.is_token_error());
        assert_eq!(AuthError::UserInactive.to_string(), "User is inactive");
    }
}
