//! Request identity
//!
//! A bearer token is turned into an [`Identity`] in two pluggable steps: a
//! [`TokenValidator`] checks the token and yields its [`Claims`], and an
//! [`IdentityResolver`] maps the claims to a known user. [`Authenticator`]
//! runs both and never fails: anything short of a resolved user is
//! [`Identity::Anonymous`], and resolvers decide what anonymous callers may do.

pub mod jwt;
pub mod resolver;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, warn};

use crate::errors::{AuthError, AuthResult, CoreError};

pub use jwt::{Claims, JwtSettings, JwtValidator, ACCESS_TOKEN_TYPE};
pub use resolver::DatabaseIdentityResolver;

pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(AuthenticatedUser),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::User(_))
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Identity::User(user) => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn require_authenticated(&self) -> Result<&AuthenticatedUser, CoreError> {
        self.user().ok_or_else(CoreError::unauthorized)
    }
}

pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> AuthResult<Claims>;
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, claims: &Claims) -> AuthResult<AuthenticatedUser>;
}

#[derive(Clone)]
pub struct Authenticator {
    validator: Arc<dyn TokenValidator>,
    resolver: Arc<dyn IdentityResolver>,
}

impl Authenticator {
    pub fn new(validator: Arc<dyn TokenValidator>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self {
            validator,
            resolver,
        }
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> Identity {
        match self.try_authenticate(headers).await {
            Ok(Some(user)) => {
                debug!(user_id = user.id, "Authenticated request");
                Identity::User(user)
            }
            Ok(None) => Identity::Anonymous,
            Err(err) if err.is_token_error() => {
                debug!(error = %err, "Rejected bearer token; continuing as anonymous");
                Identity::Anonymous
            }
            Err(AuthError::Database(err)) => {
                warn!(error = %err, "User lookup failed; continuing as anonymous");
                Identity::Anonymous
            }
            Err(err) => {
                debug!(error = %err, "Token subject rejected; continuing as anonymous");
                Identity::Anonymous
            }
        }
    }

    async fn try_authenticate(&self, headers: &HeaderMap) -> AuthResult<Option<AuthenticatedUser>> {
        let Some(token) = extract_bearer_token(headers)? else {
            return Ok(None);
        };

        let claims = self.validator.validate(token)?;
        self.resolver.resolve(&claims).await.map(Some)
    }
}

/// `Ok(None)` when there is nothing to authenticate: no header, or a scheme
/// other than `Bearer`. A `Bearer` header must be exactly two words.
pub fn extract_bearer_token(headers: &HeaderMap) -> AuthResult<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidHeaderEncoding)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [] => Ok(None),
        [scheme, ..] if *scheme != BEARER_SCHEME => Ok(None),
        [_, token] => Ok(Some(token)),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    struct StaticValidator(AuthResult<i32>);

    impl TokenValidator for StaticValidator {
        fn validate(&self, _token: &str) -> AuthResult<Claims> {
            match &self.0 {
                Ok(user_id) => Ok(Claims {
                    user_id: *user_id,
                    token_type: ACCESS_TOKEN_TYPE.to_string(),
                    exp: i64::MAX,
                    iat: None,
                    jti: None,
                }),
                Err(_) => Err(AuthError::InvalidToken("rejected".into())),
            }
        }
    }

    struct KnownUsers(Vec<i32>);

    #[async_trait]
    impl IdentityResolver for KnownUsers {
        async fn resolve(&self, claims: &Claims) -> AuthResult<AuthenticatedUser> {
            if self.0.contains(&claims.user_id) {
                Ok(AuthenticatedUser {
                    id: claims.user_id,
                    username: format!("user-{}", claims.user_id),
                })
            } else {
                Err(AuthError::UserNotFound)
            }
        }
    }

    fn authenticator(validator: StaticValidator) -> Authenticator {
        Authenticator::new(Arc::new(validator), Arc::new(KnownUsers(vec![1])))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()).unwrap(), None);
        assert_eq!(extract_bearer_token(&headers("Bearer abc")).unwrap(), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("Basic dXNlcjpwYXNz")).unwrap(), None);
        assert_eq!(extract_bearer_token(&headers("   ")).unwrap(), None);
        assert!(matches!(
            extract_bearer_token(&headers("Bearer")),
            Err(AuthError::MalformedHeader)
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Bearer a b")),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn anonymous_identity_is_rejected_by_guards() {
        let err = Identity::Anonymous.require_authenticated().unwrap_err();
        assert_eq!(err.kind(), crate::errors::CoreErrorKind::Unauthorized);
        assert!(!Identity::default().is_authenticated());
    }

    #[tokio::test]
    async fn valid_token_for_known_user_authenticates() {
        let identity = authenticator(StaticValidator(Ok(1)))
            .authenticate(&headers("Bearer token"))
            .await;
        assert!(identity.is_authenticated());
        assert_eq!(identity.user().unwrap().id, 1);
    }

    #[tokio::test]
    async fn failures_fall_back_to_anonymous() {
        let unknown_user = authenticator(StaticValidator(Ok(2)))
            .authenticate(&headers("Bearer token"))
            .await;
        assert_eq!(unknown_user, Identity::Anonymous);

        let bad_token = authenticator(StaticValidator(Err(AuthError::TokenExpired)))
            .authenticate(&headers("Bearer token"))
            .await;
        assert_eq!(bad_token, Identity::Anonymous);

        let malformed = authenticator(StaticValidator(Ok(1)))
            .authenticate(&headers("Bearer one two"))
            .await;
        assert_eq!(malformed, Identity::Anonymous);

        let missing = authenticator(StaticValidator(Ok(1)))
            .authenticate(&HeaderMap::new())
            .await;
        assert_eq!(missing, Identity::Anonymous);
    }
}
