use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::TokenValidator;
use crate::errors::{AuthError, AuthResult};

pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Claims carried by an access token. Extra claims are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub token_type: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[derive(Clone, Debug)]
pub struct JwtSettings {
    pub secret: String,
    pub leeway_secs: u64,
    pub audience: Option<String>,
    pub issuer: Option<String>,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            leeway_secs: 0,
            audience: None,
            issuer: None,
        }
    }
}

/// HS256 access-token validator
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = settings.leeway_secs;

        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience.as_str()]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        Self {
            key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
        }
    }
}

impl TokenValidator for JwtValidator {
    fn validate(&self, token: &str) -> AuthResult<Claims> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(AuthError::WrongTokenType(claims.token_type));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn mint(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn accepts_access_tokens() {
        let validator = JwtValidator::new(&JwtSettings::new(SECRET));
        let token = mint(
            json!({"user_id": 7, "token_type": "access", "exp": in_an_hour(), "jti": "abc"}),
            SECRET,
        );

        let claims = validator.validate(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.jti.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_refresh_tokens() {
        let validator = JwtValidator::new(&JwtSettings::new(SECRET));
        let token = mint(
            json!({"user_id": 7, "token_type": "refresh", "exp": in_an_hour()}),
            SECRET,
        );

        assert!(matches!(
            validator.validate(&token),
            Err(AuthError::WrongTokenType(kind)) if kind == "refresh"
        ));
    }

    #[test]
    fn rejects_expired_tokens() {
        let validator = JwtValidator::new(&JwtSettings::new(SECRET));
        let token = mint(
            json!({"user_id": 7, "token_type": "access", "exp": Utc::now().timestamp() - 600}),
            SECRET,
        );

        assert!(matches!(validator.validate(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let settings = JwtSettings {
            leeway_secs: 120,
            ..JwtSettings::new(SECRET)
        };
        let validator = JwtValidator::new(&settings);
        let token = mint(
            json!({"user_id": 7, "token_type": "access", "exp": Utc::now().timestamp() - 30}),
            SECRET,
        );

        assert!(validator.validate(&token).is_ok());
    }

    #[test]
    fn rejects_foreign_signatures_and_garbage() {
        let validator = JwtValidator::new(&JwtSettings::new(SECRET));
        let token = mint(
            json!({"user_id": 7, "token_type": "access", "exp": in_an_hour()}),
            "other-secret",
        );

        assert!(matches!(validator.validate(&token), Err(AuthError::InvalidToken(_))));
        assert!(matches!(validator.validate("not-a-jwt"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn enforces_configured_audience() {
        let settings = JwtSettings {
            audience: Some("recipes".into()),
            ..JwtSettings::new(SECRET)
        };
        let validator = JwtValidator::new(&settings);

        let matching = mint(
            json!({"user_id": 7, "token_type": "access", "exp": in_an_hour(), "aud": "recipes"}),
            SECRET,
        );
        let other = mint(
            json!({"user_id": 7, "token_type": "access", "exp": in_an_hour(), "aud": "billing"}),
            SECRET,
        );

        assert!(validator.validate(&matching).is_ok());
        assert!(validator.validate(&other).is_err());
    }
}
