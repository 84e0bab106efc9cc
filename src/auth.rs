//! Bearer-token validation for protected routes.
//!
//! Token issuance lives on the external authorization server; this module
//! only consumes its output: an HS256-signed JWT whose `scope` claim must
//! contain the scope this deployment is configured to require. Handlers opt
//! in to protection by taking a [`BearerClaims`] parameter; routes without it
//! stay anonymous (the public catalog reads).

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub required_scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Space-separated scope list, OAuth2 style.
    #[serde(default)]
    pub scope: String,
    pub exp: usize,
}

/// Extractor that rejects the request with 401 unless a valid bearer token
/// carrying the configured scope is attached.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

impl FromRequest for BearerClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_claims(req))
    }
}

fn extract_claims(req: &HttpRequest) -> Result<BearerClaims, AppError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| AppError::Internal("auth configuration missing".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        log::debug!("rejected bearer token: {e}");
        AppError::Unauthorized
    })?;

    let claims = decoded.claims;
    if !claims
        .scope
        .split_whitespace()
        .any(|scope| scope == config.required_scope)
    {
        return Err(AppError::Unauthorized);
    }

    Ok(BearerClaims(claims))
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &str = "test-secret";

    fn mint(scope: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: Some("tester".to_string()),
            scope: scope.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token encodes")
    }

    fn request_with(header_value: Option<String>) -> HttpRequest {
        let config = AuthConfig {
            jwt_secret: SECRET.to_string(),
            required_scope: "shop.api".to_string(),
        };
        let mut req = TestRequest::default().app_data(web::Data::new(config));
        if let Some(value) = header_value {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        req.to_http_request()
    }

    #[test]
    fn valid_token_with_scope_is_accepted() {
        let req = request_with(Some(format!("Bearer {}", mint("openid shop.api", 3600))));
        let claims = extract_claims(&req).expect("accepted").0;
        assert_eq!(claims.sub.as_deref(), Some("tester"));
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let req = request_with(None);
        assert!(matches!(extract_claims(&req), Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_scope_is_unauthorized() {
        let req = request_with(Some(format!("Bearer {}", mint("openid", 3600))));
        assert!(matches!(extract_claims(&req), Err(AppError::Unauthorized)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let req = request_with(Some(format!("Bearer {}", mint("shop.api", -3600))));
        assert!(matches!(extract_claims(&req), Err(AppError::Unauthorized)));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = request_with(Some("Basic dXNlcjpwYXNz".to_string()));
        assert!(matches!(extract_claims(&req), Err(AppError::Unauthorized)));
    }
}
