//! Bearer-token authentication and password hashing.
//!
//! Tokens are HS256 JWTs with a 15-minute expiry and the user id in `sub`.
//! Password digests are salted SHA-256, compared in constant time to
//! mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Token lifetime in minutes.
pub const TOKEN_TTL_MINUTES: i64 = 15;

/// JWT claim set carried by auth tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated user id, inserted into request extensions by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Issue a signed token for a user, returning it with its expiry.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(TOKEN_TTL_MINUTES);

    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

/// Verify a token's signature and expiry and return its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

/// Bearer-token auth layer function that takes the signing secret as a parameter.
pub async fn jwt_auth_layer(secret: String, mut request: Request, next: Next) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = bearer else {
        return unauthorized_response("Missing bearer token");
    };

    match decode_token(&secret, &token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser(claims.sub));
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!("Rejected bearer token: {}", err);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Hash a password with the configured salt.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a candidate password against a stored digest in constant time.
pub fn verify_password(salt: &str, password: &str, digest: &str) -> bool {
    let candidate = hash_password(salt, password);
    candidate.as_bytes().ct_eq(digest.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
