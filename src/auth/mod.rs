use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims carried by a bearer token. Identity only; privilege is resolved
/// from the account store on every request, never from the token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),
    #[error("signing secret not configured")]
    MissingSecret,
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Sign claims with the configured secret.
pub fn generate_token(claims: &Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;
    sign(claims, secret)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    let secret = &config::config().security.jwt_secret;
    verify(token, secret)
}

fn sign(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    // Validation::default() checks exp with HS256
    let data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| TokenError::Invalid(e.to_string()))?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims_with_exp(offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "a@x.com".to_string(),
            exp: now + offset_secs,
            iat: now,
        }
    }

    #[test]
    fn round_trip() {
        let token = sign(&claims_with_exp(3600), SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[test]
    fn rejects_expired_token() {
        // 2 minutes past expiry, beyond jsonwebtoken's default leeway
        let token = sign(&claims_with_exp(-120), SECRET).unwrap();
        assert!(matches!(verify(&token, SECRET), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn rejects_wrong_signature() {
        let token = sign(&claims_with_exp(3600), SECRET).unwrap();
        assert!(matches!(
            verify(&token, "other-secret"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify("not-a-token", SECRET).is_err());
    }

    #[test]
    fn refuses_empty_secret() {
        assert!(matches!(
            sign(&claims_with_exp(3600), ""),
            Err(TokenError::MissingSecret)
        ));
    }
}
