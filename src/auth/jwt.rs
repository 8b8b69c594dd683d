//! JWT Token Service
//!
//! Handles JWT creation, validation, and claims management for student
//! authentication. Tokens are HS256-signed bearer credentials carrying the
//! student's login handle and a 24-hour expiry.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

const ISSUER: &str = "safetrack-server";
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT Claims structure containing the subject handle and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Student login handle
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create a new JWT service with the provided secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a token for a student, valid for 24 hours
    pub fn create_token(&self, student_id: &str) -> Result<String> {
        self.create_token_with_ttl(student_id, Duration::hours(TOKEN_TTL_HOURS))
    }

    fn create_token_with_ttl(&self, student_id: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: student_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")
    }

    /// Validate signature, expiry, and issuer, and decode the token
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    /// Extract claims from a validated token
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let token_data = self.validate_token(token)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = JwtService::new("test_secret");

        let token = jwt_service.create_token("s1").unwrap();
        let claims = jwt_service.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, "s1");
        assert_eq!(claims.iss, "safetrack-server");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt_service = JwtService::new("test_secret");

        // Past the default 60s validation leeway
        let token = jwt_service
            .create_token_with_ttl("s1", Duration::minutes(-5))
            .unwrap();

        assert!(jwt_service.decode_claims(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued_by = JwtService::new("secret_a");
        let verified_by = JwtService::new("secret_b");

        let token = issued_by.create_token("s1").unwrap();

        assert!(verified_by.decode_claims(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let jwt_service = JwtService::new("test_secret");
        assert!(jwt_service.decode_claims("not.a.token").is_err());
    }
}
