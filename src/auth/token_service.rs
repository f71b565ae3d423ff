use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::Result;

const DEFAULT_TOKEN_DURATION_MIN: i64 = 60;

/// Signing settings shared by the server and `issue-token`. `website_url` is
/// both the issuer and the audience of every token.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub website_url: String,
    pub token_duration_min: i64,
    pub jwt_algorithm: Algorithm,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        let token_duration_min = match env::var("TOKEN_DURATION_MIN") {
            Ok(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!(
                    "TOKEN_DURATION_MIN={} is not a number, using {}",
                    raw,
                    DEFAULT_TOKEN_DURATION_MIN
                );
                DEFAULT_TOKEN_DURATION_MIN
            }),
            Err(_) => DEFAULT_TOKEN_DURATION_MIN,
        };

        Ok(Self {
            jwt_secret: env::var("JWT_SECRET")?,
            website_url: env::var("WEBSITE_URL")?,
            token_duration_min,
            jwt_algorithm: Algorithm::HS256,
        })
    }

    pub fn with_duration_min(self, minutes: i64) -> Self {
        Self {
            token_duration_min: minutes,
            ..self
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.jwt_algorithm);
        validation.set_audience(&[&self.website_url]);
        validation.set_issuer(&[&self.website_url]);
        validation
    }
}

/// Claims of a catalog token. Tokens minted before the `superuser` claim
/// existed decode as ordinary callers.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub nbf: usize,
    pub iss: String,
    pub aud: String,
    pub jti: String,
    #[serde(default)]
    pub superuser: bool,
}

impl Claims {
    pub fn for_subject(sub: String, superuser: bool, config: &AuthConfig) -> Self {
        let now = Utc::now();
        let issued = now.timestamp() as usize;
        let expires = (now + Duration::minutes(config.token_duration_min)).timestamp() as usize;

        Self {
            sub,
            exp: expires,
            iat: issued,
            nbf: issued,
            iss: config.website_url.clone(),
            aud: config.website_url.clone(),
            jti: Uuid::new_v4().to_string(),
            superuser,
        }
    }
}

pub struct TokenService;

impl TokenService {
    pub fn create_token(sub: String, superuser: bool, config: &AuthConfig) -> Result<String> {
        let claims = Claims::for_subject(sub, superuser, config);
        let token = encode(
            &Header::new(config.jwt_algorithm),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &config.validation(),
        )?;
        Ok(decoded.claims)
    }
}
