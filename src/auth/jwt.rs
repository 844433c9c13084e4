use crate::core::errors::BilledError;
use crate::core::models::{SessionUser, UserType};
use crate::core::session::SessionInfo;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User email
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub exp: usize,
}

pub struct JwtService {
    secret: String,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        JwtService { secret }
    }

    pub fn generate_token(&self, user: &SessionUser) -> Result<String, BilledError> {
        let expiration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize + 3600) // 1 hour expiry
            .map_err(|e| BilledError::InternalServerError(format!("Time error: {}", e)))?;

        let claims = Claims {
            sub: user.email.clone(),
            user_type: user.user_type,
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| BilledError::InternalServerError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, BilledError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| BilledError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Session of a request authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct ClaimsSession {
    pub claims: Claims,
    pub token: String,
}

impl SessionInfo for ClaimsSession {
    fn current_user(&self) -> Result<SessionUser, BilledError> {
        if self.claims.sub.trim().is_empty() {
            return Err(BilledError::InvalidSession("token has no subject".to_string()));
        }
        Ok(SessionUser {
            user_type: self.claims.user_type,
            email: self.claims.sub.clone(),
        })
    }
}
