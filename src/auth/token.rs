use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Checks the HS256 signature and expiry, then extracts the user.
pub fn verify_token(token: &str, secret: &str) -> AppResult<User> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|err| AppError::Auth(format!("invalid access token: {err}")))?;

    Ok(User {
        name: data.claims.username,
        role: data.claims.role,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::Claims;

    pub fn signed_token(secret: &str, username: &str, role: &str, ttl_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::signed_token;
    use super::*;

    #[test]
    fn extracts_user_from_valid_token() {
        let token = signed_token("shh", "ada", "agent", 3600);
        let user = verify_token(&token, "shh").unwrap();
        assert_eq!(
            user,
            User {
                name: "ada".to_string(),
                role: "agent".to_string(),
            }
        );
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = signed_token("shh", "ada", "agent", 3600);
        assert!(matches!(verify_token(&token, "other"), Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let token = signed_token("shh", "ada", "agent", -3600);
        assert!(verify_token(&token, "shh").is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(verify_token("not-a-jwt", "shh").is_err());
    }
}
