//! Token claims and the acting user

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims for authenticated users.
///
/// Tokens are issued by an external identity provider sharing the HS256
/// secret; this server only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Login name
    pub sub: String,
    /// Grants write access to reference data (types, standards)
    #[serde(default)]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::User(self.sub.clone())
    }
}

/// Who a store mutation is performed on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Background or CLI runs
    System,
    /// Authenticated user login
    User(String),
}

impl Actor {
    pub fn login(&self) -> Option<&str> {
        match self {
            Actor::System => None,
            Actor::User(login) => Some(login.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(is_admin: bool) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "mechanic".to_string(),
            is_admin,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let token = claims(true).create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, "mechanic");
        assert!(parsed.is_admin);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = claims(false).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_require_admin() {
        assert!(claims(true).require_admin().is_ok());
        assert!(matches!(
            claims(false).require_admin(),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn test_actor_login() {
        assert_eq!(claims(false).actor().login(), Some("mechanic"));
        assert_eq!(Actor::System.login(), None);
    }
}
